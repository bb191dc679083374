use axum::Json;
use axum::extract::{Path, State};
use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub(super) async fn daily(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<AttendanceReport>, AppError> {
    Ok(Json(state.reports().daily_report(date).await?))
}

pub(super) async fn monthly(
    State(state): State<AppState>,
    Path(year_month): Path<String>,
) -> Result<Json<AttendanceReport>, AppError> {
    let month = year_month.parse::<YearMonth>()?;
    Ok(Json(state.reports().monthly_report(month).await?))
}

pub(super) async fn course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<AttendanceReport>, AppError> {
    Ok(Json(state.reports().course_report(&course_id).await?))
}

pub(super) async fn student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<AttendanceReport>, AppError> {
    Ok(Json(state.reports().student_report(&student_id).await?))
}

pub(super) async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.reports().dashboard_statistics().await?))
}
