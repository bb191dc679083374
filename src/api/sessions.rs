use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub(super) async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceSession>>, AppError> {
    Ok(Json(state.sessions().list_sessions().await?))
}

pub(super) async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<AttendanceSession>, AppError> {
    Ok(Json(state.sessions().create_session(req).await?))
}

pub(super) async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AttendanceSession>, AppError> {
    Ok(Json(state.sessions().get_session(&id).await?))
}

pub(super) async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<AttendanceSession>, AppError> {
    Ok(Json(state.sessions().update_session(&id, req).await?))
}

pub(super) async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.sessions().delete_session(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn list_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<AttendanceSession>>, AppError> {
    Ok(Json(state.sessions().list_by_course(&course_id).await?))
}

pub(super) async fn list_by_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
) -> Result<Json<Vec<AttendanceSession>>, AppError> {
    Ok(Json(state.sessions().list_by_teacher(&teacher_id).await?))
}

pub(super) async fn list_by_course_and_date(
    State(state): State<AppState>,
    Path((course_id, date)): Path<(String, NaiveDate)>,
) -> Result<Json<Vec<AttendanceSession>>, AppError> {
    Ok(Json(state.sessions().list_by_course_and_date(&course_id, date).await?))
}
