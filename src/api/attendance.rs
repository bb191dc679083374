use axum::Json;
use axum::extract::{Path, State};
use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub(super) async fn mark_attendance(
    State(state): State<AppState>,
    Json(req): Json<MarkAttendanceRequest>,
) -> Result<Json<AttendanceResponse>, AppError> {
    Ok(Json(state.attendance().mark_attendance(req).await?))
}

pub(super) async fn by_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<AttendanceResponse>>, AppError> {
    Ok(Json(state.attendance().get_by_session(&session_id).await?))
}

pub(super) async fn by_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<AttendanceResponse>>, AppError> {
    Ok(Json(state.attendance().get_by_course(&course_id).await?))
}

pub(super) async fn by_course_and_date(
    State(state): State<AppState>,
    Path((course_id, date)): Path<(String, NaiveDate)>,
) -> Result<Json<Vec<AttendanceResponse>>, AppError> {
    Ok(Json(state.attendance().get_by_course_and_date(&course_id, date).await?))
}

pub(super) async fn by_student_and_course(
    State(state): State<AppState>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<Json<Vec<AttendanceResponse>>, AppError> {
    Ok(Json(
        state
            .attendance()
            .get_by_student_and_course(&student_id, &course_id)
            .await?,
    ))
}
