use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

#[derive(Deserialize)]
pub(super) struct ScheduleQueryParams {
    #[serde(default)]
    active: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct ConflictCheckResponse {
    has_conflict: bool,
    conflicts: Vec<ClassSchedule>,
}

pub(super) async fn list_schedules(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQueryParams>,
) -> Result<Json<Vec<ClassSchedule>>, AppError> {
    Ok(Json(state.schedules().list_schedules(params.active).await?))
}

pub(super) async fn create_schedule(
    State(state): State<AppState>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<ClassSchedule>, AppError> {
    Ok(Json(state.schedules().create_schedule(req).await?))
}

pub(super) async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClassSchedule>, AppError> {
    Ok(Json(state.schedules().get_schedule(&id).await?))
}

pub(super) async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<ClassSchedule>, AppError> {
    Ok(Json(state.schedules().update_schedule(&id, req).await?))
}

pub(super) async fn deactivate_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.schedules().deactivate_schedule(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.schedules().delete_schedule(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn check_conflicts(
    State(state): State<AppState>,
    Json(query): Json<ConflictQuery>,
) -> Result<Json<ConflictCheckResponse>, AppError> {
    let conflicts = state.schedules().check_conflicts(&query).await?;
    Ok(Json(ConflictCheckResponse {
        has_conflict: !conflicts.is_empty(),
        conflicts,
    }))
}

// Path days are matched case-insensitively.
pub(super) async fn list_by_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> Result<Json<Vec<ClassSchedule>>, AppError> {
    let day = day.parse::<DayOfWeek>()?;
    Ok(Json(state.schedules().list_by_day(day).await?))
}

pub(super) async fn list_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<ClassSchedule>>, AppError> {
    Ok(Json(state.schedules().list_by_course(&course_id).await?))
}
