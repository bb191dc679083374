use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub(super) async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.people().list_students().await?))
}

pub(super) async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<NewStudentRequest>,
) -> Result<Json<Student>, AppError> {
    Ok(Json(state.people().create_student(req).await?))
}

pub(super) async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    Ok(Json(state.people().get_student(&id).await?))
}

pub(super) async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.people().delete_student(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn list_teachers(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>, AppError> {
    Ok(Json(state.people().list_teachers().await?))
}

pub(super) async fn create_teacher(
    State(state): State<AppState>,
    Json(req): Json<NewTeacherRequest>,
) -> Result<Json<Teacher>, AppError> {
    Ok(Json(state.people().create_teacher(req).await?))
}

pub(super) async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Teacher>, AppError> {
    Ok(Json(state.people().get_teacher(&id).await?))
}

pub(super) async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.people().delete_teacher(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn enroll(
    State(state): State<AppState>,
    Json(req): Json<EnrollmentRequest>,
) -> Result<Json<Enrollment>, AppError> {
    Ok(Json(state.enrollments().enroll(req).await?))
}

pub(super) async fn update_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEnrollmentRequest>,
) -> Result<Json<Enrollment>, AppError> {
    Ok(Json(state.enrollments().update_status(&id, req).await?))
}

pub(super) async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.enrollments().delete_enrollment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn enrollments_by_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    Ok(Json(state.enrollments().list_by_course(&id).await?))
}

pub(super) async fn enrollments_by_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    Ok(Json(state.enrollments().list_by_student(&id).await?))
}

pub(super) async fn enrolled_students(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<EnrolledStudent>>, AppError> {
    Ok(Json(state.enrollments().enrolled_students(&id).await?))
}
