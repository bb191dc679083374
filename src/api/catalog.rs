use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub(super) async fn list_departments(State(state): State<AppState>) -> Result<Json<Vec<Department>>, AppError> {
    Ok(Json(state.catalog().list_departments().await?))
}

pub(super) async fn create_department(
    State(state): State<AppState>,
    Json(req): Json<NewDepartmentRequest>,
) -> Result<Json<Department>, AppError> {
    Ok(Json(state.catalog().create_department(req).await?))
}

pub(super) async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Department>, AppError> {
    Ok(Json(state.catalog().get_department(&id).await?))
}

pub(super) async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewDepartmentRequest>,
) -> Result<Json<Department>, AppError> {
    Ok(Json(state.catalog().update_department(&id, req).await?))
}

pub(super) async fn list_classrooms(State(state): State<AppState>) -> Result<Json<Vec<Classroom>>, AppError> {
    Ok(Json(state.catalog().list_classrooms().await?))
}

pub(super) async fn create_classroom(
    State(state): State<AppState>,
    Json(req): Json<NewClassroomRequest>,
) -> Result<Json<Classroom>, AppError> {
    Ok(Json(state.catalog().create_classroom(req).await?))
}

pub(super) async fn get_classroom(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Classroom>, AppError> {
    Ok(Json(state.catalog().get_classroom(&id).await?))
}

pub(super) async fn update_classroom(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewClassroomRequest>,
) -> Result<Json<Classroom>, AppError> {
    Ok(Json(state.catalog().update_classroom(&id, req).await?))
}

pub(super) async fn delete_classroom(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.catalog().delete_classroom(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.catalog().list_courses().await?))
}

pub(super) async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<NewCourseRequest>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(state.catalog().create_course(req).await?))
}

pub(super) async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(state.catalog().get_course(&id).await?))
}

pub(super) async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(state.catalog().update_course(&id, req).await?))
}

pub(super) async fn courses_for_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.catalog().courses_for_teacher(&teacher_id).await?))
}

pub(super) async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.catalog().delete_course(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn list_offered_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<OfferedCourse>>, AppError> {
    Ok(Json(state.catalog().list_offered_courses().await?))
}

pub(super) async fn create_offered_course(
    State(state): State<AppState>,
    Json(req): Json<NewOfferedCourseRequest>,
) -> Result<Json<OfferedCourse>, AppError> {
    Ok(Json(state.catalog().create_offered_course(req).await?))
}

pub(super) async fn get_offered_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OfferedCourse>, AppError> {
    Ok(Json(state.catalog().get_offered_course(&id).await?))
}

pub(super) async fn update_offered_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewOfferedCourseRequest>,
) -> Result<Json<OfferedCourse>, AppError> {
    Ok(Json(state.catalog().update_offered_course(&id, req).await?))
}

pub(super) async fn delete_offered_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.catalog().delete_offered_course(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn offered_by_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
) -> Result<Json<Vec<OfferedCourse>>, AppError> {
    Ok(Json(state.catalog().list_offered_by_teacher(&teacher_id).await?))
}

pub(super) async fn offered_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<OfferedCourse>>, AppError> {
    Ok(Json(state.catalog().list_offered_by_course(&course_id).await?))
}
