mod attendance;
mod catalog;
mod people;
mod reports;
mod schedules;
mod sessions;

use axum::routing::{patch, post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/departments", get(catalog::list_departments).post(catalog::create_department))
        .route("/departments/{id}", get(catalog::get_department).put(catalog::update_department))
        .route("/classrooms", get(catalog::list_classrooms).post(catalog::create_classroom))
        .route(
            "/classrooms/{id}",
            get(catalog::get_classroom)
                .put(catalog::update_classroom)
                .delete(catalog::delete_classroom),
        )
        .route("/courses", get(catalog::list_courses).post(catalog::create_course))
        .route(
            "/courses/{id}",
            get(catalog::get_course)
                .put(catalog::update_course)
                .delete(catalog::delete_course),
        )
        .route("/courses/{id}/students", get(people::enrolled_students))
        .route("/courses/{id}/enrollments", get(people::enrollments_by_course))
        .route(
            "/offered-courses",
            get(catalog::list_offered_courses).post(catalog::create_offered_course),
        )
        .route(
            "/offered-courses/{id}",
            get(catalog::get_offered_course)
                .put(catalog::update_offered_course)
                .delete(catalog::delete_offered_course),
        )
        .route("/offered-courses/teacher/{teacher_id}", get(catalog::offered_by_teacher))
        .route("/offered-courses/course/{course_id}", get(catalog::offered_by_course))
        .route("/students", get(people::list_students).post(people::create_student))
        .route("/students/{id}", get(people::get_student).delete(people::delete_student))
        .route("/students/{id}/enrollments", get(people::enrollments_by_student))
        .route("/teachers", get(people::list_teachers).post(people::create_teacher))
        .route("/teachers/{id}", get(people::get_teacher).delete(people::delete_teacher))
        .route("/enrollments", post(people::enroll))
        .route(
            "/enrollments/{id}",
            put(people::update_enrollment).delete(people::delete_enrollment),
        )
        .route("/schedules", get(schedules::list_schedules).post(schedules::create_schedule))
        .route("/schedules/check-conflicts", post(schedules::check_conflicts))
        .route("/schedules/day/{day}", get(schedules::list_by_day))
        .route("/schedules/course/{course_id}", get(schedules::list_by_course))
        .route(
            "/schedules/{id}",
            get(schedules::get_schedule)
                .put(schedules::update_schedule)
                .delete(schedules::delete_schedule),
        )
        .route("/schedules/{id}/deactivate", patch(schedules::deactivate_schedule))
        .route("/sessions", get(sessions::list_sessions).post(sessions::create_session))
        .route(
            "/sessions/{id}",
            get(sessions::get_session)
                .put(sessions::update_session)
                .delete(sessions::delete_session),
        )
        .route("/sessions/course/{course_id}", get(sessions::list_by_course))
        .route(
            "/sessions/course/{course_id}/date/{date}",
            get(sessions::list_by_course_and_date),
        )
        .route("/sessions/teacher/{teacher_id}", get(sessions::list_by_teacher))
        .route("/attendance", post(attendance::mark_attendance))
        .route("/attendance/session/{session_id}", get(attendance::by_session))
        .route("/attendance/teacher/{teacher_id}/courses", get(catalog::courses_for_teacher))
        .route("/attendance/course/{course_id}", get(attendance::by_course))
        .route(
            "/attendance/course/{course_id}/date/{date}",
            get(attendance::by_course_and_date),
        )
        .route(
            "/attendance/student/{student_id}/course/{course_id}",
            get(attendance::by_student_and_course),
        )
        .route("/reports/daily/{date}", get(reports::daily))
        .route("/reports/monthly/{year_month}", get(reports::monthly))
        .route("/reports/course/{course_id}", get(reports::course))
        .route("/reports/student/{student_id}", get(reports::student))
        .route("/reports/dashboard", get(reports::dashboard))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}
