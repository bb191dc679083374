use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Schedule conflict detected for this classroom and time slot")]
    ScheduleConflict(Vec<String>),

    #[error("Student is already enrolled in this course")]
    AlreadyEnrolled,

    #[error("No attendance session exists for course {course_id} on {date}")]
    MissingSession { course_id: String, date: NaiveDate },

    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),

    #[error("Cannot delete: {0}")]
    DependencyExists(String),

    #[error("Attendance session {0} is finalized")]
    SessionFinalized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn not_found(what: &str, id: &str) -> Self {
        AppError::NotFound(format!("{} {}", what, id))
    }
}

// Unique-index violations map to Conflict.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Conflict(db_err.message().to_string());
            }
        }
        AppError::Database(err)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ScheduleConflict(_)
            | AppError::AlreadyEnrolled
            | AppError::DependencyExists(_)
            | AppError::SessionFinalized(_)
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::MissingSession { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidStatus(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Migration(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            AppError::Database(e) => {
                error!("database error: {}", e);
                "Database error occurred".to_string()
            }
            AppError::Migration(e) => {
                error!("migration error: {}", e);
                "Internal server error".to_string()
            }
            AppError::Config(msg) => {
                error!("configuration error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::ScheduleConflict(ids) => {
                format!("{} (conflicting schedules: {})", self, ids.join(", "))
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
