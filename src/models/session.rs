use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::models::schedule::validate_range;

/// One dated meeting of a course that attendance is taken against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AttendanceSession {
    pub id: String,
    pub course_id: String,
    pub teacher_id: String,
    pub schedule_id: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub session_type: Option<String>,
    pub is_finalized: bool,
    pub remarks: Option<String>,
}

impl AttendanceSession {
    pub fn ensure_open(&self) -> Result<(), AppError> {
        if self.is_finalized {
            return Err(AppError::SessionFinalized(self.id.clone()));
        }
        Ok(())
    }

    /// Attendance for one course cannot be filed under another course's session.
    pub fn ensure_course(&self, course_id: &str) -> Result<(), AppError> {
        if self.course_id != course_id {
            return Err(AppError::BadRequest(format!(
                "session {} belongs to course {}, not {}",
                self.id, self.course_id, course_id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub course_id: String,
    pub teacher_id: String,
    #[serde(default)]
    pub schedule_id: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default)]
    pub is_finalized: bool,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl SessionRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => validate_range(start, end),
            _ => Ok(()),
        }
    }

    pub fn into_session(self, id: String) -> AttendanceSession {
        AttendanceSession {
            id,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
            schedule_id: self.schedule_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            session_type: self.session_type,
            is_finalized: self.is_finalized,
            remarks: self.remarks,
        }
    }
}
