use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    Excused,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Late => "LATE",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::Excused => "EXCUSED",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PRESENT" => Ok(AttendanceStatus::Present),
            "LATE" => Ok(AttendanceStatus::Late),
            "ABSENT" => Ok(AttendanceStatus::Absent),
            "EXCUSED" => Ok(AttendanceStatus::Excused),
            _ => Err(AppError::InvalidStatus(s.to_string())),
        }
    }
}

/// Stored attendance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub session_id: Option<String>,
    pub date: NaiveDate,
    pub time_in: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub recorded_by: Option<String>,
}

/// Attendance joined with student, course and (when it still exists) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub course_id: String,
    pub course_code: String,
    pub course_name: String,
    pub session_id: Option<String>,
    pub date: NaiveDate,
    pub time_in: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub recorded_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    pub student_id: String,
    pub course_id: String,
    #[serde(default)]
    pub session_id: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub time_in: Option<NaiveTime>,
    pub status: String,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub recorded_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceResponse {
    pub attendance_id: String,
    pub student_id: String,
    pub student_name: String,
    pub course_id: String,
    pub course_name: String,
    pub session_id: Option<String>,
    pub date: NaiveDate,
    pub time_in: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub recorded_by: Option<String>,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            attendance_id: record.id,
            student_id: record.student_id,
            student_name: record.student_name,
            course_id: record.course_id,
            course_name: record.course_name,
            session_id: record.session_id,
            date: record.date,
            time_in: record.time_in,
            status: record.status,
            remarks: record.remarks,
            recorded_by: record.recorded_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_normalizes_case() {
        assert_eq!("present".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Present);
        assert_eq!("Late".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Late);
        assert_eq!("ABSENT".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Absent);
        assert_eq!(" excused".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Excused);
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        match "tardy".parse::<AttendanceStatus>() {
            Err(AppError::InvalidStatus(raw)) => assert_eq!(raw, "tardy"),
            other => panic!("expected InvalidStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_status_serializes_canonical() {
        let json = serde_json::to_string(&AttendanceStatus::Excused).unwrap();
        assert_eq!(json, "\"EXCUSED\"");
    }
}
