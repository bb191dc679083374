use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: String,
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub year_level: Option<i32>,
    pub section: Option<String>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudentRequest {
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub year_level: Option<i32>,
    #[serde(default)]
    pub section: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeacherRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub department_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum EnrollmentStatus {
    #[serde(alias = "ACTIVE")]
    Enrolled,
    Dropped,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub status: EnrollmentStatus,
    pub date_enrolled: NaiveDate,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    pub student_id: String,
    pub course_id: String,
    #[serde(default)]
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEnrollmentRequest {
    pub status: EnrollmentStatus,
}

/// Roster row: an enrollment joined with the student it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EnrolledStudent {
    pub student_id: String,
    pub student_name: String,
    pub email: String,
    pub year_level: Option<i32>,
    pub section: Option<String>,
    pub enrollment_status: EnrollmentStatus,
}
