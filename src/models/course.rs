use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: String,
    pub course_code: String,
    pub course_name: String,
    pub description: Option<String>,
    pub units: i32,
    pub course_type: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourseRequest {
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub units: i32,
    #[serde(default)]
    pub course_type: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Full replacement of a course's editable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub units: i32,
    #[serde(default)]
    pub course_type: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// One teacher's instance of a course for a term and section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OfferedCourse {
    pub id: String,
    pub course_id: String,
    pub teacher_id: String,
    pub semester: String,
    pub school_year: String,
    pub section: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOfferedCourseRequest {
    pub course_id: String,
    pub teacher_id: String,
    pub semester: String,
    pub school_year: String,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Department {
    pub id: String,
    pub department_code: String,
    pub department_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDepartmentRequest {
    pub department_code: String,
    pub department_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Classroom {
    pub id: String,
    pub room_number: String,
    pub building: Option<String>,
    pub capacity: i32,
    pub room_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClassroomRequest {
    pub room_number: String,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub capacity: i32,
    #[serde(default)]
    pub room_type: Option<String>,
}
