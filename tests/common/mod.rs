#![allow(dead_code)]

use std::path::PathBuf;

use attendance::db;
use attendance::models::{
    AttendanceSession, Classroom, Course, Department, Enrollment, EnrollmentRequest,
    MarkAttendanceRequest, NewClassroomRequest, NewCourseRequest, NewDepartmentRequest,
    NewOfferedCourseRequest, NewStudentRequest, NewTeacherRequest, OfferedCourse, SessionRequest,
    Student, Teacher,
};
use attendance::services::{CatalogService, EnrollmentService, PeopleService, SessionService};
use chrono::{NaiveDate, NaiveTime};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Single connection: every pooled connection to `sqlite::memory:` is its own database.
pub async fn setup_test_db() -> SqlitePool {
    db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create test database")
}

/// On-disk database shared by several pooled connections, for tests that race
/// writers against each other. Remove the file with `remove_file_db`.
pub async fn setup_file_db(max_connections: u32) -> (SqlitePool, PathBuf) {
    let path = std::env::temp_dir().join(format!("attendance-test-{}.db", Uuid::new_v4()));
    let url = format!("sqlite://{}", path.display());
    let pool = db::connect(&url, max_connections)
        .await
        .expect("Failed to create file database");
    (pool, path)
}

pub async fn remove_file_db(pool: SqlitePool, path: PathBuf) {
    pool.close().await;
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub struct Fixture {
    pub department: Department,
    pub room_a: Classroom,
    pub room_b: Classroom,
    pub course: Course,
    pub teacher: Teacher,
    pub offered: OfferedCourse,
    pub alice: Student,
    pub bob: Student,
}

pub async fn seed(pool: &SqlitePool) -> Fixture {
    let catalog = CatalogService::new(pool.clone());
    let people = PeopleService::new(pool.clone());

    let department = catalog
        .create_department(NewDepartmentRequest {
            department_code: "CS".to_string(),
            department_name: "Computer Science".to_string(),
        })
        .await
        .expect("Failed to create department");

    let room_a = catalog
        .create_classroom(NewClassroomRequest {
            room_number: "R101".to_string(),
            building: Some("Main".to_string()),
            capacity: 40,
            room_type: Some("LECTURE".to_string()),
        })
        .await
        .expect("Failed to create classroom");

    let room_b = catalog
        .create_classroom(NewClassroomRequest {
            room_number: "R102".to_string(),
            building: Some("Main".to_string()),
            capacity: 30,
            room_type: None,
        })
        .await
        .expect("Failed to create classroom");

    let course = catalog
        .create_course(NewCourseRequest {
            course_code: "CS101".to_string(),
            course_name: "Intro to Programming".to_string(),
            description: None,
            units: 3,
            course_type: Some("LECTURE".to_string()),
        })
        .await
        .expect("Failed to create course");

    let teacher = people
        .create_teacher(NewTeacherRequest {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.edu".to_string(),
            department_id: Some(department.id.clone()),
        })
        .await
        .expect("Failed to create teacher");

    let offered = catalog
        .create_offered_course(NewOfferedCourseRequest {
            course_id: course.id.clone(),
            teacher_id: teacher.id.clone(),
            semester: "1st".to_string(),
            school_year: "2025-2026".to_string(),
            section: "A".to_string(),
        })
        .await
        .expect("Failed to create offered course");

    let alice = add_student(pool, "2025-0001", "Alice", "Reyes").await;
    let bob = add_student(pool, "2025-0002", "Bob", "Santos").await;

    Fixture {
        department,
        room_a,
        room_b,
        course,
        teacher,
        offered,
        alice,
        bob,
    }
}

pub async fn add_student(pool: &SqlitePool, number: &str, first: &str, last: &str) -> Student {
    PeopleService::new(pool.clone())
        .create_student(NewStudentRequest {
            student_number: number.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.edu", number),
            year_level: Some(1),
            section: Some("A".to_string()),
        })
        .await
        .expect("Failed to create student")
}

pub async fn add_course(pool: &SqlitePool, code: &str, name: &str) -> Course {
    CatalogService::new(pool.clone())
        .create_course(NewCourseRequest {
            course_code: code.to_string(),
            course_name: name.to_string(),
            description: None,
            units: 3,
            course_type: None,
        })
        .await
        .expect("Failed to create course")
}

pub async fn enroll(pool: &SqlitePool, student_id: &str, course_id: &str) -> Enrollment {
    EnrollmentService::new(pool.clone())
        .enroll(EnrollmentRequest {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            academic_year: Some("2025-2026".to_string()),
        })
        .await
        .expect("Failed to enroll student")
}

pub fn session_request(fx: &Fixture, on: NaiveDate) -> SessionRequest {
    SessionRequest {
        course_id: fx.course.id.clone(),
        teacher_id: fx.teacher.id.clone(),
        schedule_id: None,
        date: on,
        start_time: Some(time(9, 0)),
        end_time: Some(time(10, 30)),
        session_type: Some("LECTURE".to_string()),
        is_finalized: false,
        remarks: None,
    }
}

pub async fn open_session(pool: &SqlitePool, fx: &Fixture, on: NaiveDate) -> AttendanceSession {
    SessionService::new(pool.clone())
        .create_session(session_request(fx, on))
        .await
        .expect("Failed to create session")
}

pub fn mark(fx: &Fixture, student: &Student, on: NaiveDate, status: &str) -> MarkAttendanceRequest {
    MarkAttendanceRequest {
        student_id: student.id.clone(),
        course_id: fx.course.id.clone(),
        session_id: None,
        date: on,
        time_in: None,
        status: status.to_string(),
        remarks: None,
        recorded_by: None,
    }
}
