use sqlx::SqliteExecutor;

use crate::models::{Classroom, Course, Department, OfferedCourse};

pub async fn insert_department(
    db: impl SqliteExecutor<'_>,
    department: &Department,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO departments (id, department_code, department_name) VALUES (?1, ?2, ?3)")
        .bind(&department.id)
        .bind(&department.department_code)
        .bind(&department.department_name)
        .execute(db)
        .await?;

    Ok(())
}

pub async fn fetch_departments(db: impl SqliteExecutor<'_>) -> Result<Vec<Department>, sqlx::Error> {
    sqlx::query_as::<_, Department>(
        "SELECT id, department_code, department_name FROM departments ORDER BY department_code",
    )
    .fetch_all(db)
    .await
}

pub async fn find_department_by_id(
    db: impl SqliteExecutor<'_>,
    id: &str,
) -> Result<Option<Department>, sqlx::Error> {
    sqlx::query_as::<_, Department>(
        "SELECT id, department_code, department_name FROM departments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_classroom(
    db: impl SqliteExecutor<'_>,
    classroom: &Classroom,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO classrooms (id, room_number, building, capacity, room_type)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&classroom.id)
    .bind(&classroom.room_number)
    .bind(&classroom.building)
    .bind(classroom.capacity)
    .bind(&classroom.room_type)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn fetch_classrooms(db: impl SqliteExecutor<'_>) -> Result<Vec<Classroom>, sqlx::Error> {
    sqlx::query_as::<_, Classroom>(
        "SELECT id, room_number, building, capacity, room_type FROM classrooms ORDER BY room_number",
    )
    .fetch_all(db)
    .await
}

pub async fn find_classroom_by_id(
    db: impl SqliteExecutor<'_>,
    id: &str,
) -> Result<Option<Classroom>, sqlx::Error> {
    sqlx::query_as::<_, Classroom>(
        "SELECT id, room_number, building, capacity, room_type FROM classrooms WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_classroom(db: impl SqliteExecutor<'_>, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM classrooms WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn count_schedules_in_classroom(
    db: impl SqliteExecutor<'_>,
    classroom_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM class_schedules WHERE classroom_id = ?1")
        .bind(classroom_id)
        .fetch_one(db)
        .await
}

pub async fn insert_course(db: impl SqliteExecutor<'_>, course: &Course) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO courses
            (id, course_code, course_name, description, units, course_type, is_active)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&course.id)
    .bind(&course.course_code)
    .bind(&course.course_name)
    .bind(&course.description)
    .bind(course.units)
    .bind(&course.course_type)
    .bind(course.is_active)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn fetch_courses(db: impl SqliteExecutor<'_>) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, course_code, course_name, description, units, course_type, is_active
        FROM courses
        ORDER BY course_code
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id(db: impl SqliteExecutor<'_>, id: &str) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, course_code, course_name, description, units, course_type, is_active FROM courses WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_course(db: impl SqliteExecutor<'_>, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

/// Rows in other tables that still point at the course: offerings, enrollments
/// and sessions. Attendance is counted separately.
pub async fn count_course_references(
    db: impl SqliteExecutor<'_>,
    course_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT (SELECT COUNT(*) FROM offered_courses WHERE course_id = ?1)
             + (SELECT COUNT(*) FROM enrollments WHERE course_id = ?1)
             + (SELECT COUNT(*) FROM attendance_sessions WHERE course_id = ?1)
        "#,
    )
    .bind(course_id)
    .fetch_one(db)
    .await
}

pub async fn count_courses(db: impl SqliteExecutor<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
        .fetch_one(db)
        .await
}

pub async fn insert_offered_course(
    db: impl SqliteExecutor<'_>,
    offered: &OfferedCourse,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO offered_courses (id, course_id, teacher_id, semester, school_year, section)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&offered.id)
    .bind(&offered.course_id)
    .bind(&offered.teacher_id)
    .bind(&offered.semester)
    .bind(&offered.school_year)
    .bind(&offered.section)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn fetch_offered_courses(db: impl SqliteExecutor<'_>) -> Result<Vec<OfferedCourse>, sqlx::Error> {
    sqlx::query_as::<_, OfferedCourse>(
        r#"
        SELECT id, course_id, teacher_id, semester, school_year, section
        FROM offered_courses
        ORDER BY school_year DESC, semester, section
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn find_offered_course_by_id(
    db: impl SqliteExecutor<'_>,
    id: &str,
) -> Result<Option<OfferedCourse>, sqlx::Error> {
    sqlx::query_as::<_, OfferedCourse>(
        "SELECT id, course_id, teacher_id, semester, school_year, section FROM offered_courses WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn update_department(
    db: impl SqliteExecutor<'_>,
    department: &Department,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE departments SET department_code = ?1, department_name = ?2 WHERE id = ?3",
    )
    .bind(&department.department_code)
    .bind(&department.department_name)
    .bind(&department.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn update_classroom(
    db: impl SqliteExecutor<'_>,
    classroom: &Classroom,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE classrooms
        SET room_number = ?1,
            building = ?2,
            capacity = ?3,
            room_type = ?4
        WHERE id = ?5
        "#,
    )
    .bind(&classroom.room_number)
    .bind(&classroom.building)
    .bind(classroom.capacity)
    .bind(&classroom.room_type)
    .bind(&classroom.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn update_course(db: impl SqliteExecutor<'_>, course: &Course) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE courses
        SET course_code = ?1,
            course_name = ?2,
            description = ?3,
            units = ?4,
            course_type = ?5,
            is_active = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&course.course_code)
    .bind(&course.course_name)
    .bind(&course.description)
    .bind(course.units)
    .bind(&course.course_type)
    .bind(course.is_active)
    .bind(&course.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

/// Distinct courses the teacher has at least one offering of.
pub async fn fetch_courses_by_teacher(
    db: impl SqliteExecutor<'_>,
    teacher_id: &str,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT DISTINCT c.id, c.course_code, c.course_name, c.description, c.units,
               c.course_type, c.is_active
        FROM courses c
        JOIN offered_courses oc ON oc.course_id = c.id
        WHERE oc.teacher_id = ?1
        ORDER BY c.course_code
        "#,
    )
    .bind(teacher_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_offered_courses_by_teacher(
    db: impl SqliteExecutor<'_>,
    teacher_id: &str,
) -> Result<Vec<OfferedCourse>, sqlx::Error> {
    sqlx::query_as::<_, OfferedCourse>(
        r#"
        SELECT id, course_id, teacher_id, semester, school_year, section
        FROM offered_courses
        WHERE teacher_id = ?1
        ORDER BY school_year DESC, semester, section
        "#,
    )
    .bind(teacher_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_offered_courses_by_course(
    db: impl SqliteExecutor<'_>,
    course_id: &str,
) -> Result<Vec<OfferedCourse>, sqlx::Error> {
    sqlx::query_as::<_, OfferedCourse>(
        r#"
        SELECT id, course_id, teacher_id, semester, school_year, section
        FROM offered_courses
        WHERE course_id = ?1
        ORDER BY school_year DESC, semester, section
        "#,
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn update_offered_course(
    db: impl SqliteExecutor<'_>,
    offered: &OfferedCourse,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE offered_courses
        SET course_id = ?1,
            teacher_id = ?2,
            semester = ?3,
            school_year = ?4,
            section = ?5
        WHERE id = ?6
        "#,
    )
    .bind(&offered.course_id)
    .bind(&offered.teacher_id)
    .bind(&offered.semester)
    .bind(&offered.school_year)
    .bind(&offered.section)
    .bind(&offered.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn delete_offered_course(db: impl SqliteExecutor<'_>, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM offered_courses WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn count_schedules_for_offering(
    db: impl SqliteExecutor<'_>,
    offered_course_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM class_schedules WHERE offered_course_id = ?1")
        .bind(offered_course_id)
        .fetch_one(db)
        .await
}
