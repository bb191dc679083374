use sqlx::SqliteExecutor;

use crate::models::{EnrolledStudent, Enrollment, EnrollmentStatus, Student, Teacher};

pub async fn insert_student(db: impl SqliteExecutor<'_>, student: &Student) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO students
            (id, student_number, first_name, last_name, email, year_level, section)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&student.id)
    .bind(&student.student_number)
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(&student.email)
    .bind(student.year_level)
    .bind(&student.section)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn fetch_students(db: impl SqliteExecutor<'_>) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        r#"
        SELECT id, student_number, first_name, last_name, email, year_level, section
        FROM students
        ORDER BY last_name, first_name
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn find_student_by_id(db: impl SqliteExecutor<'_>, id: &str) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, student_number, first_name, last_name, email, year_level, section FROM students WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_student(db: impl SqliteExecutor<'_>, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn count_students(db: impl SqliteExecutor<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(db)
        .await
}

pub async fn insert_teacher(db: impl SqliteExecutor<'_>, teacher: &Teacher) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO teachers (id, first_name, last_name, email, department_id)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&teacher.id)
    .bind(&teacher.first_name)
    .bind(&teacher.last_name)
    .bind(&teacher.email)
    .bind(&teacher.department_id)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn fetch_teachers(db: impl SqliteExecutor<'_>) -> Result<Vec<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(
        "SELECT id, first_name, last_name, email, department_id FROM teachers ORDER BY last_name, first_name",
    )
    .fetch_all(db)
    .await
}

pub async fn find_teacher_by_id(db: impl SqliteExecutor<'_>, id: &str) -> Result<Option<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(
        "SELECT id, first_name, last_name, email, department_id FROM teachers WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_teacher(db: impl SqliteExecutor<'_>, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM teachers WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn count_teachers(db: impl SqliteExecutor<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
        .fetch_one(db)
        .await
}

/// Offered courses plus attendance sessions owned by the teacher.
pub async fn count_teacher_references(
    db: impl SqliteExecutor<'_>,
    teacher_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT (SELECT COUNT(*) FROM offered_courses WHERE teacher_id = ?1)
             + (SELECT COUNT(*) FROM attendance_sessions WHERE teacher_id = ?1)
        "#,
    )
    .bind(teacher_id)
    .fetch_one(db)
    .await
}

pub async fn insert_enrollment(
    db: impl SqliteExecutor<'_>,
    enrollment: &Enrollment,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO enrollments (id, student_id, course_id, status, date_enrolled, academic_year)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&enrollment.id)
    .bind(&enrollment.student_id)
    .bind(&enrollment.course_id)
    .bind(enrollment.status)
    .bind(enrollment.date_enrolled)
    .bind(&enrollment.academic_year)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn enrollment_exists(
    db: impl SqliteExecutor<'_>,
    student_id: &str,
    course_id: &str,
) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(db)
    .await?;

    Ok(count > 0)
}

pub async fn fetch_enrollments_by_course(
    db: impl SqliteExecutor<'_>,
    course_id: &str,
) -> Result<Vec<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        r#"
        SELECT id, student_id, course_id, status, date_enrolled, academic_year
        FROM enrollments
        WHERE course_id = ?1
        ORDER BY rowid
        "#,
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_enrollments_by_student(
    db: impl SqliteExecutor<'_>,
    student_id: &str,
) -> Result<Vec<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        r#"
        SELECT id, student_id, course_id, status, date_enrolled, academic_year
        FROM enrollments
        WHERE student_id = ?1
        ORDER BY rowid
        "#,
    )
    .bind(student_id)
    .fetch_all(db)
    .await
}

pub async fn count_enrollments_by_student(
    db: impl SqliteExecutor<'_>,
    student_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments WHERE student_id = ?1")
        .bind(student_id)
        .fetch_one(db)
        .await
}

pub async fn fetch_enrolled_students(
    db: impl SqliteExecutor<'_>,
    course_id: &str,
) -> Result<Vec<EnrolledStudent>, sqlx::Error> {
    sqlx::query_as::<_, EnrolledStudent>(
        r#"
        SELECT st.id AS student_id,
               st.first_name || ' ' || st.last_name AS student_name,
               st.email,
               st.year_level,
               st.section,
               e.status AS enrollment_status
        FROM enrollments e
        JOIN students st ON st.id = e.student_id
        WHERE e.course_id = ?1 AND e.status = 'ENROLLED'
        ORDER BY st.last_name, st.first_name
        "#,
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn delete_enrollment(db: impl SqliteExecutor<'_>, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM enrollments WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn find_enrollment_by_id(
    db: impl SqliteExecutor<'_>,
    id: &str,
) -> Result<Option<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        "SELECT id, student_id, course_id, status, date_enrolled, academic_year FROM enrollments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn update_enrollment_status(
    db: impl SqliteExecutor<'_>,
    id: &str,
    status: EnrollmentStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE enrollments SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
