use chrono::NaiveDate;
use sqlx::SqliteExecutor;

use crate::models::{Attendance, AttendanceRecord};

// Joined read model. The session is LEFT JOINed so an attendance row whose
// session has vanished reads back with `session_id = NULL`.
macro_rules! record_query {
    ($tail:literal) => {
        concat!(
            r#"
            SELECT a.id,
                   a.student_id,
                   st.first_name || ' ' || st.last_name AS student_name,
                   a.course_id,
                   c.course_code,
                   c.course_name,
                   s.id AS session_id,
                   a.date,
                   a.time_in,
                   a.status,
                   a.remarks,
                   a.recorded_by
            FROM attendance a
            JOIN students st ON st.id = a.student_id
            JOIN courses c ON c.id = a.course_id
            LEFT JOIN attendance_sessions s ON s.id = a.session_id
            "#,
            $tail
        )
    };
}

pub async fn insert_attendance(
    db: impl SqliteExecutor<'_>,
    attendance: &Attendance,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO attendance
            (id, student_id, course_id, session_id, date, time_in, status, remarks, recorded_by)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(&attendance.id)
    .bind(&attendance.student_id)
    .bind(&attendance.course_id)
    .bind(&attendance.session_id)
    .bind(attendance.date)
    .bind(attendance.time_in)
    .bind(attendance.status)
    .bind(&attendance.remarks)
    .bind(&attendance.recorded_by)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn update_attendance(
    db: impl SqliteExecutor<'_>,
    attendance: &Attendance,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET time_in = ?1,
            status = ?2,
            remarks = ?3,
            recorded_by = ?4
        WHERE id = ?5
        "#,
    )
    .bind(attendance.time_in)
    .bind(attendance.status)
    .bind(&attendance.remarks)
    .bind(&attendance.recorded_by)
    .bind(&attendance.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn find_by_student_and_session(
    db: impl SqliteExecutor<'_>,
    student_id: &str,
    session_id: &str,
) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, student_id, course_id, session_id, date, time_in, status, remarks, recorded_by
        FROM attendance
        WHERE student_id = ?1 AND session_id = ?2
        "#,
    )
    .bind(student_id)
    .bind(session_id)
    .fetch_optional(db)
    .await
}

/// First row (insertion order) for the student in that course on that date,
/// whether or not it is attached to a session.
pub async fn find_by_student_course_date(
    db: impl SqliteExecutor<'_>,
    student_id: &str,
    course_id: &str,
    date: NaiveDate,
) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, student_id, course_id, session_id, date, time_in, status, remarks, recorded_by
        FROM attendance
        WHERE student_id = ?1 AND course_id = ?2 AND date = ?3
        ORDER BY rowid
        LIMIT 1
        "#,
    )
    .bind(student_id)
    .bind(course_id)
    .bind(date)
    .fetch_optional(db)
    .await
}

pub async fn find_record_by_id(
    db: impl SqliteExecutor<'_>,
    id: &str,
) -> Result<Option<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(record_query!("WHERE a.id = ?1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Empty once the session row itself is gone.
pub async fn fetch_records_by_session(
    db: impl SqliteExecutor<'_>,
    session_id: &str,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(record_query!(
        "WHERE s.id = ?1 ORDER BY st.last_name, st.first_name"
    ))
    .bind(session_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_records_by_course_and_date(
    db: impl SqliteExecutor<'_>,
    course_id: &str,
    date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(record_query!(
        "WHERE a.course_id = ?1 AND a.date = ?2 ORDER BY a.rowid"
    ))
    .bind(course_id)
    .bind(date)
    .fetch_all(db)
    .await
}

pub async fn fetch_records_by_course(
    db: impl SqliteExecutor<'_>,
    course_id: &str,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(record_query!(
        "WHERE a.course_id = ?1 ORDER BY a.rowid"
    ))
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_records_by_student(
    db: impl SqliteExecutor<'_>,
    student_id: &str,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(record_query!(
        "WHERE a.student_id = ?1 ORDER BY a.rowid"
    ))
    .bind(student_id)
    .fetch_all(db)
    .await
}

/// Inclusive on both ends.
pub async fn fetch_records_between(
    db: impl SqliteExecutor<'_>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(record_query!(
        "WHERE a.date BETWEEN ?1 AND ?2 ORDER BY a.date, a.rowid"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
}

pub async fn delete_by_session(
    db: impl SqliteExecutor<'_>,
    session_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM attendance WHERE session_id = ?1")
        .bind(session_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

pub async fn count_by_student(db: impl SqliteExecutor<'_>, student_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance WHERE student_id = ?1")
        .bind(student_id)
        .fetch_one(db)
        .await
}

pub async fn count_by_course(db: impl SqliteExecutor<'_>, course_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance WHERE course_id = ?1")
        .bind(course_id)
        .fetch_one(db)
        .await
}
