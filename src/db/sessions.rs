use chrono::NaiveDate;
use sqlx::SqliteExecutor;

use crate::models::AttendanceSession;

pub async fn insert_session(
    db: impl SqliteExecutor<'_>,
    session: &AttendanceSession,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO attendance_sessions
            (id, course_id, teacher_id, schedule_id, date, start_time, end_time,
            session_type, is_finalized, remarks)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
    )
    .bind(&session.id)
    .bind(&session.course_id)
    .bind(&session.teacher_id)
    .bind(&session.schedule_id)
    .bind(session.date)
    .bind(session.start_time)
    .bind(session.end_time)
    .bind(&session.session_type)
    .bind(session.is_finalized)
    .bind(&session.remarks)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn find_session_by_id(
    db: impl SqliteExecutor<'_>,
    id: &str,
) -> Result<Option<AttendanceSession>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceSession>(
        "SELECT id, course_id, teacher_id, schedule_id, date, start_time, end_time, session_type, is_finalized, remarks FROM attendance_sessions WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn fetch_sessions(db: impl SqliteExecutor<'_>) -> Result<Vec<AttendanceSession>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceSession>(
        r#"
        SELECT id, course_id, teacher_id, schedule_id, date, start_time, end_time,
               session_type, is_finalized, remarks
        FROM attendance_sessions
        ORDER BY date DESC, rowid
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_sessions_by_course(
    db: impl SqliteExecutor<'_>,
    course_id: &str,
) -> Result<Vec<AttendanceSession>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceSession>(
        r#"
        SELECT id, course_id, teacher_id, schedule_id, date, start_time, end_time,
               session_type, is_finalized, remarks
        FROM attendance_sessions
        WHERE course_id = ?1
        ORDER BY date DESC, rowid
        "#,
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_sessions_by_teacher(
    db: impl SqliteExecutor<'_>,
    teacher_id: &str,
) -> Result<Vec<AttendanceSession>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceSession>(
        r#"
        SELECT id, course_id, teacher_id, schedule_id, date, start_time, end_time,
               session_type, is_finalized, remarks
        FROM attendance_sessions
        WHERE teacher_id = ?1
        ORDER BY date DESC, rowid
        "#,
    )
    .bind(teacher_id)
    .fetch_all(db)
    .await
}

/// Sessions of a course on one date, in insertion order.
pub async fn fetch_sessions_by_course_and_date(
    db: impl SqliteExecutor<'_>,
    course_id: &str,
    date: NaiveDate,
) -> Result<Vec<AttendanceSession>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceSession>(
        r#"
        SELECT id, course_id, teacher_id, schedule_id, date, start_time, end_time,
               session_type, is_finalized, remarks
        FROM attendance_sessions
        WHERE course_id = ?1 AND date = ?2
        ORDER BY rowid
        "#,
    )
    .bind(course_id)
    .bind(date)
    .fetch_all(db)
    .await
}

pub async fn update_session(
    db: impl SqliteExecutor<'_>,
    session: &AttendanceSession,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE attendance_sessions
        SET course_id = ?1,
            teacher_id = ?2,
            schedule_id = ?3,
            date = ?4,
            start_time = ?5,
            end_time = ?6,
            session_type = ?7,
            is_finalized = ?8,
            remarks = ?9
        WHERE id = ?10
        "#,
    )
    .bind(&session.course_id)
    .bind(&session.teacher_id)
    .bind(&session.schedule_id)
    .bind(session.date)
    .bind(session.start_time)
    .bind(session.end_time)
    .bind(&session.session_type)
    .bind(session.is_finalized)
    .bind(&session.remarks)
    .bind(&session.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn delete_session(db: impl SqliteExecutor<'_>, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM attendance_sessions WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
