use sqlx::SqliteExecutor;

use crate::models::{ClassSchedule, DayOfWeek};

pub async fn insert_schedule(
    db: impl SqliteExecutor<'_>,
    schedule: &ClassSchedule,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO class_schedules
            (id, offered_course_id, classroom_id, day_of_week, start_time, end_time, is_active)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&schedule.id)
    .bind(&schedule.offered_course_id)
    .bind(&schedule.classroom_id)
    .bind(schedule.day_of_week)
    .bind(schedule.start_time)
    .bind(schedule.end_time)
    .bind(schedule.is_active)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn find_schedule_by_id(
    db: impl SqliteExecutor<'_>,
    id: &str,
) -> Result<Option<ClassSchedule>, sqlx::Error> {
    sqlx::query_as::<_, ClassSchedule>(
        "SELECT id, offered_course_id, classroom_id, day_of_week, start_time, end_time, is_active FROM class_schedules WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn fetch_schedules(
    db: impl SqliteExecutor<'_>,
    active_only: bool,
) -> Result<Vec<ClassSchedule>, sqlx::Error> {
    sqlx::query_as::<_, ClassSchedule>(
        r#"
        SELECT id, offered_course_id, classroom_id, day_of_week, start_time, end_time, is_active
        FROM class_schedules
        WHERE (?1 = 0 OR is_active = 1)
        -- Calendar order, not the alphabetical order of the stored names.
        ORDER BY CASE day_of_week
                     WHEN 'MONDAY' THEN 1 WHEN 'TUESDAY' THEN 2 WHEN 'WEDNESDAY' THEN 3
                     WHEN 'THURSDAY' THEN 4 WHEN 'FRIDAY' THEN 5 WHEN 'SATURDAY' THEN 6
                     ELSE 7
                 END,
                 start_time
        "#,
    )
    .bind(active_only)
    .fetch_all(db)
    .await
}

pub async fn fetch_schedules_by_day(
    db: impl SqliteExecutor<'_>,
    day: DayOfWeek,
) -> Result<Vec<ClassSchedule>, sqlx::Error> {
    sqlx::query_as::<_, ClassSchedule>(
        r#"
        SELECT id, offered_course_id, classroom_id, day_of_week, start_time, end_time, is_active
        FROM class_schedules
        WHERE day_of_week = ?1
        ORDER BY start_time
        "#,
    )
    .bind(day)
    .fetch_all(db)
    .await
}

pub async fn fetch_schedules_by_course(
    db: impl SqliteExecutor<'_>,
    course_id: &str,
) -> Result<Vec<ClassSchedule>, sqlx::Error> {
    sqlx::query_as::<_, ClassSchedule>(
        r#"
        SELECT cs.id, cs.offered_course_id, cs.classroom_id, cs.day_of_week,
               cs.start_time, cs.end_time, cs.is_active
        FROM class_schedules cs
        JOIN offered_courses oc ON oc.id = cs.offered_course_id
        WHERE oc.course_id = ?1
        ORDER BY CASE cs.day_of_week
                     WHEN 'MONDAY' THEN 1 WHEN 'TUESDAY' THEN 2 WHEN 'WEDNESDAY' THEN 3
                     WHEN 'THURSDAY' THEN 4 WHEN 'FRIDAY' THEN 5 WHEN 'SATURDAY' THEN 6
                     ELSE 7
                 END,
                 cs.start_time
        "#,
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

/// Active bookings of one classroom on one weekday; the interval test is left
/// to the caller.
pub async fn fetch_active_in_room(
    db: impl SqliteExecutor<'_>,
    classroom_id: &str,
    day: DayOfWeek,
) -> Result<Vec<ClassSchedule>, sqlx::Error> {
    sqlx::query_as::<_, ClassSchedule>(
        r#"
        SELECT id, offered_course_id, classroom_id, day_of_week, start_time, end_time, is_active
        FROM class_schedules
        WHERE classroom_id = ?1
          AND day_of_week = ?2
          AND is_active = 1
        ORDER BY start_time
        "#,
    )
    .bind(classroom_id)
    .bind(day)
    .fetch_all(db)
    .await
}

pub async fn update_schedule(
    db: impl SqliteExecutor<'_>,
    schedule: &ClassSchedule,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE class_schedules
        SET offered_course_id = ?1,
            classroom_id = ?2,
            day_of_week = ?3,
            start_time = ?4,
            end_time = ?5,
            is_active = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&schedule.offered_course_id)
    .bind(&schedule.classroom_id)
    .bind(schedule.day_of_week)
    .bind(schedule.start_time)
    .bind(schedule.end_time)
    .bind(schedule.is_active)
    .bind(&schedule.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn deactivate_schedule(db: impl SqliteExecutor<'_>, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE class_schedules SET is_active = 0 WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn delete_schedule(db: impl SqliteExecutor<'_>, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM class_schedules WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
