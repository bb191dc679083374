use chrono::NaiveTime;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{self, catalog, schedules};
use crate::error::AppError;
use crate::models::{ClassSchedule, ConflictQuery, DayOfWeek, ScheduleRequest};

/// Keeps classroom bookings free of double-booking.
pub struct ScheduleService {
    db: SqlitePool,
}

impl ScheduleService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn check_conflicts(&self, query: &ConflictQuery) -> Result<Vec<ClassSchedule>, AppError> {
        let mut conn = self.db.acquire().await?;
        find_conflicts(
            &mut conn,
            &query.classroom_id,
            query.day_of_week,
            query.start_time,
            query.end_time,
            query.exclude_schedule_id.as_deref(),
        )
        .await
    }

    pub async fn create_schedule(&self, req: ScheduleRequest) -> Result<ClassSchedule, AppError> {
        req.validate()?;

        let mut tx = db::begin_write(&self.db).await?;
        ensure_references(&mut tx, &req).await?;

        let conflicts = find_conflicts(
            &mut tx,
            &req.classroom_id,
            req.day_of_week,
            req.start_time,
            req.end_time,
            None,
        )
        .await?;
        if !conflicts.is_empty() {
            return Err(conflict_error(&req, conflicts));
        }

        let schedule = ClassSchedule {
            id: Uuid::new_v4().to_string(),
            offered_course_id: req.offered_course_id,
            classroom_id: req.classroom_id,
            day_of_week: req.day_of_week,
            start_time: req.start_time,
            end_time: req.end_time,
            is_active: req.is_active,
        };
        schedules::insert_schedule(&mut *tx, &schedule).await?;
        tx.commit().await?;

        info!(
            "created schedule {} in classroom {} on {} {}-{}",
            schedule.id, schedule.classroom_id, schedule.day_of_week, schedule.start_time, schedule.end_time
        );
        Ok(schedule)
    }

    pub async fn update_schedule(&self, id: &str, req: ScheduleRequest) -> Result<ClassSchedule, AppError> {
        req.validate()?;

        let mut tx = db::begin_write(&self.db).await?;
        let mut current = schedules::find_schedule_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::not_found("schedule", id))?;
        ensure_references(&mut tx, &req).await?;

        if current.needs_recheck(&req) {
            let conflicts = find_conflicts(
                &mut tx,
                &req.classroom_id,
                req.day_of_week,
                req.start_time,
                req.end_time,
                Some(id),
            )
            .await?;
            if !conflicts.is_empty() {
                return Err(conflict_error(&req, conflicts));
            }
        }

        current.offered_course_id = req.offered_course_id;
        current.classroom_id = req.classroom_id;
        current.day_of_week = req.day_of_week;
        current.start_time = req.start_time;
        current.end_time = req.end_time;
        current.is_active = req.is_active;

        schedules::update_schedule(&mut *tx, &current).await?;
        tx.commit().await?;

        info!("updated schedule {}", current.id);
        Ok(current)
    }

    /// Idempotent for schedules that are already inactive.
    pub async fn deactivate_schedule(&self, id: &str) -> Result<(), AppError> {
        if !schedules::deactivate_schedule(&self.db, id).await? {
            return Err(AppError::not_found("schedule", id));
        }
        info!("deactivated schedule {}", id);
        Ok(())
    }

    pub async fn delete_schedule(&self, id: &str) -> Result<(), AppError> {
        if !schedules::delete_schedule(&self.db, id).await? {
            return Err(AppError::not_found("schedule", id));
        }
        info!("deleted schedule {}", id);
        Ok(())
    }

    pub async fn get_schedule(&self, id: &str) -> Result<ClassSchedule, AppError> {
        schedules::find_schedule_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("schedule", id))
    }

    pub async fn list_schedules(&self, active_only: bool) -> Result<Vec<ClassSchedule>, AppError> {
        Ok(schedules::fetch_schedules(&self.db, active_only).await?)
    }

    pub async fn list_by_day(&self, day: DayOfWeek) -> Result<Vec<ClassSchedule>, AppError> {
        Ok(schedules::fetch_schedules_by_day(&self.db, day).await?)
    }

    pub async fn list_by_course(&self, course_id: &str) -> Result<Vec<ClassSchedule>, AppError> {
        Ok(schedules::fetch_schedules_by_course(&self.db, course_id).await?)
    }
}

/// Active bookings in the room on that weekday whose interval overlaps
/// `[start, end)`, minus `exclude` if given.
pub async fn find_conflicts(
    conn: &mut SqliteConnection,
    classroom_id: &str,
    day: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
    exclude: Option<&str>,
) -> Result<Vec<ClassSchedule>, AppError> {
    let booked = schedules::fetch_active_in_room(&mut *conn, classroom_id, day).await?;
    Ok(filter_conflicts(booked, start, end, exclude))
}

fn filter_conflicts(
    booked: Vec<ClassSchedule>,
    start: NaiveTime,
    end: NaiveTime,
    exclude: Option<&str>,
) -> Vec<ClassSchedule> {
    booked
        .into_iter()
        .filter(|s| s.is_active)
        .filter(|s| exclude != Some(s.id.as_str()))
        .filter(|s| s.overlaps(start, end))
        .collect()
}

async fn ensure_references(conn: &mut SqliteConnection, req: &ScheduleRequest) -> Result<(), AppError> {
    if catalog::find_classroom_by_id(&mut *conn, &req.classroom_id).await?.is_none() {
        return Err(AppError::not_found("classroom", &req.classroom_id));
    }
    if catalog::find_offered_course_by_id(&mut *conn, &req.offered_course_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("offered course", &req.offered_course_id));
    }
    Ok(())
}

fn conflict_error(req: &ScheduleRequest, conflicts: Vec<ClassSchedule>) -> AppError {
    warn!(
        "schedule conflict in classroom {} on {} {}-{}: {} overlapping booking(s)",
        req.classroom_id,
        req.day_of_week,
        req.start_time,
        req.end_time,
        conflicts.len()
    );
    AppError::ScheduleConflict(conflicts.into_iter().map(|s| s.id).collect())
}
