use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::db::{self, attendance, catalog, people, schedules, sessions};
use crate::error::AppError;
use crate::models::{AttendanceSession, SessionRequest};

pub struct SessionService {
    db: SqlitePool,
}

impl SessionService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_session(&self, req: SessionRequest) -> Result<AttendanceSession, AppError> {
        req.validate()?;

        let mut conn = self.db.acquire().await?;
        ensure_references(&mut conn, &req).await?;

        let session = req.into_session(Uuid::new_v4().to_string());
        sessions::insert_session(&mut *conn, &session).await?;

        info!(
            "created session {} for course {} on {}",
            session.id, session.course_id, session.date
        );
        Ok(session)
    }

    pub async fn get_session(&self, id: &str) -> Result<AttendanceSession, AppError> {
        sessions::find_session_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("attendance session", id))
    }

    pub async fn list_sessions(&self) -> Result<Vec<AttendanceSession>, AppError> {
        Ok(sessions::fetch_sessions(&self.db).await?)
    }

    pub async fn list_by_course(&self, course_id: &str) -> Result<Vec<AttendanceSession>, AppError> {
        Ok(sessions::fetch_sessions_by_course(&self.db, course_id).await?)
    }

    pub async fn list_by_teacher(&self, teacher_id: &str) -> Result<Vec<AttendanceSession>, AppError> {
        Ok(sessions::fetch_sessions_by_teacher(&self.db, teacher_id).await?)
    }

    pub async fn list_by_course_and_date(
        &self,
        course_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceSession>, AppError> {
        Ok(sessions::fetch_sessions_by_course_and_date(&self.db, course_id, date).await?)
    }

    /// Replaces every editable field. Finalized sessions may still be edited
    /// (and reopened); only attendance writes are locked.
    pub async fn update_session(&self, id: &str, req: SessionRequest) -> Result<AttendanceSession, AppError> {
        req.validate()?;

        let mut tx = db::begin_write(&self.db).await?;
        if sessions::find_session_by_id(&mut *tx, id).await?.is_none() {
            return Err(AppError::not_found("attendance session", id));
        }
        ensure_references(&mut tx, &req).await?;

        let session = req.into_session(id.to_string());
        sessions::update_session(&mut *tx, &session).await?;
        tx.commit().await?;

        info!("updated session {} (finalized: {})", session.id, session.is_finalized);
        Ok(session)
    }

    /// Removes the session's attendance rows, then the session, in one transaction.
    pub async fn delete_session(&self, id: &str) -> Result<(), AppError> {
        let mut tx = db::begin_write(&self.db).await?;
        if sessions::find_session_by_id(&mut *tx, id).await?.is_none() {
            return Err(AppError::not_found("attendance session", id));
        }

        let removed = attendance::delete_by_session(&mut *tx, id).await?;
        sessions::delete_session(&mut *tx, id).await?;
        tx.commit().await?;

        info!("deleted session {} and {} attendance row(s)", id, removed);
        Ok(())
    }
}

async fn ensure_references(conn: &mut SqliteConnection, req: &SessionRequest) -> Result<(), AppError> {
    if catalog::find_course_by_id(&mut *conn, &req.course_id).await?.is_none() {
        return Err(AppError::not_found("course", &req.course_id));
    }
    if people::find_teacher_by_id(&mut *conn, &req.teacher_id).await?.is_none() {
        return Err(AppError::not_found("teacher", &req.teacher_id));
    }
    if let Some(schedule_id) = req.schedule_id.as_deref() {
        if schedules::find_schedule_by_id(&mut *conn, schedule_id).await?.is_none() {
            return Err(AppError::not_found("schedule", schedule_id));
        }
    }
    Ok(())
}
