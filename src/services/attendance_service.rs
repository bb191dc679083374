use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db::{self, attendance, catalog, people, sessions};
use crate::error::AppError;
use crate::models::{
    Attendance, AttendanceResponse, AttendanceSession, AttendanceStatus, MarkAttendanceRequest,
};

/// Resolves which session a mark belongs to and upserts the single attendance
/// row for that student.
pub struct AttendanceService {
    db: SqlitePool,
}

impl AttendanceService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn mark_attendance(&self, req: MarkAttendanceRequest) -> Result<AttendanceResponse, AppError> {
        let status: AttendanceStatus = req.status.parse()?;

        let mut tx = db::begin_write(&self.db).await?;

        let existing = match req.session_id.as_deref() {
            Some(session_id) => {
                attendance::find_by_student_and_session(&mut *tx, &req.student_id, session_id).await?
            }
            None => {
                attendance::find_by_student_course_date(&mut *tx, &req.student_id, &req.course_id, req.date)
                    .await?
            }
        };

        let id = match existing {
            Some(mut row) => {
                if let Some(session_id) = row.session_id.as_deref() {
                    // A dangling session id is treated as no session at all.
                    if let Some(session) = sessions::find_session_by_id(&mut *tx, session_id).await? {
                        session.ensure_course(&req.course_id)?;
                        session.ensure_open()?;
                    }
                }

                row.status = status;
                row.remarks = req.remarks;
                if req.time_in.is_some() {
                    row.time_in = req.time_in;
                }
                if req.recorded_by.is_some() {
                    row.recorded_by = req.recorded_by;
                }
                attendance::update_attendance(&mut *tx, &row).await?;
                debug!("updated attendance {} for student {}", row.id, row.student_id);
                row.id
            }
            None => {
                if people::find_student_by_id(&mut *tx, &req.student_id).await?.is_none() {
                    return Err(AppError::not_found("student", &req.student_id));
                }
                if catalog::find_course_by_id(&mut *tx, &req.course_id).await?.is_none() {
                    return Err(AppError::not_found("course", &req.course_id));
                }

                let session = resolve_session(&mut tx, &req.course_id, req.session_id.as_deref(), req.date).await?;
                session.ensure_open()?;

                let row = Attendance {
                    id: Uuid::new_v4().to_string(),
                    student_id: req.student_id,
                    course_id: req.course_id,
                    session_id: Some(session.id),
                    date: req.date,
                    time_in: req.time_in,
                    status,
                    remarks: req.remarks,
                    recorded_by: req.recorded_by,
                };
                attendance::insert_attendance(&mut *tx, &row).await?;
                debug!("recorded attendance {} for student {}", row.id, row.student_id);
                row.id
            }
        };

        let record = attendance::find_record_by_id(&mut *tx, &id)
            .await?
            .ok_or_else(|| AppError::not_found("attendance", &id))?;
        tx.commit().await?;

        Ok(AttendanceResponse::from(record))
    }

    pub async fn get_by_session(&self, session_id: &str) -> Result<Vec<AttendanceResponse>, AppError> {
        let records = attendance::fetch_records_by_session(&self.db, session_id).await?;
        Ok(records.into_iter().map(AttendanceResponse::from).collect())
    }

    pub async fn get_by_course_and_date(
        &self,
        course_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceResponse>, AppError> {
        let records = attendance::fetch_records_by_course_and_date(&self.db, course_id, date).await?;
        Ok(records.into_iter().map(AttendanceResponse::from).collect())
    }

    pub async fn get_by_course(&self, course_id: &str) -> Result<Vec<AttendanceResponse>, AppError> {
        let records = attendance::fetch_records_by_course(&self.db, course_id).await?;
        Ok(records.into_iter().map(AttendanceResponse::from).collect())
    }

    /// The course's rows narrowed to one student.
    pub async fn get_by_student_and_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Vec<AttendanceResponse>, AppError> {
        let records = attendance::fetch_records_by_course(&self.db, course_id).await?;
        Ok(records
            .into_iter()
            .filter(|r| r.student_id == student_id)
            .map(AttendanceResponse::from)
            .collect())
    }
}

/// The explicit session when one is named, otherwise the first session held
/// for the course on that date. Sessions are never created here.
async fn resolve_session(
    conn: &mut SqliteConnection,
    course_id: &str,
    session_id: Option<&str>,
    date: NaiveDate,
) -> Result<AttendanceSession, AppError> {
    if let Some(session_id) = session_id {
        let session = sessions::find_session_by_id(&mut *conn, session_id)
            .await?
            .ok_or_else(|| AppError::not_found("attendance session", session_id))?;
        if let Err(err) = session.ensure_course(course_id) {
            warn!("{}", err);
            return Err(err);
        }
        return Ok(session);
    }

    let mut candidates = sessions::fetch_sessions_by_course_and_date(&mut *conn, course_id, date).await?;
    if candidates.is_empty() {
        warn!("no session for course {} on {}; refusing to record attendance", course_id, date);
        return Err(AppError::MissingSession {
            course_id: course_id.to_string(),
            date,
        });
    }
    if candidates.len() > 1 {
        info!(
            "{} sessions for course {} on {}; attaching the earliest",
            candidates.len(),
            course_id,
            date
        );
    }
    Ok(candidates.swap_remove(0))
}
