use chrono::Local;
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{self, catalog, people};
use crate::error::AppError;
use crate::models::{
    EnrolledStudent, Enrollment, EnrollmentRequest, EnrollmentStatus, UpdateEnrollmentRequest,
};

pub struct EnrollmentService {
    db: SqlitePool,
}

impl EnrollmentService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn enroll(&self, req: EnrollmentRequest) -> Result<Enrollment, AppError> {
        let mut tx = db::begin_write(&self.db).await?;

        if people::find_student_by_id(&mut *tx, &req.student_id).await?.is_none() {
            return Err(AppError::not_found("student", &req.student_id));
        }
        if catalog::find_course_by_id(&mut *tx, &req.course_id).await?.is_none() {
            return Err(AppError::not_found("course", &req.course_id));
        }
        if people::enrollment_exists(&mut *tx, &req.student_id, &req.course_id).await? {
            warn!("student {} already enrolled in course {}", req.student_id, req.course_id);
            return Err(AppError::AlreadyEnrolled);
        }

        let enrollment = Enrollment {
            id: Uuid::new_v4().to_string(),
            student_id: req.student_id,
            course_id: req.course_id,
            status: EnrollmentStatus::Enrolled,
            date_enrolled: Local::now().date_naive(),
            academic_year: req.academic_year,
        };
        people::insert_enrollment(&mut *tx, &enrollment).await?;
        tx.commit().await?;

        info!("enrolled student {} in course {}", enrollment.student_id, enrollment.course_id);
        Ok(enrollment)
    }

    pub async fn list_by_course(&self, course_id: &str) -> Result<Vec<Enrollment>, AppError> {
        Ok(people::fetch_enrollments_by_course(&self.db, course_id).await?)
    }

    pub async fn list_by_student(&self, student_id: &str) -> Result<Vec<Enrollment>, AppError> {
        Ok(people::fetch_enrollments_by_student(&self.db, student_id).await?)
    }

    /// Roster of students currently enrolled (dropped and completed rows excluded).
    pub async fn enrolled_students(&self, course_id: &str) -> Result<Vec<EnrolledStudent>, AppError> {
        Ok(people::fetch_enrolled_students(&self.db, course_id).await?)
    }

    /// Moves an enrollment between ENROLLED, DROPPED and COMPLETED. Only
    /// ENROLLED rows appear on the course roster.
    pub async fn update_status(&self, id: &str, req: UpdateEnrollmentRequest) -> Result<Enrollment, AppError> {
        let mut tx = db::begin_write(&self.db).await?;
        let mut enrollment = people::find_enrollment_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::not_found("enrollment", id))?;

        people::update_enrollment_status(&mut *tx, id, req.status).await?;
        tx.commit().await?;

        info!("enrollment {} moved from {:?} to {:?}", id, enrollment.status, req.status);
        enrollment.status = req.status;
        Ok(enrollment)
    }

    pub async fn delete_enrollment(&self, id: &str) -> Result<(), AppError> {
        if !people::delete_enrollment(&self.db, id).await? {
            return Err(AppError::not_found("enrollment", id));
        }
        Ok(())
    }
}
