use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{self, attendance, catalog, people};
use crate::error::AppError;
use crate::models::{NewStudentRequest, NewTeacherRequest, Student, Teacher};

pub struct PeopleService {
    db: SqlitePool,
}

impl PeopleService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_student(&self, req: NewStudentRequest) -> Result<Student, AppError> {
        let student = Student {
            id: Uuid::new_v4().to_string(),
            student_number: req.student_number,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            year_level: req.year_level,
            section: req.section,
        };
        people::insert_student(&self.db, &student).await?;
        info!("created student {} ({})", student.id, student.student_number);
        Ok(student)
    }

    pub async fn get_student(&self, id: &str) -> Result<Student, AppError> {
        people::find_student_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("student", id))
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        Ok(people::fetch_students(&self.db).await?)
    }

    /// Refused while the student still has enrollments or attendance.
    pub async fn delete_student(&self, id: &str) -> Result<(), AppError> {
        let mut tx = db::begin_write(&self.db).await?;
        if people::find_student_by_id(&mut *tx, id).await?.is_none() {
            return Err(AppError::not_found("student", id));
        }

        let enrollments = people::count_enrollments_by_student(&mut *tx, id).await?;
        if enrollments > 0 {
            warn!("refusing to delete student {}: {} enrollment(s)", id, enrollments);
            return Err(AppError::DependencyExists(format!(
                "student {} has {} enrollment(s)",
                id, enrollments
            )));
        }
        let records = attendance::count_by_student(&mut *tx, id).await?;
        if records > 0 {
            warn!("refusing to delete student {}: {} attendance record(s)", id, records);
            return Err(AppError::DependencyExists(format!(
                "student {} has {} attendance record(s)",
                id, records
            )));
        }

        people::delete_student(&mut *tx, id).await?;
        tx.commit().await?;
        info!("deleted student {}", id);
        Ok(())
    }

    pub async fn create_teacher(&self, req: NewTeacherRequest) -> Result<Teacher, AppError> {
        if let Some(department_id) = req.department_id.as_deref() {
            if catalog::find_department_by_id(&self.db, department_id).await?.is_none() {
                return Err(AppError::not_found("department", department_id));
            }
        }

        let teacher = Teacher {
            id: Uuid::new_v4().to_string(),
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            department_id: req.department_id,
        };
        people::insert_teacher(&self.db, &teacher).await?;
        info!("created teacher {}", teacher.id);
        Ok(teacher)
    }

    pub async fn get_teacher(&self, id: &str) -> Result<Teacher, AppError> {
        people::find_teacher_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("teacher", id))
    }

    pub async fn list_teachers(&self) -> Result<Vec<Teacher>, AppError> {
        Ok(people::fetch_teachers(&self.db).await?)
    }

    /// Refused while the teacher still owns offered courses or sessions.
    pub async fn delete_teacher(&self, id: &str) -> Result<(), AppError> {
        let mut tx = db::begin_write(&self.db).await?;
        if people::find_teacher_by_id(&mut *tx, id).await?.is_none() {
            return Err(AppError::not_found("teacher", id));
        }

        let references = people::count_teacher_references(&mut *tx, id).await?;
        if references > 0 {
            warn!("refusing to delete teacher {}: {} reference(s)", id, references);
            return Err(AppError::DependencyExists(format!(
                "teacher {} still has {} offered course(s) or session(s)",
                id, references
            )));
        }

        people::delete_teacher(&mut *tx, id).await?;
        tx.commit().await?;
        info!("deleted teacher {}", id);
        Ok(())
    }
}
