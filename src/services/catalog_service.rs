use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{self, attendance, catalog, people};
use crate::error::AppError;
use crate::models::{
    Classroom, Course, Department, NewClassroomRequest, NewCourseRequest, NewDepartmentRequest,
    NewOfferedCourseRequest, OfferedCourse, UpdateCourseRequest,
};

/// Departments, classrooms, courses and their offerings.
pub struct CatalogService {
    db: SqlitePool,
}

impl CatalogService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_department(&self, req: NewDepartmentRequest) -> Result<Department, AppError> {
        let department = Department {
            id: Uuid::new_v4().to_string(),
            department_code: req.department_code,
            department_name: req.department_name,
        };
        catalog::insert_department(&self.db, &department).await?;
        Ok(department)
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        Ok(catalog::fetch_departments(&self.db).await?)
    }

    pub async fn get_department(&self, id: &str) -> Result<Department, AppError> {
        catalog::find_department_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("department", id))
    }

    pub async fn update_department(&self, id: &str, req: NewDepartmentRequest) -> Result<Department, AppError> {
        let department = Department {
            id: id.to_string(),
            department_code: req.department_code,
            department_name: req.department_name,
        };
        if !catalog::update_department(&self.db, &department).await? {
            return Err(AppError::not_found("department", id));
        }
        Ok(department)
    }

    pub async fn create_classroom(&self, req: NewClassroomRequest) -> Result<Classroom, AppError> {
        if req.capacity < 0 {
            return Err(AppError::BadRequest("capacity cannot be negative".to_string()));
        }
        let classroom = Classroom {
            id: Uuid::new_v4().to_string(),
            room_number: req.room_number,
            building: req.building,
            capacity: req.capacity,
            room_type: req.room_type,
        };
        catalog::insert_classroom(&self.db, &classroom).await?;
        info!("created classroom {} ({})", classroom.id, classroom.room_number);
        Ok(classroom)
    }

    pub async fn get_classroom(&self, id: &str) -> Result<Classroom, AppError> {
        catalog::find_classroom_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("classroom", id))
    }

    pub async fn list_classrooms(&self) -> Result<Vec<Classroom>, AppError> {
        Ok(catalog::fetch_classrooms(&self.db).await?)
    }

    pub async fn update_classroom(&self, id: &str, req: NewClassroomRequest) -> Result<Classroom, AppError> {
        if req.capacity < 0 {
            return Err(AppError::BadRequest("capacity cannot be negative".to_string()));
        }
        let classroom = Classroom {
            id: id.to_string(),
            room_number: req.room_number,
            building: req.building,
            capacity: req.capacity,
            room_type: req.room_type,
        };
        if !catalog::update_classroom(&self.db, &classroom).await? {
            return Err(AppError::not_found("classroom", id));
        }
        info!("updated classroom {}", id);
        Ok(classroom)
    }

    pub async fn delete_classroom(&self, id: &str) -> Result<(), AppError> {
        let mut tx = db::begin_write(&self.db).await?;
        if catalog::find_classroom_by_id(&mut *tx, id).await?.is_none() {
            return Err(AppError::not_found("classroom", id));
        }
        let booked = catalog::count_schedules_in_classroom(&mut *tx, id).await?;
        if booked > 0 {
            warn!("refusing to delete classroom {}: {} schedule(s)", id, booked);
            return Err(AppError::DependencyExists(format!(
                "classroom {} is referenced by {} schedule(s)",
                id, booked
            )));
        }
        catalog::delete_classroom(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn create_course(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        let course = Course {
            id: Uuid::new_v4().to_string(),
            course_code: req.course_code,
            course_name: req.course_name,
            description: req.description,
            units: req.units,
            course_type: req.course_type,
            is_active: true,
        };
        catalog::insert_course(&self.db, &course).await?;
        info!("created course {} ({})", course.id, course.course_code);
        Ok(course)
    }

    pub async fn get_course(&self, id: &str) -> Result<Course, AppError> {
        catalog::find_course_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("course", id))
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(catalog::fetch_courses(&self.db).await?)
    }

    pub async fn update_course(&self, id: &str, req: UpdateCourseRequest) -> Result<Course, AppError> {
        let course = Course {
            id: id.to_string(),
            course_code: req.course_code,
            course_name: req.course_name,
            description: req.description,
            units: req.units,
            course_type: req.course_type,
            is_active: req.is_active,
        };
        if !catalog::update_course(&self.db, &course).await? {
            return Err(AppError::not_found("course", id));
        }
        info!("updated course {} ({})", course.id, course.course_code);
        Ok(course)
    }

    /// Courses the teacher holds at least one offering of.
    pub async fn courses_for_teacher(&self, teacher_id: &str) -> Result<Vec<Course>, AppError> {
        if people::find_teacher_by_id(&self.db, teacher_id).await?.is_none() {
            return Err(AppError::not_found("teacher", teacher_id));
        }
        Ok(catalog::fetch_courses_by_teacher(&self.db, teacher_id).await?)
    }

    pub async fn delete_course(&self, id: &str) -> Result<(), AppError> {
        let mut tx = db::begin_write(&self.db).await?;
        if catalog::find_course_by_id(&mut *tx, id).await?.is_none() {
            return Err(AppError::not_found("course", id));
        }
        let references = catalog::count_course_references(&mut *tx, id).await?
            + attendance::count_by_course(&mut *tx, id).await?;
        if references > 0 {
            warn!("refusing to delete course {}: {} reference(s)", id, references);
            return Err(AppError::DependencyExists(format!(
                "course {} is still referenced by {} row(s)",
                id, references
            )));
        }
        catalog::delete_course(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn create_offered_course(&self, req: NewOfferedCourseRequest) -> Result<OfferedCourse, AppError> {
        self.ensure_offering_references(&req).await?;

        let offered = OfferedCourse {
            id: Uuid::new_v4().to_string(),
            course_id: req.course_id,
            teacher_id: req.teacher_id,
            semester: req.semester,
            school_year: req.school_year,
            section: req.section,
        };
        catalog::insert_offered_course(&self.db, &offered).await?;
        info!(
            "offered course {} ({} {} section {})",
            offered.course_id, offered.semester, offered.school_year, offered.section
        );
        Ok(offered)
    }

    pub async fn list_offered_courses(&self) -> Result<Vec<OfferedCourse>, AppError> {
        Ok(catalog::fetch_offered_courses(&self.db).await?)
    }

    pub async fn get_offered_course(&self, id: &str) -> Result<OfferedCourse, AppError> {
        catalog::find_offered_course_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("offered course", id))
    }

    pub async fn list_offered_by_teacher(&self, teacher_id: &str) -> Result<Vec<OfferedCourse>, AppError> {
        Ok(catalog::fetch_offered_courses_by_teacher(&self.db, teacher_id).await?)
    }

    pub async fn list_offered_by_course(&self, course_id: &str) -> Result<Vec<OfferedCourse>, AppError> {
        Ok(catalog::fetch_offered_courses_by_course(&self.db, course_id).await?)
    }

    pub async fn update_offered_course(
        &self,
        id: &str,
        req: NewOfferedCourseRequest,
    ) -> Result<OfferedCourse, AppError> {
        self.ensure_offering_references(&req).await?;

        let offered = OfferedCourse {
            id: id.to_string(),
            course_id: req.course_id,
            teacher_id: req.teacher_id,
            semester: req.semester,
            school_year: req.school_year,
            section: req.section,
        };
        if !catalog::update_offered_course(&self.db, &offered).await? {
            return Err(AppError::not_found("offered course", id));
        }
        info!("updated offered course {}", id);
        Ok(offered)
    }

    /// Refused while any class schedule still belongs to the offering.
    pub async fn delete_offered_course(&self, id: &str) -> Result<(), AppError> {
        let mut tx = db::begin_write(&self.db).await?;
        if catalog::find_offered_course_by_id(&mut *tx, id).await?.is_none() {
            return Err(AppError::not_found("offered course", id));
        }
        let scheduled = catalog::count_schedules_for_offering(&mut *tx, id).await?;
        if scheduled > 0 {
            warn!("refusing to delete offered course {}: {} schedule(s)", id, scheduled);
            return Err(AppError::DependencyExists(format!(
                "offered course {} has {} schedule(s)",
                id, scheduled
            )));
        }
        catalog::delete_offered_course(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn ensure_offering_references(&self, req: &NewOfferedCourseRequest) -> Result<(), AppError> {
        if catalog::find_course_by_id(&self.db, &req.course_id).await?.is_none() {
            return Err(AppError::not_found("course", &req.course_id));
        }
        if people::find_teacher_by_id(&self.db, &req.teacher_id).await?.is_none() {
            return Err(AppError::not_found("teacher", &req.teacher_id));
        }
        Ok(())
    }
}
