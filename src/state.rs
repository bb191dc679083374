use sqlx::SqlitePool;

use crate::services::{
    AttendanceService, CatalogService, EnrollmentService, PeopleService, ReportService,
    ScheduleService, SessionService,
};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn schedules(&self) -> ScheduleService {
        ScheduleService::new(self.db.clone())
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.db.clone())
    }

    pub fn attendance(&self) -> AttendanceService {
        AttendanceService::new(self.db.clone())
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.db.clone())
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.db.clone())
    }

    pub fn people(&self) -> PeopleService {
        PeopleService::new(self.db.clone())
    }

    pub fn enrollments(&self) -> EnrollmentService {
        EnrollmentService::new(self.db.clone())
    }
}
