use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::{attendance, catalog, people};
use crate::error::AppError;
use crate::models::{AttendanceReport, DashboardStats, ReportType, YearMonth};

pub struct ReportService {
    db: SqlitePool,
}

impl ReportService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn daily_report(&self, date: NaiveDate) -> Result<AttendanceReport, AppError> {
        let records = attendance::fetch_records_between(&self.db, date, date).await?;
        debug!("daily report for {}: {} record(s)", date, records.len());
        Ok(AttendanceReport::build(ReportType::Daily, date, date, &records))
    }

    pub async fn monthly_report(&self, month: YearMonth) -> Result<AttendanceReport, AppError> {
        let (start, end) = (month.first_day(), month.last_day());
        let records = attendance::fetch_records_between(&self.db, start, end).await?;
        debug!("monthly report {}..{}: {} record(s)", start, end, records.len());
        Ok(AttendanceReport::build(ReportType::Monthly, start, end, &records))
    }

    pub async fn course_report(&self, course_id: &str) -> Result<AttendanceReport, AppError> {
        if catalog::find_course_by_id(&self.db, course_id).await?.is_none() {
            return Err(AppError::not_found("course", course_id));
        }
        let records = attendance::fetch_records_by_course(&self.db, course_id).await?;
        Ok(AttendanceReport::build_spanning(ReportType::Course, records, today()))
    }

    pub async fn student_report(&self, student_id: &str) -> Result<AttendanceReport, AppError> {
        if people::find_student_by_id(&self.db, student_id).await?.is_none() {
            return Err(AppError::not_found("student", student_id));
        }
        let records = attendance::fetch_records_by_student(&self.db, student_id).await?;
        Ok(AttendanceReport::build_spanning(ReportType::Student, records, today()))
    }

    pub async fn dashboard_statistics(&self) -> Result<DashboardStats, AppError> {
        self.dashboard_statistics_on(today()).await
    }

    pub async fn dashboard_statistics_on(&self, date: NaiveDate) -> Result<DashboardStats, AppError> {
        let statuses: Vec<_> = attendance::fetch_records_between(&self.db, date, date)
            .await?
            .into_iter()
            .map(|r| r.status)
            .collect();

        let total_students = people::count_students(&self.db).await?;
        let total_teachers = people::count_teachers(&self.db).await?;
        let total_courses = catalog::count_courses(&self.db).await?;

        Ok(DashboardStats::compute(
            &statuses,
            total_students.max(0) as u64,
            total_teachers.max(0) as u64,
            total_courses.max(0) as u64,
        ))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
