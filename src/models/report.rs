use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportType {
    Daily,
    Monthly,
    Course,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_present: u32,
    pub total_absent: u32,
    pub total_late: u32,
    pub attendance_rate: f64,
}

impl ReportSummary {
    /// EXCUSED rows count toward the denominator only.
    pub fn summarize<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = AttendanceStatus>,
    {
        let mut summary = ReportSummary {
            total_present: 0,
            total_absent: 0,
            total_late: 0,
            attendance_rate: 0.0,
        };
        let mut total: u32 = 0;

        for status in statuses {
            total += 1;
            match status {
                AttendanceStatus::Present => summary.total_present += 1,
                AttendanceStatus::Absent => summary.total_absent += 1,
                AttendanceStatus::Late => summary.total_late += 1,
                AttendanceStatus::Excused => {}
            }
        }

        summary.attendance_rate =
            attendance_rate(u64::from(summary.total_present + summary.total_late), u64::from(total));
        summary
    }
}

/// `attended / total * 100`, rounded half-up to one decimal; 0 for an empty total.
pub fn attendance_rate(attended: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = attended as f64 / total as f64 * 100.0;
    (pct * 10.0 + 0.5).floor() / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub date: NaiveDate,
    pub student_id: String,
    pub student_name: String,
    pub course_code: String,
    pub course_name: String,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

impl From<&AttendanceRecord> for ReportRecord {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            date: record.date,
            student_id: record.student_id.clone(),
            student_name: record.student_name.clone(),
            course_code: record.course_code.clone(),
            course_name: record.course_name.clone(),
            status: record.status,
            remarks: record.remarks.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    pub report_type: ReportType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub summary: ReportSummary,
    pub records: Vec<ReportRecord>,
}

impl AttendanceReport {
    pub fn build(
        report_type: ReportType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        records: &[AttendanceRecord],
    ) -> Self {
        Self {
            report_type,
            start_date,
            end_date,
            summary: ReportSummary::summarize(records.iter().map(|r| r.status)),
            records: records.iter().map(ReportRecord::from).collect(),
        }
    }

    /// Newest first; the range spans the records, or `today` on both ends when empty.
    pub fn build_spanning(
        report_type: ReportType,
        mut records: Vec<AttendanceRecord>,
        today: NaiveDate,
    ) -> Self {
        records.sort_by(|a, b| b.date.cmp(&a.date));
        let start_date = records.iter().map(|r| r.date).min().unwrap_or(today);
        let end_date = records.iter().map(|r| r.date).max().unwrap_or(today);
        Self::build(report_type, start_date, end_date, &records)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub today_present: u64,
    pub today_absent: u64,
    pub today_late: u64,
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_courses: u64,
    pub attendance_rate: f64,
}

impl DashboardStats {
    /// Rate is measured against the whole student body, not today's rows.
    pub fn compute(
        today: &[AttendanceStatus],
        total_students: u64,
        total_teachers: u64,
        total_courses: u64,
    ) -> Self {
        let count = |wanted: AttendanceStatus| today.iter().filter(|s| **s == wanted).count() as u64;
        let today_present = count(AttendanceStatus::Present);
        let today_absent = count(AttendanceStatus::Absent);
        let today_late = count(AttendanceStatus::Late);

        Self {
            today_present,
            today_absent,
            today_late,
            total_students,
            total_teachers,
            total_courses,
            attendance_rate: attendance_rate(today_present + today_late, total_students),
        }
    }
}

/// A calendar month written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::BadRequest(format!("expected YYYY-MM, got {:?}", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceStatus::*;

    #[test]
    fn test_summarize_mixed() {
        let summary = ReportSummary::summarize([Present, Present, Absent, Late]);
        assert_eq!(summary.total_present, 2);
        assert_eq!(summary.total_absent, 1);
        assert_eq!(summary.total_late, 1);
        assert_eq!(summary.attendance_rate, 75.0);
    }

    #[test]
    fn test_summarize_excused_dilutes_rate() {
        let summary = ReportSummary::summarize([Present, Excused]);
        assert_eq!(summary.total_present, 1);
        assert_eq!(summary.total_absent, 0);
        assert_eq!(summary.total_late, 0);
        assert_eq!(summary.attendance_rate, 50.0);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = ReportSummary::summarize(Vec::<AttendanceStatus>::new());
        assert_eq!(summary.attendance_rate, 0.0);
        assert_eq!(summary.total_present + summary.total_absent + summary.total_late, 0);
    }

    #[test]
    fn test_rate_rounds_half_up_to_one_decimal() {
        assert_eq!(attendance_rate(2, 3), 66.7);
        assert_eq!(attendance_rate(1, 3), 33.3);
        assert_eq!(attendance_rate(1, 8), 12.5);
        assert_eq!(attendance_rate(1, 16), 6.3);
        assert_eq!(attendance_rate(5, 5), 100.0);
    }

    #[test]
    fn test_dashboard_uses_student_count() {
        let stats = DashboardStats::compute(&[Present, Late, Absent, Excused], 10, 2, 3);
        assert_eq!(stats.today_present, 1);
        assert_eq!(stats.today_absent, 1);
        assert_eq!(stats.today_late, 1);
        assert_eq!(stats.attendance_rate, 20.0);

        let empty = DashboardStats::compute(&[Present], 0, 0, 0);
        assert_eq!(empty.attendance_rate, 0.0);
    }

    #[test]
    fn test_year_month_bounds() {
        let feb: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let dec: YearMonth = "2025-12".parse().unwrap();
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("2025".parse::<YearMonth>().is_err());
    }
}
