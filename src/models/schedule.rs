use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MONDAY" => Ok(DayOfWeek::Monday),
            "TUESDAY" => Ok(DayOfWeek::Tuesday),
            "WEDNESDAY" => Ok(DayOfWeek::Wednesday),
            "THURSDAY" => Ok(DayOfWeek::Thursday),
            "FRIDAY" => Ok(DayOfWeek::Friday),
            "SATURDAY" => Ok(DayOfWeek::Saturday),
            "SUNDAY" => Ok(DayOfWeek::Sunday),
            _ => Err(AppError::BadRequest(format!("unknown day of week: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ClassSchedule {
    pub id: String,
    pub offered_course_id: String,
    pub classroom_id: String,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
}

impl ClassSchedule {
    /// Half-open overlap: a booking ending exactly when another starts does not collide.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        intervals_overlap(self.start_time, self.end_time, start, end)
    }

    fn same_slot(&self, req: &ScheduleRequest) -> bool {
        self.classroom_id == req.classroom_id
            && self.day_of_week == req.day_of_week
            && self.start_time == req.start_time
            && self.end_time == req.end_time
    }

    /// Whether applying `req` needs a fresh conflict check: the slot moved, or an
    /// inactive booking is being switched back on.
    pub fn needs_recheck(&self, req: &ScheduleRequest) -> bool {
        !self.same_slot(req) || (!self.is_active && req.is_active)
    }
}

pub fn intervals_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

fn default_active() -> bool {
    true
}

/// Body for both creating and replacing a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub offered_course_id: String,
    pub classroom_id: String,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ScheduleRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_range(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictQuery {
    pub classroom_id: String,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub exclude_schedule_id: Option<String>,
}

pub fn validate_range(start: NaiveTime, end: NaiveTime) -> Result<(), AppError> {
    if start >= end {
        return Err(AppError::BadRequest(format!(
            "start time {} must be before end time {}",
            start, end
        )));
    }
    Ok(())
}
