use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display format for opening and closing times.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Day-of-week index used by the store: 0 = Monday through 6 = Sunday.
pub fn day_index(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_monday() as i16
}

/// Accepts `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_OF_DAY_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Opening hours for a single day, shared by weekly rows and exception rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub is_closed: bool,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}

impl DayHours {
    pub fn open(open_time: NaiveTime, close_time: NaiveTime) -> Self {
        Self {
            is_closed: false,
            open_time: Some(open_time),
            close_time: Some(close_time),
        }
    }

    pub fn closed() -> Self {
        Self {
            is_closed: true,
            open_time: None,
            close_time: None,
        }
    }

    /// A closed day carries no times, and a day missing either time is
    /// stored as closed.
    pub fn normalized(self) -> Self {
        match (self.is_closed, self.open_time, self.close_time) {
            (false, Some(open), Some(close)) => Self::open(open, close),
            _ => Self::closed(),
        }
    }
}

/// A date-ranged override of a route's weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteException {
    pub id: Uuid,
    pub route_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RouteException {
    /// Both ends of the range are inclusive.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Where the effective schedule for a day came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    Exception,
    Weekly,
    #[serde(rename = "none")]
    Undefined,
}

/// The effective schedule of one route on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub source: ScheduleSource,
    pub title: Option<String>,
    pub is_closed: bool,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}

impl DaySchedule {
    pub fn from_exception(title: Option<String>, hours: DayHours) -> Self {
        Self {
            source: ScheduleSource::Exception,
            title,
            is_closed: hours.is_closed,
            open_time: hours.open_time,
            close_time: hours.close_time,
        }
    }

    pub fn from_weekly(hours: DayHours) -> Self {
        Self {
            source: ScheduleSource::Weekly,
            title: None,
            is_closed: hours.is_closed,
            open_time: hours.open_time,
            close_time: hours.close_time,
        }
    }

    /// No weekly row and no exception row: treated as closed.
    pub fn undefined() -> Self {
        Self {
            source: ScheduleSource::Undefined,
            title: None,
            is_closed: true,
            open_time: None,
            close_time: None,
        }
    }

    /// Opening and closing times, present only when the day is open and
    /// both bounds are defined. The order of the bounds is not checked.
    pub fn bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        if self.is_closed {
            return None;
        }
        self.open_time.zip(self.close_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusReason {
    Open,
    Closed,
    BeforeOpen,
    AfterClose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub open: String,
    pub close: String,
}

impl TimeWindow {
    pub fn from_bounds(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            open: open.format(TIME_OF_DAY_FORMAT).to_string(),
            close: close.format(TIME_OF_DAY_FORMAT).to_string(),
        }
    }
}

/// Today's verdict for a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStatus {
    pub is_open: bool,
    pub reason: StatusReason,
    pub source: ScheduleSource,
    pub window: Option<TimeWindow>,
    pub next_open_at: Option<DateTime<FixedOffset>>,
}

/// One day of a route's weekly hours as submitted by an administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyHoursInput {
    pub dow: i16,
    #[serde(default)]
    pub is_closed: bool,
    pub open: Option<String>,
    pub close: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceWeeklyHoursRequest {
    pub days: Vec<WeeklyHoursInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHoursEntry {
    pub dow: i16,
    pub is_closed: bool,
    pub open: Option<String>,
    pub close: Option<String>,
}

impl WeeklyHoursEntry {
    pub fn new(dow: i16, hours: DayHours) -> Self {
        let format = |t: NaiveTime| t.format(TIME_OF_DAY_FORMAT).to_string();
        Self {
            dow,
            is_closed: hours.is_closed,
            open: hours.open_time.map(format),
            close: hours.close_time.map(format),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyHoursResponse {
    pub route_key: String,
    pub days: Vec<WeeklyHoursEntry>,
}
