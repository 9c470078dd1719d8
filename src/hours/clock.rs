use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use super::schedule::{day_name, format_clock_time};

/// Source of "now". Injected so request handling can be pinned in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Snapshot of the practice's local wall clock. Built fresh for every status
/// query and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockReading {
    pub weekday: Weekday,
    pub hour: u32,
    pub minute: u32,
    pub label: String,
}

impl ClockReading {
    /// Out-of-range components are clamped to the last minute of the day.
    pub fn new(weekday: Weekday, hour: u32, minute: u32) -> Self {
        let hour = hour.min(23);
        let minute = minute.min(59);
        Self {
            weekday,
            hour,
            minute,
            label: format!(
                "{} {}",
                day_name(weekday),
                format_clock_time(hour * 60 + minute)
            ),
        }
    }

    /// Reads `instant` in the practice's civil timezone.
    pub fn at(instant: DateTime<Utc>, timezone: Tz) -> Self {
        let local = instant.with_timezone(&timezone);
        Self {
            weekday: local.weekday(),
            hour: local.hour(),
            minute: local.minute(),
            label: local.format("%A %-I:%M %p %Z").to_string(),
        }
    }

    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// 0 = Sunday through 6 = Saturday.
    pub fn weekday_index(&self) -> u32 {
        self.weekday.num_days_from_sunday()
    }
}
