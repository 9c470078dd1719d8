//! Weekly opening schedule.
//!
//! The schedule is configuration: a list of weekday ranges, each with an
//! opening and closing minute-of-day. It is validated once at startup and is
//! read-only afterwards.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Monday-first week, used wherever every weekday must be visited.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Schedule misconfiguration. Fatal at startup; never masked per request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule has no open day")]
    NoOpenDay,
    #[error("invalid clock time {0:?}, expected HH:MM")]
    InvalidClockTime(String),
    #[error("window {from}-{to} must open before it closes and close by 24:00")]
    InvalidWindow { from: Weekday, to: Weekday },
    #[error("schedule windows overlap on {0}")]
    OverlappingWindows(Weekday),
}

/// One row of the weekly schedule as written in the settings file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WindowSpec {
    pub from: Weekday,
    pub to: Weekday,
    pub opens: String,
    pub closes: String,
}

impl WindowSpec {
    pub fn new(from: Weekday, to: Weekday, opens: &str, closes: &str) -> Self {
        Self {
            from,
            to,
            opens: opens.to_string(),
            closes: closes.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenWindow {
    pub from: Weekday,
    pub to: Weekday,
    pub open_minute: u32,
    pub close_minute: u32,
}

impl OpenWindow {
    pub fn new(
        from: Weekday,
        to: Weekday,
        open_minute: u32,
        close_minute: u32,
    ) -> Result<Self, ScheduleError> {
        if open_minute >= close_minute || close_minute > MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidWindow { from, to });
        }
        Ok(Self {
            from,
            to,
            open_minute,
            close_minute,
        })
    }

    /// Day ranges wrap around the week, so `Sat..=Mon` covers three days.
    pub fn covers(&self, day: Weekday) -> bool {
        let start = self.from.num_days_from_monday();
        let end = self.to.num_days_from_monday();
        let day = day.num_days_from_monday();
        if start <= end {
            (start..=end).contains(&day)
        } else {
            day >= start || day <= end
        }
    }

    pub fn contains_minute(&self, minute: u32) -> bool {
        (self.open_minute..self.close_minute).contains(&minute)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleRule {
    windows: Vec<OpenWindow>,
}

impl ScheduleRule {
    /// Builds a schedule, rejecting windows that overlap on any weekday.
    ///
    /// An empty schedule is accepted here; [`ScheduleRule::validate`] is the
    /// startup check that refuses it.
    pub fn new(windows: Vec<OpenWindow>) -> Result<Self, ScheduleError> {
        for day in WEEK {
            let mut todays: Vec<&OpenWindow> = windows.iter().filter(|w| w.covers(day)).collect();
            todays.sort_by_key(|w| w.open_minute);
            if todays
                .windows(2)
                .any(|pair| pair[1].open_minute < pair[0].close_minute)
            {
                return Err(ScheduleError::OverlappingWindows(day));
            }
        }
        Ok(Self { windows })
    }

    pub fn from_specs(specs: &[WindowSpec]) -> Result<Self, ScheduleError> {
        let windows = specs
            .iter()
            .map(|spec| {
                OpenWindow::new(
                    spec.from,
                    spec.to,
                    parse_clock_time(&spec.opens)?,
                    parse_clock_time(&spec.closes)?,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(windows)
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if WEEK.iter().any(|day| self.is_open_day(*day)) {
            Ok(())
        } else {
            Err(ScheduleError::NoOpenDay)
        }
    }

    pub fn windows_on(&self, day: Weekday) -> impl Iterator<Item = &OpenWindow> {
        self.windows.iter().filter(move |w| w.covers(day))
    }

    pub fn is_open_day(&self, day: Weekday) -> bool {
        self.windows_on(day).next().is_some()
    }

    pub fn earliest_open(&self, day: Weekday) -> Option<u32> {
        self.windows_on(day).map(|w| w.open_minute).min()
    }

    /// Human-readable schedule, e.g. `Monday–Thursday 8:30 AM–4:30 PM; Friday 8:30 AM–1:00 PM`.
    pub fn summary(&self) -> String {
        if self.windows.is_empty() {
            return "Closed".to_string();
        }
        self.windows
            .iter()
            .map(|w| {
                let days = if w.from == w.to {
                    day_name(w.from).to_string()
                } else {
                    format!("{}–{}", day_name(w.from), day_name(w.to))
                };
                format!(
                    "{} {}–{}",
                    days,
                    format_clock_time(w.open_minute),
                    format_clock_time(w.close_minute)
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Parses `HH:MM` (24-hour) into minutes since midnight. `24:00` is accepted
/// as the end of the day.
pub fn parse_clock_time(text: &str) -> Result<u32, ScheduleError> {
    let invalid = || ScheduleError::InvalidClockTime(text.to_string());
    let (hours, minutes) = text.trim().split_once(':').ok_or_else(invalid)?;
    if minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 || hours > 24 || (hours == 24 && minutes != 0) {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as a 12-hour clock time (`8:30 AM`).
pub fn format_clock_time(minute_of_day: u32) -> String {
    let minute_of_day = minute_of_day % MINUTES_PER_DAY;
    let hour = minute_of_day / 60;
    let minute = minute_of_day % 60;
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, minute, suffix)
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
