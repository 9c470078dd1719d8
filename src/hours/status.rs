use serde::Serialize;

use super::clock::ClockReading;
use super::schedule::{ScheduleError, ScheduleRule, MINUTES_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NextChange {
    Opens,
    Closes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenStatus {
    pub is_open: bool,
    pub minutes_to_change: u32,
    pub next_change: NextChange,
}

impl OpenStatus {
    fn closes_in(minutes: u32) -> Self {
        Self {
            is_open: true,
            minutes_to_change: minutes,
            next_change: NextChange::Closes,
        }
    }

    fn opens_in(minutes: u32) -> Self {
        Self {
            is_open: false,
            minutes_to_change: minutes,
            next_change: NextChange::Opens,
        }
    }
}

/// Decides whether the practice is open at `now` and how many whole minutes
/// remain until the next boundary.
///
/// Windows are half-open: the opening minute counts as open, the closing
/// minute as closed. The forward search for the next opening visits at most
/// seven days, so a schedule without any open day yields
/// [`ScheduleError::NoOpenDay`] instead of looping.
pub fn resolve_status(
    now: &ClockReading,
    schedule: &ScheduleRule,
) -> Result<OpenStatus, ScheduleError> {
    let minute = now.minute_of_day();

    if let Some(window) = schedule
        .windows_on(now.weekday)
        .find(|w| w.contains_minute(minute))
    {
        return Ok(OpenStatus::closes_in(window.close_minute - minute));
    }

    // Later opening on the same day (before opening, or between split windows).
    if let Some(open) = schedule
        .windows_on(now.weekday)
        .map(|w| w.open_minute)
        .filter(|&open| open > minute)
        .min()
    {
        return Ok(OpenStatus::opens_in(open - minute));
    }

    let until_midnight = MINUTES_PER_DAY - minute;
    let mut day = now.weekday;
    for skipped_days in 0..7 {
        day = day.succ();
        if let Some(open) = schedule.earliest_open(day) {
            return Ok(OpenStatus::opens_in(
                until_midnight + skipped_days * MINUTES_PER_DAY + open,
            ));
        }
    }

    Err(ScheduleError::NoOpenDay)
}
