use anyhow::{Context, Result};
use chrono::{NaiveTime, Timelike};

use crate::database::models::Shift;

/// Two same-day shifts at most this far apart count as back-to-back.
pub const MAX_CONSECUTIVE_GAP_MINUTES: i64 = 60;

/// Minutes since midnight, for comparing times of day.
pub fn minute_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Parses an `HH:MM` wire string.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").with_context(|| format!("Invalid time of day: {}", s))
}

/// Shift length in hours. An end before the start means the shift crosses
/// midnight, so a day is added.
pub fn shift_duration_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let mut minutes = minute_of_day(end) - minute_of_day(start);
    if minutes < 0 {
        minutes += 24 * 60;
    }
    minutes as f64 / 60.0
}

pub fn shift_hours(shift: &Shift) -> f64 {
    shift_duration_hours(shift.start_time, shift.end_time)
}

/// True when `second` starts within the consecutive window after `first`
/// ends, on the same calendar date. One employee can cover such a pair.
pub fn is_consecutive(first: &Shift, second: &Shift) -> bool {
    if first.shift_date != second.shift_date {
        return false;
    }
    let gap = minute_of_day(second.start_time) - minute_of_day(first.end_time);
    (0..=MAX_CONSECUTIVE_GAP_MINUTES).contains(&gap)
}
