//! Deterministic hearing-time parsing
//!
//! Voice notes carry times as spoken: "14:30", "2:30 PM", or nothing at
//! all. Parsing is deterministic with a fixed 09:00 default and a fixed
//! two-hour event window; no timezone handling happens here.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Fixed hearing event duration in hours
pub const HEARING_EVENT_HOURS: i64 = 2;

/// Default start time when no time was spoken
const DEFAULT_HOUR: u32 = 9;

/// Parse a spoken time string
///
/// Accepts 24-hour `HH:MM` and 12-hour `H:MM AM/PM` (case-insensitive,
/// optional space). Anything else, including `None`, defaults to 09:00.
#[must_use]
pub fn parse_hearing_time(time: Option<&str>) -> NaiveTime {
    let default = NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0).unwrap_or_default();
    let Some(raw) = time else {
        return default;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }

    let upper = raw.to_uppercase();
    let parsed = if upper.ends_with("AM") || upper.ends_with("PM") {
        NaiveTime::parse_from_str(&upper, "%I:%M %p")
            .or_else(|_| NaiveTime::parse_from_str(&upper, "%I:%M%p"))
    } else {
        NaiveTime::parse_from_str(raw, "%H:%M")
    };

    parsed.unwrap_or(default)
}

/// Compute the fixed-duration event window for a hearing
#[must_use]
pub fn event_window(date: NaiveDate, time: Option<&str>) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(parse_hearing_time(time));
    let end = start + TimeDelta::hours(HEARING_EVENT_HOURS);
    (start, end)
}
