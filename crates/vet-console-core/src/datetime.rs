//! Date/time helpers.
//!
//! The backend stores a visit as separate `date` (`YYYY-MM-DD`) and `time`
//! (`HH:mm`) strings; the editor works with one combined `YYYY-MM-DD HH:mm`
//! value.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const EDITOR_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Split a combined instant into its stored date and time strings.
pub fn split(value: NaiveDateTime) -> (String, String) {
    (
        value.format(DATE_FORMAT).to_string(),
        value.format(TIME_FORMAT).to_string(),
    )
}

/// Rebuild the editor value from stored date and time strings.
///
/// A blank or unparseable time falls back to midnight. Returns `None` when the
/// date itself cannot be parsed.
pub fn combine(date: &str, time: &str) -> Option<String> {
    let date = parse_date(date)?;
    let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time).format(EDITOR_FORMAT).to_string())
}

/// Parse an editor date-time value. A bare date means midnight; seconds are
/// not accepted since stored times keep minutes only.
pub fn parse_editor_value(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    for format in [EDITOR_FORMAT, "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse a calendar date, ignoring any trailing time part.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let head = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(head, DATE_FORMAT).ok()
}

/// True when both values name the same calendar day.
pub fn same_day(a: &str, b: &str) -> bool {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// True when the minute lands on a `step`-minute boundary.
pub fn on_minute_step(value: NaiveDateTime, step: u32) -> bool {
    step == 0 || (value.minute() % step == 0 && value.second() == 0)
}
