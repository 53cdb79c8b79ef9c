//! Timestamp parsing.
//!
//! Start and end values arrive as loosely formatted strings extracted from
//! notes or requests. They are read as naive local date-times and compared
//! directly; no time zone conversion takes place.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a `YYYY-MM-DD[Thh:mm[:ss]]` timestamp.
///
/// A space may replace the `T`, fractional seconds are accepted and a
/// trailing `Z` is ignored. A date without a time means midnight.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::parse_timestamp;
///
/// let start = parse_timestamp("2024-06-03T08:00").unwrap();
/// assert_eq!(start.to_string(), "2024-06-03 08:00:00");
///
/// let midnight = parse_timestamp("2024-06-03").unwrap();
/// assert_eq!(midnight.to_string(), "2024-06-03 00:00:00");
///
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let value = value.strip_suffix('Z').unwrap_or(value);

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
