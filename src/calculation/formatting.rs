//! Human-readable duration formatting.

/// Label shown when a duration could not be computed.
pub const ERROR_LABEL: &str = "Fehler";

/// Label shown for a zero duration.
pub const ZERO_LABEL: &str = "0 Minuten";

/// Formats a minute count as an hours-and-minutes phrase.
///
/// `None` yields [`ERROR_LABEL`] and zero yields [`ZERO_LABEL`]. Hours or
/// minutes that are zero are left out of the phrase.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::format_minutes_human;
///
/// assert_eq!(format_minutes_human(Some(540)), "9 Stunden");
/// assert_eq!(format_minutes_human(Some(495)), "8 Stunden 15 Minuten");
/// assert_eq!(format_minutes_human(Some(45)), "45 Minuten");
/// assert_eq!(format_minutes_human(Some(0)), "0 Minuten");
/// assert_eq!(format_minutes_human(None), "Fehler");
/// ```
pub fn format_minutes_human(minutes: Option<i64>) -> String {
    let minutes = match minutes {
        None => return ERROR_LABEL.to_string(),
        Some(minutes) if minutes <= 0 => return ZERO_LABEL.to_string(),
        Some(minutes) => minutes,
    };

    let hours = minutes / 60;
    let rest = minutes % 60;

    match (hours > 0, rest > 0) {
        (true, true) => format!("{hours} Stunden {rest} Minuten"),
        (true, false) => format!("{hours} Stunden"),
        _ => format!("{rest} Minuten"),
    }
}
