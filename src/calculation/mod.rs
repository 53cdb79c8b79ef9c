//! Calculation logic for the work time engine.
//!
//! This module contains the pure calculations: timestamp parsing, net work
//! duration with threshold-based break deduction, human-readable duration
//! formatting, the live projection of an in-progress period, the Gregorian
//! Easter computation and the regional public holiday generator.

mod duration;
mod easter;
mod formatting;
mod holidays;
mod live;
mod timestamp;

pub use duration::{compute_duration, compute_duration_between, select_break_rule};
pub use easter::easter_sunday;
pub use formatting::{ERROR_LABEL, ZERO_LABEL, format_minutes_human};
pub use holidays::{
    DateRule, HOLIDAY_RULES, HolidayRule, generate_holidays, generate_holidays_for,
    repentance_day,
};
pub use live::{LiveProjection, is_started, project_effective_end, project_live};
pub use timestamp::parse_timestamp;
