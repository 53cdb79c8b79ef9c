//! Persistence of generated and custom holidays.

mod holiday_file;

pub use holiday_file::{HolidayFile, ensure_holidays_for_year};
