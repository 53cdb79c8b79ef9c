//! Holiday map model.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Public holidays of one year and region, keyed by date.
///
/// Serializes as a JSON object keyed by `YYYY-MM-DD`. Iteration is in date
/// order, which is also the display order.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use worktime_engine::models::HolidayMap;
///
/// let mut holidays = HolidayMap::new();
/// holidays.insert(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "Neujahr".to_string());
/// assert_eq!(serde_json::to_string(&holidays).unwrap(), r#"{"2024-01-01":"Neujahr"}"#);
/// ```
pub type HolidayMap = BTreeMap<NaiveDate, String>;
