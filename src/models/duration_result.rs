//! Duration result model.
//!
//! This module contains the [`DurationResult`] produced by the duration
//! calculator, including a small audit of the break deduction.

use serde::{Deserialize, Serialize};

use super::BreakRule;

/// The outcome of a work duration calculation.
///
/// `is_error` is `true` exactly when `net_minutes` is `None`: the inputs were
/// unparsable or the end preceded the start. Successful results also record
/// the raw elapsed minutes and the single break rule that was applied.
///
/// # Example
///
/// ```
/// use worktime_engine::models::{BreakRule, DurationResult};
///
/// let result = DurationResult::computed(570, Some(BreakRule::new(540, 45)));
/// assert_eq!(result.net_minutes, Some(540));
/// assert_eq!(result.break_minutes, 30);
/// assert!(!result.is_error);
///
/// let error = DurationResult::error();
/// assert!(error.is_error);
/// assert_eq!(error.net_minutes, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationResult {
    /// Worked minutes after the break deduction.
    pub net_minutes: Option<i64>,
    /// Elapsed minutes before any deduction.
    pub raw_minutes: Option<i64>,
    /// Minutes deducted as unpaid break.
    pub break_minutes: i64,
    /// The rule responsible for the deduction, if any threshold was exceeded.
    pub applied_rule: Option<BreakRule>,
    /// Whether the inputs were invalid.
    pub is_error: bool,
}

impl DurationResult {
    /// Creates the error result.
    pub fn error() -> Self {
        Self {
            net_minutes: None,
            raw_minutes: None,
            break_minutes: 0,
            applied_rule: None,
            is_error: true,
        }
    }

    /// Creates a successful result from raw minutes and the applied rule.
    pub fn computed(raw_minutes: i64, applied_rule: Option<BreakRule>) -> Self {
        let break_minutes = applied_rule.map_or(0, |rule| rule.deduction_for(raw_minutes));
        Self {
            net_minutes: Some(raw_minutes - break_minutes),
            raw_minutes: Some(raw_minutes),
            break_minutes,
            applied_rule,
            is_error: false,
        }
    }
}
