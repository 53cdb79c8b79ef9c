//! Break rule model and its configuration record.
//!
//! This module defines the [`BreakRule`] used by the duration calculator and
//! the lenient [`BreakRuleConfig`] record it is built from.

use serde::{Deserialize, Deserializer, Serialize};

/// A threshold-based unpaid break rule.
///
/// Once worked time exceeds `threshold_minutes`, up to `pause_minutes` are
/// deducted. The deduction is capped by the overage, so a rule never takes
/// away more than the time worked beyond its threshold.
///
/// # Example
///
/// ```
/// use worktime_engine::models::BreakRule;
///
/// let rule = BreakRule::from_hours(6, 0, 30);
/// assert_eq!(rule.threshold_minutes, 360);
/// assert_eq!(rule.pause_minutes, 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreakRule {
    /// Worked minutes that must be exceeded before the rule applies.
    pub threshold_minutes: u32,
    /// Maximum number of minutes deducted by the rule.
    pub pause_minutes: u32,
}

impl BreakRule {
    /// Creates a rule from a threshold and pause in minutes.
    pub fn new(threshold_minutes: u32, pause_minutes: u32) -> Self {
        Self {
            threshold_minutes,
            pause_minutes,
        }
    }

    /// Creates a rule from a threshold given in hours and minutes.
    ///
    /// The threshold saturates at `u32::MAX` minutes.
    pub fn from_hours(hours: u32, minutes: u32, pause_minutes: u32) -> Self {
        Self::new(hours.saturating_mul(60).saturating_add(minutes), pause_minutes)
    }

    /// Returns the number of minutes this rule deducts from `worked_minutes`.
    ///
    /// Zero when the threshold is not strictly exceeded.
    pub fn deduction_for(&self, worked_minutes: i64) -> i64 {
        let threshold = i64::from(self.threshold_minutes);
        if worked_minutes > threshold {
            (worked_minutes - threshold).min(i64::from(self.pause_minutes))
        } else {
            0
        }
    }
}

/// A break rule as it appears in configuration files and API requests.
///
/// Every field is coerced to a non-negative number: missing fields, `null`,
/// unparsable strings and negative or non-finite values all become zero.
///
/// # Example
///
/// ```
/// use worktime_engine::models::{BreakRule, BreakRuleConfig};
///
/// let config: BreakRuleConfig =
///     serde_json::from_str(r#"{"hours": "9", "pause": 45}"#).unwrap();
/// assert_eq!(BreakRule::from(&config), BreakRule::new(540, 45));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BreakRuleConfig {
    /// Threshold hours.
    #[serde(default, deserialize_with = "lenient_number")]
    pub hours: f64,
    /// Threshold minutes added on top of `hours`.
    #[serde(default, deserialize_with = "lenient_number")]
    pub minutes: f64,
    /// Pause in minutes.
    #[serde(default, deserialize_with = "lenient_number")]
    pub pause: f64,
}

impl BreakRuleConfig {
    /// Creates a configuration record from whole numbers.
    pub fn new(hours: u32, minutes: u32, pause: u32) -> Self {
        Self {
            hours: f64::from(hours),
            minutes: f64::from(minutes),
            pause: f64::from(pause),
        }
    }

    /// Threshold in whole minutes, fractions truncated.
    pub fn threshold_minutes(&self) -> u32 {
        to_whole_minutes(self.hours * 60.0 + self.minutes)
    }
}

impl From<&BreakRuleConfig> for BreakRule {
    fn from(config: &BreakRuleConfig) -> Self {
        BreakRule::new(config.threshold_minutes(), to_whole_minutes(config.pause))
    }
}

/// Converts a list of configuration records into break rules.
pub fn rules_from_config(configs: &[BreakRuleConfig]) -> Vec<BreakRule> {
    configs.iter().map(BreakRule::from).collect()
}

fn to_whole_minutes(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        // `as` saturates at u32::MAX
        value.floor() as u32
    } else {
        0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match LenientNumber::deserialize(deserializer)? {
        LenientNumber::Number(n) => n,
        LenientNumber::Text(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        LenientNumber::Other(_) => 0.0,
    };
    Ok(if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    })
}
