//! Configuration types for the work time engine.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from the YAML configuration file.

use serde::{Deserialize, Serialize};

use crate::models::{BreakRule, BreakRuleConfig, Region, rules_from_config};

/// Holiday file location used when none is configured.
pub const DEFAULT_HOLIDAY_PATH: &str = "meta/holidays.json";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "HE";

/// The complete engine configuration.
///
/// Every field is optional in the file; missing fields take their defaults.
/// The settings store of the note plugin uses camel-case keys and the German
/// `bundesland`, both accepted as aliases.
///
/// # Example
///
/// ```
/// use worktime_engine::config::WorktimeConfig;
///
/// let config: WorktimeConfig = serde_yaml::from_str("region: SN\n").unwrap();
/// assert_eq!(config.region, "SN");
/// assert_eq!(config.pause_rules.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorktimeConfig {
    /// Path of the holiday data file.
    #[serde(alias = "holidayPath")]
    pub holiday_path: String,
    /// Two-letter region code holidays are generated for.
    #[serde(alias = "bundesland")]
    pub region: String,
    /// Break rules applied to every duration.
    #[serde(alias = "pauseRules")]
    pub pause_rules: Vec<BreakRuleConfig>,
}

impl Default for WorktimeConfig {
    fn default() -> Self {
        Self {
            holiday_path: DEFAULT_HOLIDAY_PATH.to_string(),
            region: DEFAULT_REGION.to_string(),
            pause_rules: vec![
                BreakRuleConfig::new(6, 0, 30),
                BreakRuleConfig::new(9, 0, 45),
                BreakRuleConfig::new(10, 0, 60),
            ],
        }
    }
}

impl WorktimeConfig {
    /// Returns the configured break rules.
    pub fn break_rules(&self) -> Vec<BreakRule> {
        rules_from_config(&self.pause_rules)
    }

    /// Returns the configured region, `None` if the code is not recognized.
    pub fn region(&self) -> Option<Region> {
        Region::parse_lenient(&self.region)
    }

    /// Replaces blank values with their defaults.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.holiday_path.trim();
        self.holiday_path = if trimmed.is_empty() {
            DEFAULT_HOLIDAY_PATH.to_string()
        } else {
            trimmed.to_string()
        };
        if self.region.trim().is_empty() {
            self.region = DEFAULT_REGION.to_string();
        }
        self
    }
}
