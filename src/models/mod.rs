//! Core data models for the work time engine.
//!
//! This module contains all the domain models used throughout the engine.

mod break_rule;
mod duration_result;
mod holiday;
mod region;

pub use break_rule::{BreakRule, BreakRuleConfig, rules_from_config};
pub use duration_result::DurationResult;
pub use holiday::HolidayMap;
pub use region::Region;
