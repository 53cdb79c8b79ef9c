//! Request types for the work time API.

use serde::{Deserialize, Serialize};

use crate::models::{BreakRule, BreakRuleConfig, rules_from_config};

/// Request body for the `/duration` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    /// Start timestamp, `YYYY-MM-DD[Thh:mm[:ss]]`.
    pub start: String,
    /// End timestamp, `YYYY-MM-DD[Thh:mm[:ss]]`.
    pub end: String,
    /// Break rules overriding the configured ones.
    #[serde(default)]
    pub rules: Option<Vec<BreakRuleConfig>>,
}

/// Request body for the `/live` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveRequest {
    /// Start of the work period.
    pub start: String,
    /// Scheduled end; ignored when absent or unparsable.
    #[serde(default)]
    pub scheduled_end: Option<String>,
    /// The moment to project at; defaults to the server's local clock.
    #[serde(default)]
    pub now: Option<String>,
    /// Break rules overriding the configured ones.
    #[serde(default)]
    pub rules: Option<Vec<BreakRuleConfig>>,
}

/// Query parameters of the `/holidays/{year}` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidayQuery {
    /// Region code; defaults to the configured region.
    #[serde(default)]
    pub region: Option<String>,
}

/// Request body of the `/notes/finalize` and `/notes/status` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRequest {
    /// Full note text.
    pub content: String,
    /// The moment to render the status at; defaults to the local clock.
    #[serde(default)]
    pub now: Option<String>,
}

/// Resolves request rules, falling back to `configured`.
pub(crate) fn resolve_rules(
    requested: Option<&[BreakRuleConfig]>,
    configured: Vec<BreakRule>,
) -> Vec<BreakRule> {
    requested.map_or(configured, rules_from_config)
}
