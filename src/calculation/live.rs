//! Live duration projection for in-progress work.
//!
//! A running work period is measured up to "now", but never past its
//! scheduled end once that has passed.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{BreakRule, DurationResult};

use super::duration::compute_duration_between;

/// The state of a work period at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LiveProjection {
    /// The effective end lies before the start.
    NotStarted {
        /// The instant the period was measured up to.
        effective_end: NaiveDateTime,
    },
    /// Work is accruing up to `now`.
    Running {
        /// Equal to `now`.
        effective_end: NaiveDateTime,
        /// Duration up to `now`.
        result: DurationResult,
    },
    /// The scheduled end has passed and caps the duration.
    Capped {
        /// Equal to the scheduled end.
        effective_end: NaiveDateTime,
        /// Duration up to the scheduled end.
        result: DurationResult,
    },
}

impl LiveProjection {
    /// The duration result, unless the period has not started.
    pub fn result(&self) -> Option<&DurationResult> {
        match self {
            LiveProjection::NotStarted { .. } => None,
            LiveProjection::Running { result, .. } | LiveProjection::Capped { result, .. } => {
                Some(result)
            }
        }
    }

    /// The instant the period was measured up to.
    pub fn effective_end(&self) -> NaiveDateTime {
        match *self {
            LiveProjection::NotStarted { effective_end }
            | LiveProjection::Running { effective_end, .. }
            | LiveProjection::Capped { effective_end, .. } => effective_end,
        }
    }
}

/// Picks the instant an in-progress duration is measured up to.
///
/// The scheduled end once `now` is strictly after it, `now` otherwise.
pub fn project_effective_end(
    scheduled_end: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> NaiveDateTime {
    match scheduled_end {
        Some(end) if now > end => end,
        _ => now,
    }
}

/// Whether a period starting at `start` has begun by `effective_end`.
pub fn is_started(start: NaiveDateTime, effective_end: NaiveDateTime) -> bool {
    effective_end >= start
}

/// Projects the duration of a work period as seen at `now`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDateTime;
/// use worktime_engine::calculation::{LiveProjection, project_live};
///
/// let at = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let projection = project_live(
///     at("2024-06-03 08:00"),
///     Some(at("2024-06-03 12:00")),
///     at("2024-06-03 13:30"),
///     &[],
/// );
///
/// assert!(matches!(projection, LiveProjection::Capped { .. }));
/// assert_eq!(projection.result().unwrap().net_minutes, Some(240));
/// ```
pub fn project_live(
    start: NaiveDateTime,
    scheduled_end: Option<NaiveDateTime>,
    now: NaiveDateTime,
    rules: &[BreakRule],
) -> LiveProjection {
    let effective_end = project_effective_end(scheduled_end, now);

    if !is_started(start, effective_end) {
        return LiveProjection::NotStarted { effective_end };
    }

    let result = compute_duration_between(start, effective_end, rules);
    if effective_end == now {
        LiveProjection::Running {
            effective_end,
            result,
        }
    } else {
        LiveProjection::Capped {
            effective_end,
            result,
        }
    }
}
