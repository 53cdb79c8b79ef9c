//! Work time fields of daily notes.
//!
//! This module connects note text with the calculation core: it reads the
//! `work_start`/`work_end` fields, writes the final duration back under
//! `work_time_final` and renders the live status line.

use std::fmt;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::calculation::{
    LiveProjection, compute_duration, format_minutes_human, parse_timestamp, project_live,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{BreakRule, DurationResult};

use super::document::NoteDocument;

/// Key holding the start of the work period.
pub const WORK_START: &str = "work_start";

/// Key holding the (scheduled) end of the work period.
pub const WORK_END: &str = "work_end";

/// Key the final duration is written to.
pub const WORK_TIME_FINAL: &str = "work_time_final";

/// A note with its final work time written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedNote {
    /// The updated note text.
    pub content: String,
    /// The underlying duration result.
    pub result: DurationResult,
    /// The human-readable duration stored under [`WORK_TIME_FINAL`].
    pub display: String,
}

/// Computes the final work time of a note and writes it into the note.
///
/// # Errors
///
/// - [`EngineError::MissingNoteField`] if `work_start` or `work_end` is absent
/// - [`EngineError::InvalidTimestamps`] if the pair cannot be turned into a
///   duration
///
/// # Example
///
/// ```
/// use worktime_engine::models::BreakRule;
/// use worktime_engine::notes::finalize_note;
///
/// let note = "---\nwork_start: 2024-06-03T08:00\nwork_end: 2024-06-03T17:30\n---\n";
/// let rules = [BreakRule::from_hours(6, 0, 30), BreakRule::from_hours(9, 0, 45)];
///
/// let finalized = finalize_note(note, &rules).unwrap();
/// assert_eq!(finalized.display, "9 Stunden");
/// assert!(finalized.content.contains("work_time_final: 9 Stunden"));
/// ```
pub fn finalize_note(content: &str, rules: &[BreakRule]) -> EngineResult<FinalizedNote> {
    let document = NoteDocument::parse(content);
    let start = required_field(&document, WORK_START)?;
    let end = required_field(&document, WORK_END)?;

    let result = compute_duration(start, end, rules);
    if result.is_error {
        return Err(EngineError::InvalidTimestamps {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let text = format_minutes_human(result.net_minutes);
    debug!(start, end, work_time = %text, "finalized work time");

    Ok(FinalizedNote {
        content: document.with_field(WORK_TIME_FINAL, &text),
        result,
        display: text,
    })
}

fn required_field<'a>(document: &NoteDocument<'a>, key: &str) -> EngineResult<&'a str> {
    document
        .timestamp_field(key)
        .ok_or_else(|| EngineError::MissingNoteField {
            key: key.to_string(),
        })
}

/// The live state of a note's work period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStatus {
    /// The note has no `work_start` value.
    MissingStart,
    /// The `work_start` value is not a valid timestamp.
    InvalidStart,
    /// The work period was projected.
    Live(LiveProjection),
}

impl fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteStatus::MissingStart => f.write_str("⏱ Kein Startzeitpunkt"),
            NoteStatus::InvalidStart => f.write_str("⏱ Ungültiger Startzeitpunkt"),
            NoteStatus::Live(LiveProjection::NotStarted { .. }) => {
                f.write_str("⏱ Noch nicht gestartet")
            }
            NoteStatus::Live(projection) => match projection.result() {
                Some(result) if !result.is_error => {
                    write!(f, "⏱ {}", format_minutes_human(result.net_minutes))
                }
                _ => f.write_str("⚠️ Fehler"),
            },
        }
    }
}

/// Determines the live status of a note at `now`.
///
/// A `work_end` that is absent or unparsable leaves the period open-ended.
pub fn note_status(content: &str, now: NaiveDateTime, rules: &[BreakRule]) -> NoteStatus {
    let document = NoteDocument::parse(content);

    let Some(start) = document.timestamp_field(WORK_START) else {
        return NoteStatus::MissingStart;
    };
    let Some(start) = parse_timestamp(start) else {
        return NoteStatus::InvalidStart;
    };
    let scheduled_end = document
        .timestamp_field(WORK_END)
        .and_then(parse_timestamp);

    NoteStatus::Live(project_live(start, scheduled_end, now, rules))
}

/// Renders the status line of a note at `now`.
pub fn status_line(content: &str, now: NaiveDateTime, rules: &[BreakRule]) -> String {
    note_status(content, now, rules).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn rules() -> Vec<BreakRule> {
        vec![
            BreakRule::from_hours(6, 0, 30),
            BreakRule::from_hours(9, 0, 45),
            BreakRule::from_hours(10, 0, 60),
        ]
    }

    #[test]
    fn test_finalize_inserts_into_front_matter() {
        let note = "---\nwork_start: 2024-06-03T08:00\nwork_end: 2024-06-03T16:45\n---\nBody\n";
        let finalized = finalize_note(note, &rules()).unwrap();

        // 8h45m raw, 6h rule deducts 30
        assert_eq!(finalized.result.net_minutes, Some(495));
        assert_eq!(finalized.display, "8 Stunden 15 Minuten");
        assert_eq!(
            finalized.content,
            "---\nwork_start: 2024-06-03T08:00\nwork_end: 2024-06-03T16:45\nwork_time_final: 8 Stunden 15 Minuten\n---\nBody\n"
        );
    }

    #[test]
    fn test_finalize_replaces_previous_value() {
        let note = "---\nwork_start: 2024-06-03T08:00\nwork_end: 2024-06-03T08:40\nwork_time_final: 3 Stunden\n---\n";
        let finalized = finalize_note(note, &rules()).unwrap();
        assert_eq!(
            finalized.content,
            "---\nwork_start: 2024-06-03T08:00\nwork_end: 2024-06-03T08:40\nwork_time_final: 40 Minuten\n---\n"
        );
    }

    #[test]
    fn test_finalize_without_end_is_missing_field() {
        let note = "---\nwork_start: 2024-06-03T08:00\n---\n";
        match finalize_note(note, &rules()) {
            Err(EngineError::MissingNoteField { key }) => assert_eq!(key, WORK_END),
            other => panic!("Expected MissingNoteField, got {:?}", other),
        }
    }

    #[test]
    fn test_finalize_with_inverted_times_is_invalid() {
        let note = "---\nwork_start: 2024-06-03T17:00\nwork_end: 2024-06-03T08:00\n---\n";
        assert!(matches!(
            finalize_note(note, &rules()),
            Err(EngineError::InvalidTimestamps { .. })
        ));
    }

    #[test]
    fn test_status_without_start() {
        assert_eq!(
            status_line("no fields here", at("2024-06-03 10:00"), &rules()),
            "⏱ Kein Startzeitpunkt"
        );
    }

    #[test]
    fn test_status_with_invalid_start() {
        let note = "---\nwork_start: 2024-13-40T08:00\n---\n";
        assert_eq!(
            status_line(note, at("2024-06-03 10:00"), &rules()),
            "⏱ Ungültiger Startzeitpunkt"
        );
    }

    #[test]
    fn test_status_before_start() {
        let note = "---\nwork_start: 2024-06-03T08:00\n---\n";
        assert_eq!(
            status_line(note, at("2024-06-03 07:30"), &rules()),
            "⏱ Noch nicht gestartet"
        );
    }

    #[test]
    fn test_status_running() {
        let note = "---\nwork_start: 2024-06-03T08:00\nwork_end: 2024-06-03T17:00\n---\n";
        assert_eq!(
            status_line(note, at("2024-06-03 10:15"), &rules()),
            "⏱ 2 Stunden 15 Minuten"
        );
    }

    #[test]
    fn test_status_capped_at_scheduled_end() {
        let note = "---\nwork_start: 2024-06-03T08:00\nwork_end: 2024-06-03T17:00\n---\n";
        let status = note_status(note, at("2024-06-03 20:00"), &rules());
        assert!(matches!(status, NoteStatus::Live(LiveProjection::Capped { .. })));
        // 9h raw, 6h rule deducts 30
        assert_eq!(status.to_string(), "⏱ 8 Stunden 30 Minuten");
    }

    #[test]
    fn test_status_ignores_unparsable_end() {
        let note = "---\nwork_start: 2024-06-03T08:00\nwork_end: 2024-99-99\n---\n";
        let status = note_status(note, at("2024-06-03 09:00"), &rules());
        assert!(matches!(status, NoteStatus::Live(LiveProjection::Running { .. })));
    }
}
