//! Note text handling.
//!
//! Daily notes carry the start and end of a work period as front-matter
//! fields. This module parses them, writes the final duration back and
//! renders the live status line shown while work is in progress.

mod document;
mod worktime;

pub use document::NoteDocument;
pub use worktime::{
    FinalizedNote, NoteStatus, WORK_END, WORK_START, WORK_TIME_FINAL, finalize_note, note_status,
    status_line,
};
