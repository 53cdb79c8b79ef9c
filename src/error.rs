//! Error types for the work time engine.
//!
//! The pure calculations never fail: a duration result carries its own error
//! flag and an unknown region degrades to the nationwide holiday set. The
//! errors below belong to the layers around them (configuration, the holiday
//! data file and note handling).

use thiserror::Error;

/// The main error type for the work time engine.
///
/// # Example
///
/// ```
/// use worktime_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/worktime.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/worktime.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A region code is not one of the sixteen federal states.
    #[error("Unknown region code: {code}")]
    UnknownRegion {
        /// The code that was not recognized.
        code: String,
    },

    /// The holiday data file could not be read or written.
    #[error("Holiday file '{path}': {message}")]
    HolidayFile {
        /// The path of the holiday file.
        path: String,
        /// A description of the I/O or serialization failure.
        message: String,
    },

    /// A custom holiday entry was rejected.
    #[error("Invalid holiday: {message}")]
    InvalidHoliday {
        /// Why the entry was rejected.
        message: String,
    },

    /// A required field was not present in a note.
    #[error("Note field not found: {key}")]
    MissingNoteField {
        /// The front-matter key that was looked up.
        key: String,
    },

    /// The start/end pair of a note could not be turned into a duration.
    #[error("Invalid timestamps: start '{start}', end '{end}'")]
    InvalidTimestamps {
        /// The raw start value.
        start: String,
        /// The raw end value.
        end: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
