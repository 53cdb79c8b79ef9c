//! Response types for the work time API.
//!
//! This module defines the success bodies, the error response structure and
//! the mapping of engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calculation::{LiveProjection, format_minutes_human};
use crate::error::EngineError;
use crate::models::{DurationResult, HolidayMap, Region};
use crate::notes::FinalizedNote;

/// Response body of the `/duration` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationResponse {
    /// Net worked minutes, absent on error.
    pub net_minutes: Option<i64>,
    /// Elapsed minutes before the break deduction.
    pub raw_minutes: Option<i64>,
    /// Minutes deducted as unpaid break.
    pub break_minutes: i64,
    /// Whether the timestamps were invalid.
    pub is_error: bool,
    /// Human-readable duration.
    pub display: String,
}

impl From<DurationResult> for DurationResponse {
    fn from(result: DurationResult) -> Self {
        Self {
            net_minutes: result.net_minutes,
            raw_minutes: result.raw_minutes,
            break_minutes: result.break_minutes,
            is_error: result.is_error,
            display: format_minutes_human(result.net_minutes),
        }
    }
}

/// Response body of the `/live` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveResponse {
    /// `not_started`, `running` or `capped`.
    pub state: String,
    /// The instant the duration was measured up to.
    pub effective_end: NaiveDateTime,
    /// Net worked minutes, absent if not started.
    pub net_minutes: Option<i64>,
    /// Human-readable duration, absent if not started.
    pub display: Option<String>,
}

impl From<LiveProjection> for LiveResponse {
    fn from(projection: LiveProjection) -> Self {
        let state = match projection {
            LiveProjection::NotStarted { .. } => "not_started",
            LiveProjection::Running { .. } => "running",
            LiveProjection::Capped { .. } => "capped",
        };
        let result = projection.result();

        Self {
            state: state.to_string(),
            effective_end: projection.effective_end(),
            net_minutes: result.and_then(|r| r.net_minutes),
            display: result.map(|r| format_minutes_human(r.net_minutes)),
        }
    }
}

/// Response body of the `/holidays/{year}` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaysResponse {
    /// The requested year.
    pub year: i32,
    /// The requested region code as given.
    pub region: String,
    /// Whether the region code was recognized.
    pub region_known: bool,
    /// The generated holidays.
    pub holidays: HolidayMap,
}

/// Response body of the `/notes/finalize` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeResponse {
    /// The note text with `work_time_final` set.
    pub content: String,
    /// Net worked minutes.
    pub net_minutes: Option<i64>,
    /// The value written to the note.
    pub display: String,
}

impl From<FinalizedNote> for FinalizeResponse {
    fn from(note: FinalizedNote) -> Self {
        Self {
            content: note.content,
            net_minutes: note.result.net_minutes,
            display: note.display,
        }
    }
}

/// Response body of the `/notes/status` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// The rendered status line.
    pub status: String,
}

/// One entry of the `/regions` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionResponse {
    /// Two-letter code.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl From<Region> for RegionResponse {
    fn from(region: Region) -> Self {
        Self {
            code: region.code().to_string(),
            name: region.display_name().to_string(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates an invalid timestamp error response.
    pub fn invalid_timestamp(field: &str, value: &str) -> Self {
        Self::with_details(
            "INVALID_TIMESTAMP",
            format!("Invalid timestamp for '{}': {}", field, value),
            "Expected YYYY-MM-DD[Thh:mm[:ss]]",
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        error.to_string(),
                    ),
                }
            }
            EngineError::HolidayFile { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STORAGE_ERROR",
                    "Holiday file error",
                    error.to_string(),
                ),
            },
            EngineError::UnknownRegion { ref code } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNKNOWN_REGION",
                    format!("Unknown region code: {}", code),
                    "Expected one of the sixteen federal state codes",
                ),
            ),
            EngineError::InvalidHoliday { .. } | EngineError::MissingNoteField { .. } => {
                ApiErrorResponse::bad_request(ApiError::validation_error(error.to_string()))
            }
            EngineError::InvalidTimestamps { ref start, ref end } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_TIMESTAMP",
                    error.to_string(),
                    format!("start '{}' must not be after end '{}'", start, end),
                ))
            }
        }
    }
}
