//! HTTP API module for the work time engine.
//!
//! This module provides the REST endpoints for duration calculation, live
//! projection, holiday generation and note updates.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DurationRequest, HolidayQuery, LiveRequest, NoteRequest};
pub use response::{
    ApiError, ApiErrorResponse, DurationResponse, FinalizeResponse, HolidaysResponse,
    LiveResponse, RegionResponse, StatusResponse,
};
pub use state::AppState;
