//! HTTP request handlers for the work time API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_duration, generate_holidays, parse_timestamp, project_live};
use crate::models::Region;
use crate::notes::{finalize_note, status_line};

use super::request::{DurationRequest, HolidayQuery, LiveRequest, NoteRequest, resolve_rules};
use super::response::{
    ApiError, ApiErrorResponse, DurationResponse, FinalizeResponse, HolidaysResponse,
    LiveResponse, RegionResponse, StatusResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/duration", post(duration_handler))
        .route("/live", post(live_handler))
        .route("/holidays/:year", get(holidays_handler))
        .route("/regions", get(regions_handler))
        .route("/regions/:code", get(region_handler))
        .route("/notes/finalize", post(finalize_handler))
        .route("/notes/status", post(status_handler))
        .with_state(state)
}

/// Handler for POST /duration.
///
/// Invalid timestamps are not an HTTP error: the body carries
/// `is_error: true`.
async fn duration_handler(
    State(state): State<AppState>,
    payload: Result<Json<DurationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing duration request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let rules = resolve_rules(request.rules.as_deref(), state.config().break_rules());
    let result = compute_duration(&request.start, &request.end, &rules);

    if result.is_error {
        warn!(
            correlation_id = %correlation_id,
            start = %request.start,
            end = %request.end,
            "Duration could not be computed"
        );
    } else {
        info!(
            correlation_id = %correlation_id,
            net_minutes = result.net_minutes,
            break_minutes = result.break_minutes,
            "Duration computed"
        );
    }

    json_response(StatusCode::OK, DurationResponse::from(result))
}

/// Handler for POST /live.
async fn live_handler(
    State(state): State<AppState>,
    payload: Result<Json<LiveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing live request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let Some(start) = parse_timestamp(&request.start) else {
        warn!(correlation_id = %correlation_id, start = %request.start, "Invalid start");
        return ApiErrorResponse::bad_request(ApiError::invalid_timestamp(
            "start",
            &request.start,
        ))
        .into_response();
    };
    let now = match request.now.as_deref() {
        None => local_now(),
        Some(value) => match parse_timestamp(value) {
            Some(now) => now,
            None => {
                return ApiErrorResponse::bad_request(ApiError::invalid_timestamp("now", value))
                    .into_response();
            }
        },
    };
    let scheduled_end = request.scheduled_end.as_deref().and_then(parse_timestamp);

    let rules = resolve_rules(request.rules.as_deref(), state.config().break_rules());
    let projection = project_live(start, scheduled_end, now, &rules);

    json_response(StatusCode::OK, LiveResponse::from(projection))
}

/// Handler for GET /holidays/{year}.
///
/// An unrecognized region yields the nationwide holidays only.
async fn holidays_handler(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(query): Query<HolidayQuery>,
) -> Response {
    let region = query
        .region
        .unwrap_or_else(|| state.config().config().region.clone());
    let holidays = generate_holidays(year, &region);

    info!(year, region = %region, count = holidays.len(), "Holidays generated");

    json_response(
        StatusCode::OK,
        HolidaysResponse {
            year,
            region_known: Region::parse_lenient(&region).is_some(),
            region,
            holidays,
        },
    )
}

/// Handler for GET /regions.
async fn regions_handler() -> Response {
    let regions: Vec<RegionResponse> = Region::ALL.into_iter().map(Into::into).collect();
    json_response(StatusCode::OK, regions)
}

/// Handler for GET /regions/{code}.
///
/// Unlike the holiday endpoint, an unknown code is rejected.
async fn region_handler(Path(code): Path<String>) -> Response {
    match code.parse::<Region>() {
        Ok(region) => json_response(StatusCode::OK, RegionResponse::from(region)),
        Err(err) => {
            warn!(code = %code, "Unknown region requested");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /notes/finalize.
async fn finalize_handler(
    State(state): State<AppState>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing finalize request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match finalize_note(&request.content, &state.config().break_rules()) {
        Ok(note) => {
            info!(correlation_id = %correlation_id, work_time = %note.display, "Note finalized");
            json_response(StatusCode::OK, FinalizeResponse::from(note))
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Finalize failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /notes/status.
async fn status_handler(
    State(state): State<AppState>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let now = request
        .now
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or_else(local_now);
    let status = status_line(&request.content, now, &state.config().break_rules());

    json_response(StatusCode::OK, StatusResponse { status })
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}
