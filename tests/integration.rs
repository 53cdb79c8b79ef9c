//! Integration tests for the work time engine.
//!
//! This test suite covers:
//! - Duration calculation through the HTTP API
//! - Live projection (not started, running, capped)
//! - Holiday generation per region
//! - Note finalization and status lines
//! - Holiday file persistence
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::ServiceExt;

use worktime_engine::api::{AppState, create_router};
use worktime_engine::config::ConfigLoader;
use worktime_engine::storage::{HolidayFile, ensure_holidays_for_year};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    create_router(AppState::new(ConfigLoader::default()))
}

fn create_router_with_config(yaml: &str) -> Router {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("worktime.yaml");
    std::fs::write(&path, yaml).unwrap();
    let config = ConfigLoader::load(&path).expect("Failed to load config");
    create_router(AppState::new(config))
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!(null));
    (status, json)
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Duration
// =============================================================================

#[tokio::test]
async fn test_duration_below_first_threshold_has_no_break() {
    let (status, json) = post(
        create_router_for_test(),
        "/duration",
        json!({"start": "2024-06-03T08:00", "end": "2024-06-03T14:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // exactly 6h does not exceed the 6h threshold
    assert_eq!(json["net_minutes"], 360);
    assert_eq!(json["break_minutes"], 0);
}

#[tokio::test]
async fn test_duration_just_above_threshold_deducts_excess_only() {
    let (_, json) = post(
        create_router_for_test(),
        "/duration",
        json!({"start": "2024-06-03T08:00", "end": "2024-06-03T14:01"}),
    )
    .await;

    // deduction is capped at the excess over the threshold
    assert_eq!(json["raw_minutes"], 361);
    assert_eq!(json["break_minutes"], 1);
    assert_eq!(json["net_minutes"], 360);
    assert_eq!(json["display"], "6 Stunden");
}

#[tokio::test]
async fn test_duration_long_day_uses_largest_rule() {
    let (_, json) = post(
        create_router_for_test(),
        "/duration",
        json!({"start": "2024-06-03T07:00", "end": "2024-06-03T18:00"}),
    )
    .await;

    assert_eq!(json["raw_minutes"], 660);
    assert_eq!(json["break_minutes"], 60);
    assert_eq!(json["net_minutes"], 600);
}

#[tokio::test]
async fn test_duration_with_request_rules() {
    let (_, json) = post(
        create_router_for_test(),
        "/duration",
        json!({
            "start": "2024-06-03T08:00",
            "end": "2024-06-03T12:00",
            "rules": [{"hours": 3, "minutes": 30, "pause": "15"}]
        }),
    )
    .await;

    assert_eq!(json["break_minutes"], 15);
    assert_eq!(json["net_minutes"], 225);
}

#[tokio::test]
async fn test_duration_date_only_values_span_midnight_to_midnight() {
    let (_, json) = post(
        create_router_for_test(),
        "/duration",
        json!({"start": "2024-06-03", "end": "2024-06-04", "rules": []}),
    )
    .await;

    assert_eq!(json["net_minutes"], 1440);
    assert_eq!(json["display"], "24 Stunden");
}

#[tokio::test]
async fn test_duration_with_configured_rules() {
    let router = create_router_with_config(
        "pause_rules:\n  - hours: 4\n    pause: 20\n",
    );
    let (_, json) = post(
        router,
        "/duration",
        json!({"start": "2024-06-03T08:00", "end": "2024-06-03T13:00"}),
    )
    .await;

    assert_eq!(json["break_minutes"], 20);
    assert_eq!(json["net_minutes"], 280);
}

#[tokio::test]
async fn test_duration_invalid_timestamp_is_error_result() {
    let (status, json) = post(
        create_router_for_test(),
        "/duration",
        json!({"start": "yesterday", "end": "2024-06-03T17:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_error"], true);
    assert_eq!(json["display"], "Fehler");
}

// =============================================================================
// Live projection
// =============================================================================

#[tokio::test]
async fn test_live_not_started() {
    let (status, json) = post(
        create_router_for_test(),
        "/live",
        json!({"start": "2024-06-03T08:00", "now": "2024-06-03T07:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "not_started");
    assert!(json["net_minutes"].is_null());
}

#[tokio::test]
async fn test_live_running() {
    let (_, json) = post(
        create_router_for_test(),
        "/live",
        json!({
            "start": "2024-06-03T08:00",
            "scheduled_end": "2024-06-03T17:00",
            "now": "2024-06-03T15:00"
        }),
    )
    .await;

    assert_eq!(json["state"], "running");
    assert_eq!(json["effective_end"], "2024-06-03T15:00:00");
    assert_eq!(json["net_minutes"], 390);
}

#[tokio::test]
async fn test_live_capped_at_scheduled_end() {
    let (_, json) = post(
        create_router_for_test(),
        "/live",
        json!({
            "start": "2024-06-03T08:00",
            "scheduled_end": "2024-06-03T17:00",
            "now": "2024-06-03T19:00"
        }),
    )
    .await;

    assert_eq!(json["state"], "capped");
    assert_eq!(json["effective_end"], "2024-06-03T17:00:00");
    assert_eq!(json["display"], "8 Stunden 30 Minuten");
}

#[tokio::test]
async fn test_live_invalid_now_returns_400() {
    let (status, json) = post(
        create_router_for_test(),
        "/live",
        json!({"start": "2024-06-03T08:00", "now": "soon"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_TIMESTAMP");
}

// =============================================================================
// Holidays
// =============================================================================

#[tokio::test]
async fn test_holidays_bavaria_2024() {
    let (status, json) = get(create_router_for_test(), "/holidays/2024?region=BY").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["region_known"], true);
    let holidays = json["holidays"].as_object().unwrap();
    assert_eq!(holidays.len(), 14);
    assert_eq!(holidays["2024-01-06"], "Heilige Drei Könige");
    assert_eq!(holidays["2024-03-29"], "Karfreitag");
}

#[tokio::test]
async fn test_holidays_saxony_repentance_day() {
    let (_, json) = get(create_router_for_test(), "/holidays/2022?region=sn").await;
    assert_eq!(json["holidays"]["2022-11-16"], "Buß- und Bettag");
}

#[tokio::test]
async fn test_holidays_unknown_region_gets_nationwide_only() {
    let (status, json) = get(create_router_for_test(), "/holidays/2024?region=XX").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["region_known"], false);
    assert_eq!(json["holidays"].as_object().unwrap().len(), 11);
}

#[tokio::test]
async fn test_holidays_invalid_year_is_rejected() {
    let (status, _) = get(create_router_for_test(), "/holidays/next").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Notes
// =============================================================================

#[tokio::test]
async fn test_finalize_note_through_api() {
    let note = "---\nwork_start: 2024-06-03T08:00\nwork_end: 2024-06-03T17:30\n---\n# Log\n";
    let (status, json) = post(
        create_router_for_test(),
        "/notes/finalize",
        json!({"content": note}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["display"], "9 Stunden");
    assert_eq!(
        json["content"],
        "---\nwork_start: 2024-06-03T08:00\nwork_end: 2024-06-03T17:30\nwork_time_final: 9 Stunden\n---\n# Log\n"
    );
}

#[tokio::test]
async fn test_finalize_note_without_end_returns_400() {
    let (status, json) = post(
        create_router_for_test(),
        "/notes/finalize",
        json!({"content": "---\nwork_start: 2024-06-03T08:00\n---\n"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_note_status_through_api() {
    let note = "---\nwork_start: 2024-06-03T08:00\n---\n";
    let (status, json) = post(
        create_router_for_test(),
        "/notes/status",
        json!({"content": note, "now": "2024-06-03T09:30"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "⏱ 1 Stunden 30 Minuten");
}

// =============================================================================
// Holiday file
// =============================================================================

#[test]
fn test_holiday_file_accumulates_years() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meta").join("holidays.json");

    ensure_holidays_for_year(&path, 2024, "HE").unwrap();
    ensure_holidays_for_year(&path, 2025, "HE").unwrap();

    let file = HolidayFile::load(&path).unwrap();
    assert_eq!(file.years.len(), 2);
    assert_eq!(file.name_for(date(2025, 4, 18)), Some("Karfreitag"));
}

#[test]
fn test_regenerating_year_replaces_previous_region() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holidays.json");

    ensure_holidays_for_year(&path, 2024, "BY").unwrap();
    let regenerated = ensure_holidays_for_year(&path, 2024, "BE").unwrap();

    assert_eq!(regenerated.len(), 12);
    assert_eq!(regenerated.get(&date(2024, 3, 8)).unwrap(), "Internationaler Frauentag");
    assert!(!regenerated.contains_key(&date(2024, 1, 6)));
}

#[test]
fn test_custom_days_survive_regeneration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holidays.json");

    let mut file = HolidayFile::load(&path).unwrap();
    file.add_custom(date(2024, 5, 31), "Brückentag").unwrap();
    file.save(&path).unwrap();

    ensure_holidays_for_year(&path, 2024, "HE").unwrap();

    let file = HolidayFile::load(&path).unwrap();
    assert_eq!(file.name_for(date(2024, 5, 31)), Some("Brückentag"));
    assert_eq!(file.merged_for_year(2024).len(), 13);
}

#[test]
fn test_removing_days_off_updates_merged_listing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holidays.json");

    ensure_holidays_for_year(&path, 2024, "HE").unwrap();
    let mut file = HolidayFile::load(&path).unwrap();
    file.add_custom(date(2024, 12, 27), "Brückentag").unwrap();
    assert_eq!(file.remove(date(2024, 12, 31)), Some("Silvester".to_string()));
    file.save(&path).unwrap();

    let merged = HolidayFile::load(&path).unwrap().merged_for_year(2024);
    assert_eq!(merged.len(), 12);
    assert_eq!(merged.get(&date(2024, 12, 27)).unwrap(), "Brückentag");
    assert!(!merged.contains_key(&date(2024, 12, 31)));
}
