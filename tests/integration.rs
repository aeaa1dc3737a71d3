//! Integration tests for the Delivery Date Engine API.
//!
//! This test suite drives the router against the stores in `config/`:
//! - `default`: weekdays, shared holidays, single delivery date
//! - `outlet`: Mon/Wed/Fri processing, admin-grid holidays, delivery window
//! - `closed`: estimation switched off
//! - Error cases

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDateTime;
use serde_json::{Value, json};
use tower::ServiceExt;

use delivery_date_engine::api::{AppState, create_router};
use delivery_date_engine::clock::FixedClock;
use delivery_date_engine::config::{ConfigLoader, StoreConfig};

// =============================================================================
// Test Helpers
// =============================================================================

fn make_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn create_router_at(now: &str) -> Router {
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    let clock = Arc::new(FixedClock::new(make_datetime(now)));
    create_router(AppState::with_clock(config, clock))
}

fn create_router_for_test() -> Router {
    create_router_at("2022-04-11 10:00:00")
}

/// A router over a single enabled store whose processing calendar is empty.
fn create_router_without_work_days() -> Router {
    let store: StoreConfig = serde_yaml::from_str(
        r#"
general:
  status: true
processing:
  working_days: ""
delivery:
  delivery_days: "1,2,3,4,5"
"#,
    )
    .unwrap();
    let config = ConfigLoader::from_stores([("idle".to_string(), store)]);
    let clock = Arc::new(FixedClock::new(make_datetime("2022-04-11 10:00:00")));
    create_router(AppState::with_clock(config, clock))
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

async fn post_estimate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/estimate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn get_widget(router: Router, store: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/stores/{}/widget", store))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

// =============================================================================
// Estimate: default store
// =============================================================================

#[tokio::test]
async fn test_estimate_before_cutoff_counts_order_day() {
    let (status, body) = post_estimate(
        create_router_for_test(),
        json!({"store": "default", "order_time": "2022-04-11T10:00:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "default");
    assert_eq!(body["order_time"], "2022-04-11T10:00:00");
    assert_eq!(body["processed_date"], "2022-04-11T10:00:00");
    assert_eq!(body["shipping_date"], "2022-04-11T10:00:00");
    assert_eq!(body["open_delivery"], false);
    assert_eq!(body["delivery_dates"], json!(["2022-04-13T10:00:00"]));
}

#[tokio::test]
async fn test_estimate_after_cutoff_skips_easter_weekend() {
    // Thursday after 14:00 does not count, Good Friday and Easter Monday
    // are excluded, so the single lead day is Tuesday
    let (status, body) = post_estimate(
        create_router_for_test(),
        json!({"store": "default", "order_time": "2022-04-14T15:00:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed_date"], "2022-04-19T15:00:00");
    assert_eq!(body["shipping_date"], "2022-04-19T15:00:00");
    assert_eq!(body["delivery_dates"], json!(["2022-04-21T15:00:00"]));
}

#[tokio::test]
async fn test_estimate_store_defaults_to_default() {
    let (status, body) = post_estimate(
        create_router_for_test(),
        json!({"order_time": "2022-04-11T10:00:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "default");
}

#[tokio::test]
async fn test_estimate_without_order_time_uses_clock() {
    let (status, body) = post_estimate(
        create_router_at("2022-04-14 15:00:00"),
        json!({"store": "default"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order_time"], "2022-04-14T15:00:00");
    assert_eq!(body["delivery_dates"], json!(["2022-04-21T15:00:00"]));
}

// =============================================================================
// Estimate: outlet store (delivery window, separate holidays)
// =============================================================================

#[tokio::test]
async fn test_outlet_window_over_christmas() {
    // Friday after noon; Boxing Day is a store holiday and Tuesday is not a
    // processing day, so processing ends Wednesday
    let (status, body) = post_estimate(
        create_router_for_test(),
        json!({"store": "outlet", "order_time": "2022-12-23T13:00:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed_date"], "2022-12-28T13:00:00");
    assert_eq!(body["shipping_date"], "2022-12-28T13:00:00");
    assert_eq!(body["open_delivery"], true);
    assert_eq!(
        body["delivery_dates"],
        json!(["2023-01-02T13:00:00", "2023-01-04T13:00:00"])
    );
}

#[tokio::test]
async fn test_outlet_carrier_ignores_store_holidays() {
    // The carrier works on Boxing Day because the outlet keeps its
    // holiday lists separate
    let (status, body) = post_estimate(
        create_router_for_test(),
        json!({"store": "outlet", "order_time": "2022-12-21T11:00:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed_date"], "2022-12-21T11:00:00");
    assert_eq!(
        body["delivery_dates"],
        json!(["2022-12-26T11:00:00", "2022-12-28T11:00:00"])
    );
}

// =============================================================================
// Estimate: error cases
// =============================================================================

#[tokio::test]
async fn test_estimate_unknown_store_returns_404() {
    let (status, body) = post_estimate(
        create_router_for_test(),
        json!({"store": "nowhere", "order_time": "2022-04-11T10:00:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STORE_NOT_FOUND");
}

#[tokio::test]
async fn test_estimate_disabled_store_returns_409() {
    let (status, body) = post_estimate(
        create_router_for_test(),
        json!({"store": "closed", "order_time": "2022-04-11T10:00:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "FEATURE_DISABLED");
}

#[tokio::test]
async fn test_estimate_empty_calendar_returns_422() {
    let (status, body) = post_estimate(
        create_router_without_work_days(),
        json!({"store": "idle", "order_time": "2022-04-11T10:00:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NO_VALID_DAY");
    assert!(body["message"].as_str().unwrap().contains("processing"));
}

#[tokio::test]
async fn test_estimate_bad_order_time_returns_400() {
    let (status, body) = post_estimate(
        create_router_for_test(),
        json!({"store": "default", "order_time": "next tuesday"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Widget
// =============================================================================

#[tokio::test]
async fn test_widget_default_store() {
    let (status, body) = get_widget(create_router_for_test(), "default").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], true);
    assert_eq!(body["display"], true);
    assert_eq!(body["show_cutoff_time"], true);
    assert_eq!(body["cutoff_time"], "14:00:00");
    assert_eq!(body["delivery_dates"], json!(["2022-04-13T10:00:00"]));
}

#[tokio::test]
async fn test_widget_outlet_hides_cutoff() {
    let (status, body) = get_widget(create_router_at("2022-12-23 13:00:00"), "outlet").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["show_cutoff_time"], false);
    assert_eq!(body["cutoff_time"], "12:00:00");
    assert_eq!(
        body["delivery_dates"],
        json!(["2023-01-02T13:00:00", "2023-01-04T13:00:00"])
    );
}

#[tokio::test]
async fn test_widget_disabled_store_not_displayed() {
    let (status, body) = get_widget(create_router_for_test(), "closed").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], false);
    assert_eq!(body["display"], false);
    assert_eq!(body["cutoff_time"], "16:00:00");
    assert_eq!(body["delivery_dates"], json!([]));
}

#[tokio::test]
async fn test_widget_hidden_when_no_date_computable() {
    let (status, body) = get_widget(create_router_without_work_days(), "idle").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], true);
    assert_eq!(body["display"], false);
    assert_eq!(body["delivery_dates"], json!([]));
}

#[tokio::test]
async fn test_widget_unknown_store_returns_404() {
    let (status, body) = get_widget(create_router_for_test(), "nowhere").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STORE_NOT_FOUND");
}
