//! HTTP request handlers for the Delivery Date Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::EstimateRequest;
use super::response::{ApiError, ApiErrorResponse, EstimateResponse, WidgetResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/estimate", post(estimate_handler))
        .route("/stores/:code/widget", get(widget_handler))
        .with_state(state)
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /estimate endpoint.
///
/// Computes the processing, shipping and delivery dates for an order
/// placed at the given time, or now.
async fn estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing estimate request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries serde's detailed message
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::validation_error(body_text)
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
            return error_response(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            });
        }
    };

    if let Err(message) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %message, "Invalid estimate request");
        return error_response(ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(message),
        });
    }

    let service = match state.config().service_for(&request.store) {
        Ok(service) => service,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                store = %request.store,
                "Store not found"
            );
            return error_response(err.into());
        }
    };

    if !service.is_enabled() {
        warn!(
            correlation_id = %correlation_id,
            store = %request.store,
            "Delivery date estimation disabled"
        );
        return error_response(ApiErrorResponse::feature_disabled(&request.store));
    }

    let order_time = request.order_time.unwrap_or_else(|| state.clock().now());

    let start_time = Instant::now();
    match service.get_delivery_estimate(order_time) {
        Ok(schedule) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                store = %request.store,
                order_time = %order_time,
                shipping_date = %schedule.estimate.shipping_date,
                dates_count = schedule.estimate.delivery_dates.len(),
                duration_us = duration.as_micros(),
                "Estimate completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(EstimateResponse::new(request.store, schedule)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Estimate failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /stores/{code}/widget endpoint.
///
/// Returns what a storefront needs to render the estimate for an order
/// placed now. A store that cannot produce a date gets a hidden widget
/// rather than an error.
async fn widget_handler(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, store = %code, "Processing widget request");

    let service = match state.config().service_for(&code) {
        Ok(service) => service,
        Err(err) => {
            warn!(correlation_id = %correlation_id, store = %code, "Store not found");
            return error_response(err.into());
        }
    };

    let mut widget = WidgetResponse {
        enabled: service.is_enabled(),
        display: false,
        show_cutoff_time: service.show_cutoff_time(),
        cutoff_time: service.cutoff_time().to_string(),
        delivery_dates: Vec::new(),
    };

    if widget.enabled {
        match service.get_delivery_dates_now(state.clock()) {
            Ok(dates) => {
                widget.display = !dates.is_empty();
                widget.delivery_dates = dates;
            }
            Err(err) => warn!(
                correlation_id = %correlation_id,
                store = %code,
                error = %err,
                "Hiding widget, no delivery date could be computed"
            ),
        }
    }

    info!(
        correlation_id = %correlation_id,
        store = %code,
        display = widget.display,
        "Widget completed"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(widget),
    )
        .into_response()
}
