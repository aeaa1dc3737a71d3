//! Response types for the Delivery Date Engine API.
//!
//! This module defines the success bodies, the error response structures
//! and error handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::OrderSchedule;

/// Body returned by `POST /estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    /// The store whose settings were used.
    pub store: String,
    /// When the order was placed.
    pub order_time: NaiveDateTime,
    /// When the store finishes processing the order.
    pub processed_date: NaiveDateTime,
    /// When the carrier picks the order up.
    pub shipping_date: NaiveDateTime,
    /// Whether `delivery_dates` is a window rather than a single date.
    pub open_delivery: bool,
    /// One delivery date, or the first and last dates of the window.
    pub delivery_dates: Vec<NaiveDateTime>,
}

impl EstimateResponse {
    /// Builds the response for a store's computed schedule.
    pub fn new(store: impl Into<String>, schedule: OrderSchedule) -> Self {
        Self {
            store: store.into(),
            order_time: schedule.order_time,
            processed_date: schedule.processed_date,
            shipping_date: schedule.estimate.shipping_date,
            open_delivery: schedule.estimate.open_delivery,
            delivery_dates: schedule.estimate.delivery_dates,
        }
    }
}

/// Body returned by `GET /stores/{code}/widget`.
///
/// Everything a storefront needs to render the estimate for an order
/// placed now.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetResponse {
    /// Whether estimation is switched on for the store.
    pub enabled: bool,
    /// Whether the widget should be shown at all.
    pub display: bool,
    /// Whether to show the cutoff time.
    pub show_cutoff_time: bool,
    /// The same-day cutoff, `HH:MM:SS`.
    pub cutoff_time: String,
    /// Estimated delivery dates; empty when `display` is false.
    pub delivery_dates: Vec<NaiveDateTime>,
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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a store not found error response.
    pub fn store_not_found(code: &str) -> Self {
        Self::with_details(
            "STORE_NOT_FOUND",
            format!("Store not found: {}", code),
            format!("No configuration file exists for store '{}'", code),
        )
    }

    /// Creates a feature disabled error response.
    pub fn feature_disabled(code: &str) -> Self {
        Self::with_details(
            "FEATURE_DISABLED",
            format!("Delivery date estimation is disabled for store '{}'", code),
            "Enable general.status in the store configuration",
        )
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
    /// The response for a store with estimation switched off.
    pub fn feature_disabled(code: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            error: ApiError::feature_disabled(code),
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
            // Configuration is loaded before the router is built, so these
            // only complete the match.
            err @ (EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. }) => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        err.to_string(),
                    ),
                }
            }
            EngineError::StoreNotFound { code } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::store_not_found(&code),
            },
            err @ EngineError::NoValidDay { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "NO_VALID_DAY",
                    err.to_string(),
                    "Check the store's working days, delivery days and excluded dates",
                ),
            },
            err @ (EngineError::InvalidCutoff { .. } | EngineError::InvalidDate { .. }) => {
                ApiErrorResponse {
                    status: StatusCode::BAD_REQUEST,
                    error: ApiError::validation_error(err.to_string()),
                }
            }
        }
    }
}
