//! HTTP API module for the Delivery Date Engine.
//!
//! This module provides the REST API endpoints for estimating order
//! processing and delivery dates per store.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::EstimateRequest;
pub use response::{ApiError, ApiErrorResponse, EstimateResponse, WidgetResponse};
pub use state::AppState;
