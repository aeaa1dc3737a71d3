//! Delivery Date Engine for storefront orders
//!
//! This crate estimates when a store finishes processing an order and when
//! its carrier delivers it, from per-store work calendars, holidays, a
//! same-day cutoff and processing and delivery lead times.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduling;
