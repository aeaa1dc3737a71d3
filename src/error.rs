//! Error types for the Delivery Date Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading store settings
//! and estimating dates.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Delivery Date Engine.
///
/// Malformed individual settings (a bad holiday row, an unreadable cutoff)
/// never surface here; they are skipped or defaulted during configuration
/// resolution. What remains are failures the caller has to act on.
///
/// # Example
///
/// ```
/// use delivery_date_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/stores".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/stores");
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

    /// No store configuration exists for the given store code.
    #[error("Store not found: {code}")]
    StoreNotFound {
        /// The store code that was not found.
        code: String,
    },

    /// A day scan gave up without finding a usable day.
    ///
    /// Raised when a calendar is empty or every candidate day within the
    /// scan bound is excluded.
    #[error("No valid {calendar} day found within {max_days} days of {from}")]
    NoValidDay {
        /// Which calendar was being scanned ("processing" or "delivery").
        calendar: String,
        /// The date the scan started from.
        from: NaiveDate,
        /// The number of days scanned before giving up.
        max_days: u32,
    },

    /// A cutoff time-of-day could not be parsed.
    #[error("Invalid cutoff time '{value}': expected HH:MM:SS")]
    InvalidCutoff {
        /// The rejected value.
        value: String,
    },

    /// A calendar date could not be parsed.
    #[error("Invalid date '{value}': expected YYYY-MM-DD or DD/MM/YYYY")]
    InvalidDate {
        /// The rejected value.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
