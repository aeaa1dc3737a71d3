//! Application state for the Delivery Date Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded store configuration and the clock used for "now".
#[derive(Clone)]
pub struct AppState {
    /// The loaded store configuration.
    config: Arc<ConfigLoader>,
    /// Source of the current time.
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates a new application state reading the host's wall clock.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new application state with an explicit clock.
    pub fn with_clock(config: ConfigLoader, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
