//! Request types for the Delivery Date Engine API.
//!
//! This module defines the JSON request structures for the `/estimate` endpoint.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;

/// Request body for the `/estimate` endpoint.
///
/// Both fields are optional: the store defaults to `"default"` and the
/// order time to the server clock's current moment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Code of the store whose settings apply.
    #[serde(default = "default_store")]
    pub store: String,
    /// When the order was placed, as a naive local timestamp.
    #[serde(default)]
    pub order_time: Option<NaiveDateTime>,
}

fn default_store() -> String {
    ConfigLoader::DEFAULT_STORE.to_string()
}

impl EstimateRequest {
    /// Checks the request for values no store could satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.store.trim().is_empty() {
            return Err("store must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_uses_defaults() {
        let request: EstimateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.store, "default");
        assert!(request.order_time.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_order_time_parsed() {
        let request: EstimateRequest =
            serde_json::from_str(r#"{"store":"outlet","order_time":"2022-04-18T10:00:00"}"#)
                .unwrap();
        assert_eq!(request.store, "outlet");
        assert_eq!(
            request.order_time.unwrap().to_string(),
            "2022-04-18 10:00:00"
        );
    }

    #[test]
    fn test_blank_store_rejected() {
        let request = EstimateRequest {
            store: "  ".to_string(),
            order_time: None,
        };
        assert!(request.validate().is_err());
    }
}
