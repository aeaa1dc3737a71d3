//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading store
//! configurations from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::DeliverySettings;
use crate::scheduling::DeliveryDateService;

use super::types::StoreConfig;

/// Loads and provides access to per-store delivery configuration.
///
/// # Directory Structure
///
/// The configuration directory holds one file per store, named after the
/// store code:
/// ```text
/// config/
/// └── stores/
///     ├── default.yaml   # Used when a request names no store
///     └── outlet.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use delivery_date_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
///
/// for code in loader.store_codes() {
///     let settings = loader.settings_for(code);
///     println!("{code}: enabled = {}", settings.enabled);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    stores: BTreeMap<String, StoreConfig>,
}

impl ConfigLoader {
    /// Code of the store used when a caller names none.
    pub const DEFAULT_STORE: &'static str = "default";

    /// Loads every store file from `<path>/stores`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The stores directory is missing or holds no `.yaml` files
    /// - Any store file contains invalid YAML
    ///
    /// # Example
    ///
    /// ```no_run
    /// use delivery_date_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config")?;
    /// # Ok::<(), delivery_date_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let stores_dir = path.as_ref().join("stores");
        let stores_dir_str = stores_dir.display().to_string();

        if !stores_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: stores_dir_str,
            });
        }

        let entries = fs::read_dir(&stores_dir).map_err(|_| EngineError::ConfigNotFound {
            path: stores_dir_str.clone(),
        })?;

        let mut stores = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: stores_dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") {
                continue;
            }
            let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let store = Self::load_store_file(&path)?;
            debug!(store = code, path = %path.display(), "Loaded store configuration");
            stores.insert(code.to_string(), store);
        }

        if stores.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no store files found)", stores_dir_str),
            });
        }

        Ok(Self { stores })
    }

    /// Builds a loader from already parsed store configurations.
    pub fn from_stores<I>(stores: I) -> Self
    where
        I: IntoIterator<Item = (String, StoreConfig)>,
    {
        Self {
            stores: stores.into_iter().collect(),
        }
    }

    /// Loads and parses a single store file.
    pub fn load_store_file(path: &Path) -> EngineResult<StoreConfig> {
        Self::load_yaml(path)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the codes of all loaded stores, sorted.
    pub fn store_codes(&self) -> Vec<&str> {
        self.stores.keys().map(String::as_str).collect()
    }

    /// Looks up a store's raw configuration.
    pub fn store(&self, code: &str) -> Option<&StoreConfig> {
        self.stores.get(code)
    }

    /// Gets a store's raw configuration by its code, or `StoreNotFound`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use delivery_date_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config")?;
    /// let store = loader.get_store("outlet")?;
    /// println!("Store: {:?}", store.name);
    /// # Ok::<(), delivery_date_engine::error::EngineError>(())
    /// ```
    pub fn get_store(&self, code: &str) -> EngineResult<&StoreConfig> {
        self.store(code).ok_or_else(|| EngineError::StoreNotFound {
            code: code.to_string(),
        })
    }

    /// Resolved settings for a known store.
    pub fn store_settings(&self, code: &str) -> EngineResult<DeliverySettings> {
        self.get_store(code).map(StoreConfig::resolve)
    }

    /// Resolved settings for a store, falling back to defaults for an
    /// unknown code. Defaults leave estimation disabled.
    pub fn settings_for(&self, code: &str) -> DeliverySettings {
        match self.store(code) {
            Some(store) => store.resolve(),
            None => {
                warn!(store = code, "Unknown store, using default settings");
                DeliverySettings::default()
            }
        }
    }

    /// A delivery date service for a known store.
    pub fn service_for(&self, code: &str) -> EngineResult<DeliveryDateService> {
        self.store_settings(code).map(DeliveryDateService::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cutoff, WorkCalendar};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn config_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_load_config_successfully() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_store_codes_sorted() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.store_codes(), vec!["closed", "default", "outlet"]);
    }

    #[test]
    fn test_default_store_resolved() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let settings = loader.store_settings(ConfigLoader::DEFAULT_STORE).unwrap();

        assert!(settings.enabled);
        assert!(settings.show_cutoff_time);
        assert_eq!(settings.processing.work_days, WorkCalendar::weekdays());
        assert_eq!(settings.processing.lead_days, 1);
        assert_eq!(settings.processing.cutoff, Cutoff::from_hms(14, 0, 0).unwrap());
        assert_eq!(settings.processing.excluded_dates.len(), 2);
        assert!(settings.processing.excluded_dates.contains(make_date("2022-04-18")));
        assert_eq!(settings.carrier.lead_days, 2);
        assert!(settings.carrier.use_processing_exclusions);
        assert!(!settings.carrier.open_delivery_enabled);
    }

    #[test]
    fn test_outlet_store_lenient_values() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let settings = loader.store_settings("outlet").unwrap();

        assert!(settings.enabled);
        assert!(!settings.show_cutoff_time);
        assert_eq!(settings.processing.work_days, WorkCalendar::from_indices([1, 3, 5]));
        assert_eq!(settings.processing.lead_days, 0);
        assert!(settings.processing.excluded_dates.contains(make_date("2022-12-26")));
        assert_eq!(settings.processing.excluded_dates.len(), 1);
        assert!(settings.carrier.open_delivery_enabled);
        assert_eq!(settings.carrier.open_delivery_range_days, 2);
        assert!(!settings.carrier.use_processing_exclusions);
        // The unparseable row is skipped
        assert_eq!(settings.carrier.excluded_dates.len(), 1);
        assert!(settings.carrier.excluded_dates.contains(make_date("2022-12-25")));
    }

    #[test]
    fn test_closed_store_disabled() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(!loader.settings_for("closed").enabled);
    }

    #[test]
    fn test_unknown_store_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        match loader.get_store("nowhere") {
            Err(EngineError::StoreNotFound { code }) => assert_eq!(code, "nowhere"),
            other => panic!("Expected StoreNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_store_settings_fall_back_to_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.settings_for("nowhere"), DeliverySettings::default());
    }

    #[test]
    fn test_service_for_known_store() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let service = loader.service_for("default").unwrap();
        assert!(service.is_enabled());
        assert_eq!(service.cutoff_time().to_string(), "14:00:00");
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("stores"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_empty_stores_directory_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("stores")).unwrap();
        fs::write(dir.path().join("stores").join("README.txt"), "not a store").unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("no store files found"));
            }
            other => panic!("Expected ConfigNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let stores = dir.path().join("stores");
        fs::create_dir(&stores).unwrap();
        fs::write(stores.join("broken.yaml"), "processing: [unclosed").unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("broken.yaml"));
            }
            other => panic!("Expected ConfigParseError error, got {other:?}"),
        }
    }

    #[test]
    fn test_odd_scalars_do_not_block_other_stores() {
        let dir = tempfile::tempdir().unwrap();
        let stores = dir.path().join("stores");
        fs::create_dir(&stores).unwrap();
        fs::write(
            stores.join("default.yaml"),
            "general:\n  status: true\ndelivery:\n  days_needed_for_delivery: 2\n",
        )
        .unwrap();
        fs::write(
            stores.join("odd.yaml"),
            "general:\n  status: 1.0\nprocessing:\n  working_days: [1, \"2\", 3]\ndelivery:\n  days_needed_for_delivery: 1.5\n",
        )
        .unwrap();

        let loader = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(loader.store_codes(), vec!["default", "odd"]);
        assert_eq!(loader.settings_for("default").carrier.lead_days, 2);

        let odd = loader.settings_for("odd");
        assert!(odd.enabled);
        assert_eq!(odd.processing.work_days, WorkCalendar::from_indices([1, 2, 3]));
        assert_eq!(odd.carrier.lead_days, 0);
    }

    #[test]
    fn test_from_stores() {
        let loader = ConfigLoader::from_stores([("a".to_string(), StoreConfig::default())]);
        assert_eq!(loader.store_codes(), vec!["a"]);
        assert!(!loader.settings_for("a").enabled);
    }
}
