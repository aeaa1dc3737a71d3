//! Store configuration loading for the Delivery Date Engine.
//!
//! This module loads per-store settings from YAML files and resolves them
//! into the typed settings the schedulers work with.
//!
//! # Example
//!
//! ```no_run
//! use delivery_date_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded stores: {:?}", config.store_codes());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CountValue, DeliverySection, ExcludedDates, FlagValue, FrontendSection, GeneralSection,
    ProcessingSection, StoreConfig, WeekdayList,
};
