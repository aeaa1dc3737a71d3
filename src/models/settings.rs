//! Resolved per-store delivery settings.
//!
//! These are the typed values the schedulers consume. They are produced
//! from raw store configuration by [`StoreConfig::resolve`] and held
//! unchanged for the duration of an estimation.
//!
//! [`StoreConfig::resolve`]: crate::config::StoreConfig::resolve

use serde::Serialize;

use super::{Cutoff, ExclusionSet, WorkCalendar};

/// Settings for the store's own order processing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingSettings {
    /// Weekdays on which orders are processed.
    pub work_days: WorkCalendar,
    /// Business days needed to process an order.
    pub lead_days: u32,
    /// Orders placed before this time may count the same day.
    pub cutoff: Cutoff,
    /// Store holidays.
    pub excluded_dates: ExclusionSet,
}

/// Settings for the carrier side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CarrierSettings {
    /// Weekdays on which the carrier picks up and delivers.
    pub delivery_days: WorkCalendar,
    /// Business days the carrier needs to deliver.
    pub lead_days: u32,
    /// Whether to present a delivery window instead of a single date.
    pub open_delivery_enabled: bool,
    /// Length of the delivery window in delivery days.
    pub open_delivery_range_days: u32,
    /// Use the processing holidays as carrier holidays.
    pub use_processing_exclusions: bool,
    /// Carrier holidays, ignored when `use_processing_exclusions` is set.
    pub excluded_dates: ExclusionSet,
}

/// Everything needed to estimate delivery dates for one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliverySettings {
    /// Whether delivery date estimation is switched on for the store.
    pub enabled: bool,
    /// Whether the storefront shows the cutoff time to shoppers.
    pub show_cutoff_time: bool,
    /// Processing settings.
    pub processing: ProcessingSettings,
    /// Carrier settings.
    pub carrier: CarrierSettings,
}
