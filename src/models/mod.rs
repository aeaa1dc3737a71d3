//! Core data models for the Delivery Date Engine.
//!
//! This module contains the calendars, exclusion lists, cutoff and result
//! types used throughout the engine.

mod calendar;
mod cutoff;
mod estimate;
mod exclusion;
mod settings;

pub use calendar::{MAX_WEEKDAY_INDEX, WorkCalendar};
pub use cutoff::Cutoff;
pub use estimate::{DeliveryEstimate, OrderSchedule};
pub use exclusion::{ExclusionEntry, ExclusionSet};
pub use settings::{CarrierSettings, DeliverySettings, ProcessingSettings};
