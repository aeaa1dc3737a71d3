//! Date scheduling for the Delivery Date Engine.
//!
//! This module turns an order timestamp into a processing date, a shipping
//! date and one or two delivery dates. The calendar predicates are shared
//! by both schedulers; [`DeliveryDateService`] chains them together.

mod calendar_policy;
mod carrier;
mod processing;
mod service;

pub use calendar_policy::{CalendarPolicy, MAX_SCAN_DAYS, is_excluded, is_valid_day};
pub use carrier::{CarrierScheduler, DELIVERY_CALENDAR};
pub use processing::{PROCESSING_CALENDAR, ProcessingScheduler};
pub use service::DeliveryDateService;
