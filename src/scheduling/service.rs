//! Entry point composing processing and carrier scheduling.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::clock::Clock;
use crate::error::EngineResult;
use crate::models::{Cutoff, DeliverySettings, OrderSchedule};

use super::{CarrierScheduler, ProcessingScheduler};

/// Estimates delivery dates for one store.
///
/// The service owns a snapshot of the store's settings. Build a new one
/// when the settings change; an existing service never observes updates.
///
/// # Example
///
/// ```
/// use delivery_date_engine::models::{Cutoff, DeliverySettings, WorkCalendar};
/// use delivery_date_engine::scheduling::DeliveryDateService;
/// use chrono::NaiveDateTime;
///
/// let mut settings = DeliverySettings::default();
/// settings.enabled = true;
/// settings.processing.work_days = WorkCalendar::weekdays();
/// settings.processing.cutoff = Cutoff::parse("14:00:00").unwrap();
/// settings.carrier.delivery_days = WorkCalendar::weekdays();
/// settings.carrier.lead_days = 2;
///
/// let service = DeliveryDateService::new(settings);
/// let order = NaiveDateTime::parse_from_str("2022-04-22 15:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // Friday after the cutoff: processed Monday, delivered Wednesday
/// let dates = service.get_delivery_dates(order).unwrap();
/// assert_eq!(dates.len(), 1);
/// assert_eq!(dates[0].to_string(), "2022-04-27 15:30:00");
/// ```
#[derive(Debug, Clone)]
pub struct DeliveryDateService {
    settings: DeliverySettings,
}

impl DeliveryDateService {
    /// Creates a service over a store's settings.
    pub fn new(settings: DeliverySettings) -> Self {
        Self { settings }
    }

    /// The settings this service estimates with.
    pub fn settings(&self) -> &DeliverySettings {
        &self.settings
    }

    /// Whether the store has delivery date estimation switched on.
    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Whether the storefront should show the cutoff time.
    pub fn show_cutoff_time(&self) -> bool {
        self.settings.show_cutoff_time
    }

    /// The same-day processing cutoff.
    pub fn cutoff_time(&self) -> Cutoff {
        self.settings.processing.cutoff
    }

    /// A processing scheduler over this store's settings.
    pub fn processing_scheduler(&self) -> ProcessingScheduler<'_> {
        ProcessingScheduler::new(&self.settings.processing)
    }

    /// A carrier scheduler over this store's settings.
    pub fn carrier_scheduler(&self) -> CarrierScheduler<'_> {
        CarrierScheduler::from_settings(&self.settings)
    }

    /// Processing date, shipping date and delivery dates for an order
    /// placed at `order`.
    pub fn get_delivery_estimate(&self, order: NaiveDateTime) -> EngineResult<OrderSchedule> {
        let processed_date = self.processing_scheduler().get_order_processed_date(order)?;
        let estimate = self
            .carrier_scheduler()
            .get_delivery_estimation(processed_date)?;

        debug!(
            order = %order,
            processed = %processed_date,
            shipping = %estimate.shipping_date,
            "Estimated order schedule"
        );

        Ok(OrderSchedule {
            order_time: order,
            processed_date,
            estimate,
        })
    }

    /// Delivery dates for an order placed at `order`: one date, or the
    /// earliest and latest dates of the open delivery window.
    pub fn get_delivery_dates(&self, order: NaiveDateTime) -> EngineResult<Vec<NaiveDateTime>> {
        self.get_delivery_estimate(order)
            .map(|schedule| schedule.estimate.delivery_dates)
    }

    /// Delivery dates for an order placed now.
    pub fn get_delivery_dates_now(&self, clock: &dyn Clock) -> EngineResult<Vec<NaiveDateTime>> {
        self.get_delivery_dates(clock.now())
    }
}
