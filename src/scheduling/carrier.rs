//! Shipping and delivery date calculation.
//!
//! Given the date an order finishes processing, this module works out when
//! the carrier picks it up and when it arrives, honoring the carrier's
//! delivery days and holidays and the optional open delivery window.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{CarrierSettings, DeliveryEstimate, DeliverySettings, ExclusionSet};

use super::calendar_policy::CalendarPolicy;

/// Name used for the delivery calendar in errors and logs.
pub const DELIVERY_CALENDAR: &str = "delivery";

/// Computes shipping and delivery dates for a store's carrier.
///
/// The carrier's holidays are either its own list or, when the store says
/// so, the store's processing holidays. The choice is made from the
/// settings the scheduler was built with.
///
/// # Example
///
/// ```
/// use delivery_date_engine::models::{DeliverySettings, WorkCalendar};
/// use delivery_date_engine::scheduling::CarrierScheduler;
/// use chrono::NaiveDateTime;
///
/// let mut settings = DeliverySettings::default();
/// settings.carrier.delivery_days = WorkCalendar::from_indices([1]);
/// settings.carrier.lead_days = 1;
/// settings.carrier.open_delivery_enabled = true;
/// settings.carrier.open_delivery_range_days = 1;
///
/// let scheduler = CarrierScheduler::from_settings(&settings);
/// let processed = NaiveDateTime::parse_from_str("2022-04-18 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let estimate = scheduler.get_delivery_estimation(processed).unwrap();
///
/// assert_eq!(estimate.shipping_date, processed);
/// assert_eq!(estimate.delivery_dates.len(), 2);
/// assert_eq!(estimate.delivery_dates[0].to_string(), "2022-04-25 00:00:00");
/// assert_eq!(estimate.delivery_dates[1].to_string(), "2022-05-02 00:00:00");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CarrierScheduler<'a> {
    settings: &'a CarrierSettings,
    processing_exclusions: &'a ExclusionSet,
}

impl<'a> CarrierScheduler<'a> {
    /// Creates a scheduler from carrier settings and the store's processing
    /// holidays, which are used when the carrier shares them.
    pub fn new(settings: &'a CarrierSettings, processing_exclusions: &'a ExclusionSet) -> Self {
        Self {
            settings,
            processing_exclusions,
        }
    }

    /// Creates a scheduler from a store's full settings.
    pub fn from_settings(settings: &'a DeliverySettings) -> Self {
        Self::new(&settings.carrier, &settings.processing.excluded_dates)
    }

    /// The holiday list the carrier side uses.
    pub fn excluded_dates_for_carrier(&self) -> &'a ExclusionSet {
        if self.settings.use_processing_exclusions {
            self.processing_exclusions
        } else {
            &self.settings.excluded_dates
        }
    }

    fn policy(&self) -> CalendarPolicy<'a> {
        CalendarPolicy::new(
            DELIVERY_CALENDAR,
            &self.settings.delivery_days,
            self.excluded_dates_for_carrier(),
        )
    }

    /// Returns true if the carrier works on this weekday.
    pub fn is_carrier_work_day(&self, moment: NaiveDateTime) -> bool {
        self.policy().is_valid_day(moment)
    }

    /// Returns true if this date is a carrier holiday.
    pub fn is_excluded_carrier_date(&self, moment: NaiveDateTime) -> bool {
        self.policy().is_excluded(moment)
    }

    /// The day the carrier picks up an order processed at `processed`:
    /// that same day if the carrier works and it is not a holiday,
    /// otherwise the next day that qualifies.
    pub fn get_shipping_date(&self, processed: NaiveDateTime) -> EngineResult<NaiveDateTime> {
        self.policy().next_available(processed)
    }

    /// The date reached after `lead_days` carrier days following
    /// `shipping`. Days the carrier does not work, and carrier holidays,
    /// are stepped over without counting. With zero lead days this is the
    /// shipping-date rule.
    pub fn get_delivery_date(
        &self,
        shipping: NaiveDateTime,
        lead_days: u32,
    ) -> EngineResult<NaiveDateTime> {
        self.policy().advance_available_days(shipping, lead_days)
    }

    /// Full carrier estimate for an order processed at `processed`.
    ///
    /// Returns the shipping date and the delivery date; with the open
    /// delivery window enabled, the window's closing date is appended,
    /// counted from the delivery date by the configured range.
    pub fn get_delivery_estimation(&self, processed: NaiveDateTime) -> EngineResult<DeliveryEstimate> {
        let shipping_date = self.get_shipping_date(processed)?;
        let delivery_date = self.get_delivery_date(shipping_date, self.settings.lead_days)?;

        let open_delivery = self.settings.open_delivery_enabled;
        let mut delivery_dates = vec![delivery_date];
        if open_delivery {
            let latest =
                self.get_delivery_date(delivery_date, self.settings.open_delivery_range_days)?;
            delivery_dates.push(latest);
        }

        debug!(
            processed = %processed,
            shipping = %shipping_date,
            open_delivery,
            delivery = ?delivery_dates,
            "Computed delivery estimation"
        );

        Ok(DeliveryEstimate {
            shipping_date,
            open_delivery,
            delivery_dates,
        })
    }
}
