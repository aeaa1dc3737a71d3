//! Order processing date calculation.
//!
//! This module determines the day on which a store finishes processing an
//! order, given when the order was placed, the same-day cutoff, the
//! processing lead time and the store's work calendar and holidays.

use chrono::{Days, NaiveDateTime};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{ExclusionSet, ProcessingSettings, WorkCalendar};

use super::calendar_policy::{CalendarPolicy, MAX_SCAN_DAYS};

/// Name used for the processing calendar in errors and logs.
pub const PROCESSING_CALENDAR: &str = "processing";

/// Computes processing completion dates for a store.
///
/// # Example
///
/// ```
/// use delivery_date_engine::models::{Cutoff, ProcessingSettings, WorkCalendar};
/// use delivery_date_engine::scheduling::ProcessingScheduler;
/// use chrono::NaiveDateTime;
///
/// let settings = ProcessingSettings {
///     work_days: WorkCalendar::weekdays(),
///     lead_days: 0,
///     cutoff: Cutoff::parse("22:00:00").unwrap(),
///     ..Default::default()
/// };
/// let scheduler = ProcessingScheduler::new(&settings);
///
/// // Placed on a Sunday evening: processed on Monday at the same time of day
/// let order = NaiveDateTime::parse_from_str("2022-04-17 18:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let processed = scheduler.get_order_processed_date(order).unwrap();
/// assert_eq!(processed.to_string(), "2022-04-18 18:00:00");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProcessingScheduler<'a> {
    settings: &'a ProcessingSettings,
}

impl<'a> ProcessingScheduler<'a> {
    /// Creates a scheduler over the given processing settings.
    pub fn new(settings: &'a ProcessingSettings) -> Self {
        Self { settings }
    }

    fn policy(&self) -> CalendarPolicy<'a> {
        CalendarPolicy::new(
            PROCESSING_CALENDAR,
            &self.settings.work_days,
            &self.settings.excluded_dates,
        )
    }

    /// The store's processing calendar.
    pub fn work_days(&self) -> &'a WorkCalendar {
        &self.settings.work_days
    }

    /// The store's processing holidays.
    pub fn excluded_dates(&self) -> &'a ExclusionSet {
        &self.settings.excluded_dates
    }

    /// Returns true if the store processes orders on this weekday.
    pub fn is_work_day(&self, moment: NaiveDateTime) -> bool {
        self.policy().is_valid_day(moment)
    }

    /// Returns true if this date is a store holiday.
    pub fn is_excluded_processing_date(&self, moment: NaiveDateTime) -> bool {
        self.policy().is_excluded(moment)
    }

    /// Finds the first work day on or after `moment`, or strictly after it
    /// when `include_given` is false.
    pub fn first_work_date_since(
        &self,
        moment: NaiveDateTime,
        include_given: bool,
    ) -> EngineResult<NaiveDateTime> {
        let start = if include_given {
            moment
        } else {
            shift_days(moment, 1)?
        };
        self.policy().next_available(start)
    }

    /// Computes the date on which processing of an order placed at `order`
    /// completes.
    ///
    /// Without lead days, an order placed at or after the cutoff moves to
    /// the next calendar day, and the result is the first open work day
    /// from there.
    ///
    /// With lead days, they are counted in open work days. The first open
    /// work day on or after the order counts as lead day one when the order
    /// falls outside work hours altogether (weekend, holiday) or beats the
    /// cutoff on an open work day. An order that misses the cutoff on an
    /// open work day does not count that day. The time of day of `order`
    /// is kept.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoValidDay`] when the work calendar is empty
    /// or no usable day is found within the scan bound.
    pub fn get_order_processed_date(&self, order: NaiveDateTime) -> EngineResult<NaiveDateTime> {
        let policy = self.policy();
        let cutoff_instant = self.settings.cutoff.on(order.date());
        let beats_cutoff = order < cutoff_instant;
        let lead_days = self.settings.lead_days;

        let processed = if lead_days == 0 {
            let start = if beats_cutoff {
                order
            } else {
                shift_days(order, 1)?
            };
            policy.next_available(start)?
        } else {
            let first_open = policy.next_available(order)?;
            let order_day_counts = first_open != order || beats_cutoff;
            let remaining = if order_day_counts {
                lead_days - 1
            } else {
                lead_days
            };
            policy.advance_available_days(first_open, remaining)?
        };

        debug!(
            order = %order,
            cutoff = %self.settings.cutoff,
            beats_cutoff,
            lead_days,
            processed = %processed,
            "Computed order processed date"
        );
        Ok(processed)
    }
}

fn shift_days(moment: NaiveDateTime, days: u32) -> EngineResult<NaiveDateTime> {
    moment
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| EngineError::NoValidDay {
            calendar: PROCESSING_CALENDAR.to_string(),
            from: moment.date(),
            max_days: MAX_SCAN_DAYS,
        })
}
