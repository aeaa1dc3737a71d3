//! Estimation results.
//!
//! This module contains the [`DeliveryEstimate`] produced by the carrier
//! side and the [`OrderSchedule`] that wraps it with the processing result.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Shipping and delivery dates for a processed order.
///
/// `delivery_dates` holds one date, or two when the open delivery window
/// is enabled: the earliest date first and the latest date of the
/// inclusive window second.
///
/// # Example
///
/// ```
/// use delivery_date_engine::models::DeliveryEstimate;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2022, 4, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let estimate = DeliveryEstimate {
///     shipping_date: day(18),
///     open_delivery: true,
///     delivery_dates: vec![day(25), day(26)],
/// };
///
/// assert_eq!(estimate.earliest(), Some(day(25)));
/// assert_eq!(estimate.latest(), Some(day(26)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    /// The day the carrier picks the order up.
    pub shipping_date: NaiveDateTime,
    /// Whether the open delivery window was applied.
    pub open_delivery: bool,
    /// The delivery date, or the window bounds in ascending order.
    pub delivery_dates: Vec<NaiveDateTime>,
}

impl DeliveryEstimate {
    /// The earliest delivery date.
    pub fn earliest(&self) -> Option<NaiveDateTime> {
        self.delivery_dates.first().copied()
    }

    /// The latest delivery date; equals [`earliest`](Self::earliest) without a window.
    pub fn latest(&self) -> Option<NaiveDateTime> {
        self.delivery_dates.last().copied()
    }
}

/// The full schedule of an order, from placement to delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSchedule {
    /// When the order was placed.
    pub order_time: NaiveDateTime,
    /// When processing completes.
    pub processed_date: NaiveDateTime,
    /// Shipping and delivery dates.
    pub estimate: DeliveryEstimate,
}
