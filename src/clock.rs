//! Sources of the current time.
//!
//! The engine works on naive local timestamps. Converting a store's time
//! zone is left to whoever supplies the clock.

use chrono::{Local, NaiveDateTime};

/// Supplies "now" as a naive local timestamp.
pub trait Clock: Send + Sync {
    /// The current moment.
    fn now(&self) -> NaiveDateTime;
}

/// The host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at a fixed moment.
///
/// # Example
///
/// ```
/// use delivery_date_engine::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let moment = NaiveDate::from_ymd_opt(2022, 4, 18).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// assert_eq!(FixedClock::new(moment).now(), moment);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    /// Creates a clock that always reports `moment`.
    pub fn new(moment: NaiveDateTime) -> Self {
        Self(moment)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
