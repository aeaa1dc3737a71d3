//! Same-day processing cutoff.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// The time of day before which an order can start processing the same day.
///
/// Defaults to `23:59:59`, i.e. effectively the end of the day.
///
/// # Example
///
/// ```
/// use delivery_date_engine::models::Cutoff;
/// use chrono::NaiveDate;
///
/// // The admin time picker stores "14,30,00"
/// let cutoff = Cutoff::parse("14,30,00").unwrap();
/// assert_eq!(cutoff.to_string(), "14:30:00");
///
/// let date = NaiveDate::from_ymd_opt(2022, 4, 18).unwrap();
/// assert_eq!(cutoff.on(date).to_string(), "2022-04-18 14:30:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cutoff(NaiveTime);

impl Cutoff {
    /// Wraps a time of day.
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Builds a cutoff from hour, minute and second. Returns `None` for an
    /// impossible time.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Parses `HH:MM:SS`, `HH,MM,SS` or `HH:MM`.
    pub fn parse(value: &str) -> EngineResult<Self> {
        let normalized = value.trim().replace(',', ":");
        NaiveTime::parse_from_str(&normalized, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&normalized, "%H:%M"))
            .map(Self)
            .map_err(|_| EngineError::InvalidCutoff {
                value: value.to_string(),
            })
    }

    /// Parses a configured cutoff, falling back to the end-of-day default
    /// when the value cannot be read.
    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|err| {
            warn!(error = %err, "Using default cutoff time");
            Self::default()
        })
    }

    /// The cutoff time of day.
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// The cutoff instant on the given date.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl Default for Cutoff {
    fn default() -> Self {
        Self(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

impl Serialize for Cutoff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
