//! Day validity predicates and bounded day scans.
//!
//! The free functions [`is_valid_day`] and [`is_excluded`] are the pure
//! predicates both schedulers are built on. [`CalendarPolicy`] pairs a
//! calendar with an exclusion set and adds the scans that walk forward to
//! the next usable day.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use crate::error::{EngineError, EngineResult};
use crate::models::{ExclusionSet, WorkCalendar};

/// Maximum number of consecutive unusable days a scan will step over
/// before giving up.
pub const MAX_SCAN_DAYS: u32 = 3650;

/// Returns true if the weekday of `date` belongs to `calendar`.
///
/// Only the weekday is consulted; year, month and time of day are ignored.
///
/// # Example
///
/// ```
/// use delivery_date_engine::models::WorkCalendar;
/// use delivery_date_engine::scheduling::is_valid_day;
/// use chrono::NaiveDate;
///
/// // 2022-04-15 is a Friday
/// let friday = NaiveDate::from_ymd_opt(2022, 4, 15).unwrap();
/// assert!(is_valid_day(&friday, &WorkCalendar::from_indices([5])));
/// assert!(!is_valid_day(&friday, &WorkCalendar::from_indices([0, 1, 2, 3, 4, 6])));
/// ```
pub fn is_valid_day<D: Datelike>(date: &D, calendar: &WorkCalendar) -> bool {
    calendar.contains(date.weekday())
}

/// Returns true if the day of `date` is in `exclusions`.
///
/// Comparison happens at day granularity, so any time of day on an
/// excluded date is excluded.
///
/// # Example
///
/// ```
/// use delivery_date_engine::models::ExclusionSet;
/// use delivery_date_engine::scheduling::is_excluded;
/// use chrono::NaiveDate;
///
/// let holiday = NaiveDate::from_ymd_opt(2022, 4, 15).unwrap();
/// let exclusions: ExclusionSet = [holiday].into_iter().collect();
///
/// let evening = holiday.and_hms_opt(21, 30, 0).unwrap();
/// assert!(is_excluded(&evening, &exclusions));
/// ```
pub fn is_excluded<D: Datelike>(date: &D, exclusions: &ExclusionSet) -> bool {
    day_of(date).is_some_and(|day| exclusions.contains(day))
}

fn day_of<D: Datelike>(date: &D) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(date.num_days_from_ce())
}

/// A calendar and exclusion set evaluated together.
///
/// A day is *available* when it is a valid day of the calendar and not
/// excluded. The policy is a pair of borrows and is cheap to copy.
#[derive(Debug, Clone, Copy)]
pub struct CalendarPolicy<'a> {
    name: &'static str,
    calendar: &'a WorkCalendar,
    exclusions: &'a ExclusionSet,
}

impl<'a> CalendarPolicy<'a> {
    /// Creates a policy. `name` identifies the calendar in errors.
    pub fn new(name: &'static str, calendar: &'a WorkCalendar, exclusions: &'a ExclusionSet) -> Self {
        Self {
            name,
            calendar,
            exclusions,
        }
    }

    /// The calendar this policy checks weekdays against.
    pub fn calendar(&self) -> &'a WorkCalendar {
        self.calendar
    }

    /// The exclusion set this policy checks dates against.
    pub fn exclusions(&self) -> &'a ExclusionSet {
        self.exclusions
    }

    /// Returns true if the weekday of `moment` is in the calendar.
    pub fn is_valid_day(&self, moment: NaiveDateTime) -> bool {
        is_valid_day(&moment, self.calendar)
    }

    /// Returns true if the date of `moment` is excluded.
    pub fn is_excluded(&self, moment: NaiveDateTime) -> bool {
        is_excluded(&moment, self.exclusions)
    }

    /// Returns true if `moment` falls on a valid, non-excluded day.
    pub fn is_available(&self, moment: NaiveDateTime) -> bool {
        self.is_valid_day(moment) && !self.is_excluded(moment)
    }

    /// Finds the first available day on or after `from`, keeping its time of day.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoValidDay`] if the calendar is empty or no
    /// available day occurs within [`MAX_SCAN_DAYS`] days.
    pub fn next_available(&self, from: NaiveDateTime) -> EngineResult<NaiveDateTime> {
        self.ensure_not_empty(from)?;

        let mut candidate = from;
        for _ in 0..MAX_SCAN_DAYS {
            if self.is_available(candidate) {
                return Ok(candidate);
            }
            candidate = self.next_day(candidate, from)?;
        }
        Err(self.no_valid_day(from))
    }

    /// Steps forward from `from` one calendar day at a time until `count`
    /// available days have been passed, and returns the last of them.
    ///
    /// `from` itself never counts. A `count` of zero behaves like
    /// [`next_available`](Self::next_available).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoValidDay`] if the calendar is empty or more
    /// than [`MAX_SCAN_DAYS`] consecutive days are unavailable.
    pub fn advance_available_days(&self, from: NaiveDateTime, count: u32) -> EngineResult<NaiveDateTime> {
        if count == 0 {
            return self.next_available(from);
        }
        self.ensure_not_empty(from)?;

        let mut candidate = from;
        let mut remaining = count;
        let mut gap = 0u32;
        while remaining > 0 {
            candidate = self.next_day(candidate, from)?;
            if self.is_available(candidate) {
                remaining -= 1;
                gap = 0;
            } else {
                gap += 1;
                if gap >= MAX_SCAN_DAYS {
                    return Err(self.no_valid_day(from));
                }
            }
        }
        Ok(candidate)
    }

    fn ensure_not_empty(&self, from: NaiveDateTime) -> EngineResult<()> {
        if self.calendar.is_empty() {
            return Err(self.no_valid_day(from));
        }
        Ok(())
    }

    fn next_day(&self, moment: NaiveDateTime, from: NaiveDateTime) -> EngineResult<NaiveDateTime> {
        moment
            .checked_add_days(Days::new(1))
            .ok_or_else(|| self.no_valid_day(from))
    }

    fn no_valid_day(&self, from: NaiveDateTime) -> EngineError {
        EngineError::NoValidDay {
            calendar: self.name.to_string(),
            from: from.date(),
            max_days: MAX_SCAN_DAYS,
        }
    }
}
