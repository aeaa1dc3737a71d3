//! Weekday calendars for processing and delivery.
//!
//! A [`WorkCalendar`] records which weekdays a store processes orders on, or
//! which weekdays its carrier delivers on. Weekdays are addressed by their
//! storefront index: `0` is Sunday and `6` is Saturday.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Highest valid weekday index (Saturday).
pub const MAX_WEEKDAY_INDEX: u8 = 6;

/// A set of weekdays on which work or delivery happens.
///
/// Stored as a seven-bit mask indexed from Sunday. An empty calendar is
/// representable, but any scan for a next valid day over it fails.
///
/// # Example
///
/// ```
/// use delivery_date_engine::models::WorkCalendar;
/// use chrono::Weekday;
///
/// let calendar = WorkCalendar::parse("1,2,3,4,5");
/// assert!(calendar.contains(Weekday::Mon));
/// assert!(!calendar.contains(Weekday::Sun));
/// assert_eq!(calendar.indices(), vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", from = "Vec<u8>")]
pub struct WorkCalendar {
    mask: u8,
}

impl WorkCalendar {
    /// A calendar with no valid days.
    pub const fn empty() -> Self {
        Self { mask: 0 }
    }

    /// A calendar where every day of the week is valid.
    pub const fn every_day() -> Self {
        Self { mask: 0b111_1111 }
    }

    /// Monday through Friday.
    pub const fn weekdays() -> Self {
        Self { mask: 0b011_1110 }
    }

    /// Builds a calendar from chrono weekdays.
    pub fn from_weekdays<I: IntoIterator<Item = Weekday>>(weekdays: I) -> Self {
        let mask = weekdays
            .into_iter()
            .fold(0u8, |mask, day| mask | bit(day.num_days_from_sunday() as u8));
        Self { mask }
    }

    /// Builds a calendar from storefront weekday indices.
    ///
    /// Indices above [`MAX_WEEKDAY_INDEX`] are dropped with a warning.
    pub fn from_indices<I: IntoIterator<Item = u8>>(indices: I) -> Self {
        let mut mask = 0u8;
        for index in indices {
            if index > MAX_WEEKDAY_INDEX {
                warn!(index, "Ignoring out-of-range weekday index");
                continue;
            }
            mask |= bit(index);
        }
        Self { mask }
    }

    /// Parses a comma-delimited list of weekday indices such as `"1,2,3,4,5"`.
    ///
    /// Blank tokens are ignored. Tokens that are not integers in `0..=6`
    /// are skipped with a warning, so a partially broken setting still
    /// yields the days that could be read.
    pub fn parse(value: &str) -> Self {
        let mut mask = 0u8;
        for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<u8>() {
                Ok(index) if index <= MAX_WEEKDAY_INDEX => mask |= bit(index),
                _ => warn!(token, "Skipping invalid weekday token"),
            }
        }
        Self { mask }
    }

    /// Returns true if the weekday is part of this calendar.
    pub fn contains(&self, weekday: Weekday) -> bool {
        self.contains_index(weekday.num_days_from_sunday() as u8)
    }

    /// Returns true if the storefront weekday index is part of this calendar.
    pub fn contains_index(&self, index: u8) -> bool {
        index <= MAX_WEEKDAY_INDEX && self.mask & bit(index) != 0
    }

    /// Returns true if no weekday is valid.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Number of valid weekdays.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Valid weekday indices in ascending order (Sunday first).
    pub fn indices(&self) -> Vec<u8> {
        (0..=MAX_WEEKDAY_INDEX)
            .filter(|&index| self.contains_index(index))
            .collect()
    }
}

fn bit(index: u8) -> u8 {
    1 << index
}

impl From<Vec<u8>> for WorkCalendar {
    fn from(indices: Vec<u8>) -> Self {
        Self::from_indices(indices)
    }
}

impl From<WorkCalendar> for Vec<u8> {
    fn from(calendar: WorkCalendar) -> Self {
        calendar.indices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weekday_list() {
        let calendar = WorkCalendar::parse("1,2,3,4,5");
        assert_eq!(calendar, WorkCalendar::weekdays());
        assert_eq!(calendar.len(), 5);
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_blank_tokens() {
        let calendar = WorkCalendar::parse(" 0, 6 ,,");
        assert_eq!(calendar.indices(), vec![0, 6]);
    }

    #[test]
    fn test_parse_skips_invalid_tokens() {
        let calendar = WorkCalendar::parse("1,seven,7,-1,3");
        assert_eq!(calendar.indices(), vec![1, 3]);
    }

    #[test]
    fn test_parse_empty_string_is_empty_calendar() {
        assert!(WorkCalendar::parse("").is_empty());
    }

    #[test]
    fn test_sunday_is_index_zero() {
        let calendar = WorkCalendar::from_indices([0]);
        assert!(calendar.contains(Weekday::Sun));
        assert!(!calendar.contains(Weekday::Mon));
    }

    #[test]
    fn test_from_weekdays_matches_indices() {
        let calendar = WorkCalendar::from_weekdays([Weekday::Tue, Weekday::Sat]);
        assert_eq!(calendar, WorkCalendar::from_indices([2, 6]));
    }

    #[test]
    fn test_from_indices_drops_out_of_range() {
        let calendar = WorkCalendar::from_indices([1, 9]);
        assert_eq!(calendar.indices(), vec![1]);
    }

    #[test]
    fn test_every_day_contains_all_weekdays() {
        let calendar = WorkCalendar::every_day();
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert!(calendar.contains(day), "{day} should be valid");
        }
    }

    #[test]
    fn test_contains_index_rejects_out_of_range() {
        assert!(!WorkCalendar::every_day().contains_index(7));
    }

    #[test]
    fn test_serializes_as_index_list() {
        let json = serde_json::to_string(&WorkCalendar::from_indices([5, 1])).unwrap();
        assert_eq!(json, "[1,5]");

        let calendar: WorkCalendar = serde_json::from_str("[2,4]").unwrap();
        assert_eq!(calendar.indices(), vec![2, 4]);
    }
}
