//! Holiday exclusion lists.
//!
//! An [`ExclusionSet`] holds calendar dates that are never valid for
//! processing or delivery, whatever their weekday. Stores keep two of them,
//! one for their own holidays and one for the carrier's.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// A raw exclusion row as entered by a store administrator.
///
/// Both fields are optional at this stage; rows without a readable date
/// are dropped when building an [`ExclusionSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionEntry {
    /// The excluded date, as `YYYY-MM-DD` or `DD/MM/YYYY`.
    #[serde(default)]
    pub date: Option<String>,
    /// Free-text annotation, e.g. the holiday name.
    #[serde(default)]
    pub content: Option<String>,
}

impl ExclusionEntry {
    /// Creates an entry with a date and annotation.
    pub fn new(date: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            content: Some(content.into()),
        }
    }
}

/// A normalized set of excluded dates at day granularity.
///
/// # Example
///
/// ```
/// use delivery_date_engine::models::{ExclusionEntry, ExclusionSet};
/// use chrono::NaiveDate;
///
/// let set = ExclusionSet::from_entries(
///     [
///         ExclusionEntry::new("2022-04-18", "Easter Monday"),
///         ExclusionEntry::new("25/12/2022", "Christmas"),
///         ExclusionEntry::default(),
///     ],
///     "processing",
/// );
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(NaiveDate::from_ymd_opt(2022, 12, 25).unwrap()));
/// assert_eq!(
///     set.annotation(NaiveDate::from_ymd_opt(2022, 4, 18).unwrap()),
///     Some("Easter Monday")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExclusionSet {
    dates: BTreeMap<NaiveDate, Option<String>>,
}

impl ExclusionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw rows, skipping any row whose date is missing
    /// or unreadable.
    ///
    /// `list` names the list being built and only appears in the warning
    /// emitted for skipped rows.
    pub fn from_entries<I: IntoIterator<Item = ExclusionEntry>>(entries: I, list: &str) -> Self {
        let mut set = Self::new();
        for entry in entries {
            let Some(raw) = entry.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) else {
                warn!(list, "Skipping excluded date row without a date");
                continue;
            };
            match Self::parse_date(raw) {
                Ok(date) => set.insert(date, entry.content),
                Err(err) => warn!(list, error = %err, "Skipping unreadable excluded date"),
            }
        }
        set
    }

    /// Parses an excluded date in `YYYY-MM-DD` or admin-grid `DD/MM/YYYY` form.
    pub fn parse_date(value: &str) -> EngineResult<NaiveDate> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
            .map_err(|_| EngineError::InvalidDate {
                value: value.to_string(),
            })
    }

    /// Adds a date. A later annotation for the same date replaces an earlier one.
    pub fn insert(&mut self, date: NaiveDate, annotation: Option<String>) {
        self.dates.insert(date, annotation);
    }

    /// Returns true if the date is excluded.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains_key(&date)
    }

    /// Returns the annotation recorded for an excluded date, if any.
    pub fn annotation(&self, date: NaiveDate) -> Option<&str> {
        self.dates.get(&date).and_then(|a| a.as_deref())
    }

    /// Number of excluded dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Excluded dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.keys().copied()
    }
}

impl FromIterator<NaiveDate> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().map(|date| (date, None)).collect(),
        }
    }
}
