//! Store configuration types.
//!
//! This module contains the raw configuration structures deserialized from
//! a store's YAML file, and their resolution into typed
//! [`DeliverySettings`].
//!
//! Store settings are entered by hand through an admin screen, so every
//! field is optional and leniently typed: flags may be `true` or `"1"`,
//! counts may be `2` or `"2"`. Anything that cannot be read is replaced by
//! its default and logged, never rejected. Each lenient type therefore ends
//! with an `Other` variant that accepts any YAML value.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::warn;

use crate::models::{
    CarrierSettings, Cutoff, DeliverySettings, ExclusionEntry, ExclusionSet, MAX_WEEKDAY_INDEX,
    ProcessingSettings, WorkCalendar,
};
use crate::scheduling::MAX_SCAN_DAYS;

/// Key of the placeholder row the admin grid adds to serialized lists.
const EMPTY_ROW_KEY: &str = "__empty";

/// A boolean setting as it may appear in a store file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A YAML boolean.
    Bool(bool),
    /// A number; anything but zero is true.
    Int(i64),
    /// Text such as `"1"`, `"0"`, `"yes"` or `"off"`.
    Text(String),
    /// Any other value, e.g. `1.0` or a list.
    Other(serde_yaml::Value),
}

impl FlagValue {
    /// Reads the flag. Non-zero numbers count as true, unrecognized text
    /// and other values as false.
    pub fn to_bool(&self, field: &str) -> bool {
        match self {
            FlagValue::Bool(value) => *value,
            FlagValue::Int(value) => *value != 0,
            FlagValue::Other(serde_yaml::Value::Number(number)) => {
                number.as_f64().is_some_and(|value| value != 0.0)
            }
            FlagValue::Other(serde_yaml::Value::Null) => false,
            FlagValue::Other(value) => {
                warn!(field, ?value, "Unrecognized flag value, treating as false");
                false
            }
            FlagValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "" | "0" | "false" | "no" | "off" => false,
                _ => {
                    warn!(field, value = %text, "Unrecognized flag value, treating as false");
                    false
                }
            },
        }
    }
}

/// A day-count setting as it may appear in a store file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CountValue {
    /// A YAML integer.
    Int(i64),
    /// An integer written as text.
    Text(String),
    /// Any other value, e.g. `1.5`.
    Other(serde_yaml::Value),
}

impl CountValue {
    /// Reads the count. Negative or unreadable values become zero, and
    /// counts above [`MAX_SCAN_DAYS`] are capped.
    pub fn to_days(&self, field: &str) -> u32 {
        let parsed = match self {
            CountValue::Int(value) => Some(*value),
            CountValue::Text(text) => text.trim().parse::<i64>().ok(),
            CountValue::Other(_) => None,
        };
        match parsed.map(u32::try_from) {
            Some(Ok(days)) if days > MAX_SCAN_DAYS => {
                warn!(field, days, max_days = MAX_SCAN_DAYS, "Day count too large, capping");
                MAX_SCAN_DAYS
            }
            Some(Ok(days)) => days,
            _ => {
                warn!(field, value = ?self, "Invalid day count, using 0");
                0
            }
        }
    }
}

/// A weekday list setting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WeekdayList {
    /// Comma-delimited indices, e.g. `"1,2,3,4,5"`.
    Delimited(String),
    /// A single index.
    Single(i64),
    /// A YAML sequence of indices, written as numbers or text.
    Indices(Vec<serde_yaml::Value>),
    /// Any other value.
    Other(serde_yaml::Value),
}

impl WeekdayList {
    /// Builds the calendar, skipping indices outside `0..=6` and list
    /// items that are not integers.
    pub fn to_calendar(&self) -> WorkCalendar {
        match self {
            WeekdayList::Delimited(text) => WorkCalendar::parse(text),
            WeekdayList::Single(index) => indices_to_calendar(std::slice::from_ref(index)),
            WeekdayList::Indices(items) => {
                let indices: Vec<i64> = items.iter().filter_map(weekday_item).collect();
                indices_to_calendar(&indices)
            }
            WeekdayList::Other(value) => {
                warn!(?value, "Unreadable weekday list, using no days");
                WorkCalendar::default()
            }
        }
    }
}

fn weekday_item(item: &serde_yaml::Value) -> Option<i64> {
    let index = match item {
        serde_yaml::Value::Number(number) => number.as_i64(),
        serde_yaml::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    if index.is_none() {
        warn!(?item, "Skipping unreadable weekday");
    }
    index
}

fn indices_to_calendar(indices: &[i64]) -> WorkCalendar {
    let valid = indices.iter().filter_map(|&index| {
        let weekday = u8::try_from(index).ok().filter(|i| *i <= MAX_WEEKDAY_INDEX);
        if weekday.is_none() {
            warn!(index, "Skipping invalid weekday index");
        }
        weekday
    });
    WorkCalendar::from_indices(valid)
}

/// An excluded-dates setting.
///
/// Accepts a YAML list of `{date, content}` rows, the same rows keyed by
/// row id, or the admin grid's serialized JSON string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExcludedDates {
    /// JSON as saved by the admin grid, e.g.
    /// `{"_1650":{"date":"2022-04-18","content":"Easter"},"__empty":""}`.
    Serialized(String),
    /// A YAML sequence of rows.
    Rows(Vec<serde_yaml::Value>),
    /// YAML rows keyed by row id.
    Keyed(BTreeMap<String, serde_yaml::Value>),
    /// Any other value.
    Other(serde_yaml::Value),
}

impl ExcludedDates {
    /// Extracts the raw rows. Rows are not validated here; see
    /// [`ExclusionSet::from_entries`].
    pub fn entries(&self, list: &str) -> Vec<ExclusionEntry> {
        match self {
            ExcludedDates::Serialized(raw) => serialized_entries(raw, list),
            ExcludedDates::Rows(rows) => rows.iter().map(yaml_entry).collect(),
            ExcludedDates::Keyed(rows) => rows
                .iter()
                .filter(|(key, _)| key.as_str() != EMPTY_ROW_KEY)
                .map(|(_, row)| yaml_entry(row))
                .collect(),
            ExcludedDates::Other(serde_yaml::Value::Null) => Vec::new(),
            ExcludedDates::Other(value) => {
                warn!(list, ?value, "Ignoring excluded dates that are not a list");
                Vec::new()
            }
        }
    }

    /// Builds the normalized exclusion set.
    pub fn to_exclusion_set(&self, list: &str) -> ExclusionSet {
        ExclusionSet::from_entries(self.entries(list), list)
    }
}

fn yaml_entry(row: &serde_yaml::Value) -> ExclusionEntry {
    ExclusionEntry {
        date: row.get("date").and_then(serde_yaml::Value::as_str).map(str::to_string),
        content: row
            .get("content")
            .and_then(serde_yaml::Value::as_str)
            .map(str::to_string),
    }
}

fn json_entry(row: &serde_json::Value) -> ExclusionEntry {
    ExclusionEntry {
        date: row.get("date").and_then(serde_json::Value::as_str).map(str::to_string),
        content: row
            .get("content")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
    }
}

fn serialized_entries(raw: &str, list: &str) -> Vec<ExclusionEntry> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(list, error = %err, "Ignoring unreadable serialized excluded dates");
            return Vec::new();
        }
    };

    match value {
        serde_json::Value::Object(rows) => rows
            .iter()
            .filter(|(key, _)| key.as_str() != EMPTY_ROW_KEY)
            .map(|(_, row)| json_entry(row))
            .collect(),
        serde_json::Value::Array(rows) => rows.iter().map(json_entry).collect(),
        serde_json::Value::Null => Vec::new(),
        _ => {
            warn!(list, "Ignoring serialized excluded dates that are not a list");
            Vec::new()
        }
    }
}

/// General settings group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    /// Whether delivery date estimation is enabled.
    pub status: Option<FlagValue>,
}

/// Processing settings group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProcessingSection {
    /// Weekdays the store processes orders on.
    pub working_days: Option<WeekdayList>,
    /// Business days needed to process an order.
    pub days_needed_for_processing: Option<CountValue>,
    /// Same-day cutoff, `HH:MM:SS` or `HH,MM,SS`.
    pub process_order_today_time_limit: Option<serde_yaml::Value>,
    /// Store holidays.
    pub excluded_processing_dates: Option<ExcludedDates>,
}

/// Delivery settings group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeliverySection {
    /// Weekdays the carrier works on.
    pub delivery_days: Option<WeekdayList>,
    /// Business days the carrier needs.
    pub days_needed_for_delivery: Option<CountValue>,
    /// Whether to show a delivery window.
    pub enable_open_delivery_date: Option<FlagValue>,
    /// Length of the delivery window in carrier days.
    pub open_delivery_range_days: Option<CountValue>,
    /// Reuse the store holidays for the carrier.
    pub use_excluded_processing_dates_as_excluded_delivery_dates: Option<FlagValue>,
    /// Carrier holidays.
    pub excluded_delivery_dates: Option<ExcludedDates>,
}

/// Storefront display settings group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontendSection {
    /// Whether to show the cutoff time to shoppers.
    pub show_time_limit: Option<FlagValue>,
}

/// A store's configuration file.
///
/// # Example
///
/// ```
/// use delivery_date_engine::config::StoreConfig;
///
/// let yaml = r#"
/// general:
///   status: "1"
/// processing:
///   working_days: "1,2,3,4,5"
///   process_order_today_time_limit: "14,00,00"
/// delivery:
///   delivery_days: [1, 2, 3, 4, 5]
///   days_needed_for_delivery: 2
/// "#;
///
/// let config: StoreConfig = serde_yaml::from_str(yaml).unwrap();
/// let settings = config.resolve();
///
/// assert!(settings.enabled);
/// assert_eq!(settings.processing.cutoff.to_string(), "14:00:00");
/// assert_eq!(settings.carrier.lead_days, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Display name of the store.
    pub name: Option<String>,
    /// General settings.
    pub general: GeneralSection,
    /// Processing settings.
    pub processing: ProcessingSection,
    /// Delivery settings.
    pub delivery: DeliverySection,
    /// Storefront settings.
    pub frontend: FrontendSection,
}

impl StoreConfig {
    /// Resolves raw settings into typed [`DeliverySettings`].
    ///
    /// Missing values take their defaults: disabled, no work days, zero
    /// lead days, a `23:59:59` cutoff and no holidays.
    pub fn resolve(&self) -> DeliverySettings {
        let processing = ProcessingSettings {
            work_days: calendar(&self.processing.working_days),
            lead_days: days(
                &self.processing.days_needed_for_processing,
                "days_needed_for_processing",
            ),
            cutoff: self
                .processing
                .process_order_today_time_limit
                .as_ref()
                .map(cutoff)
                .unwrap_or_default(),
            excluded_dates: exclusions(
                &self.processing.excluded_processing_dates,
                "excluded_processing_dates",
            ),
        };

        let carrier = CarrierSettings {
            delivery_days: calendar(&self.delivery.delivery_days),
            lead_days: days(
                &self.delivery.days_needed_for_delivery,
                "days_needed_for_delivery",
            ),
            open_delivery_enabled: flag(
                &self.delivery.enable_open_delivery_date,
                "enable_open_delivery_date",
            ),
            open_delivery_range_days: days(
                &self.delivery.open_delivery_range_days,
                "open_delivery_range_days",
            ),
            use_processing_exclusions: flag(
                &self.delivery.use_excluded_processing_dates_as_excluded_delivery_dates,
                "use_excluded_processing_dates_as_excluded_delivery_dates",
            ),
            excluded_dates: exclusions(
                &self.delivery.excluded_delivery_dates,
                "excluded_delivery_dates",
            ),
        };

        DeliverySettings {
            enabled: flag(&self.general.status, "status"),
            show_cutoff_time: flag(&self.frontend.show_time_limit, "show_time_limit"),
            processing,
            carrier,
        }
    }
}

fn flag(value: &Option<FlagValue>, field: &str) -> bool {
    value.as_ref().is_some_and(|v| v.to_bool(field))
}

fn days(value: &Option<CountValue>, field: &str) -> u32 {
    value.as_ref().map_or(0, |v| v.to_days(field))
}

fn cutoff(value: &serde_yaml::Value) -> Cutoff {
    match value {
        serde_yaml::Value::String(text) => Cutoff::parse_or_default(text),
        serde_yaml::Value::Null => Cutoff::default(),
        other => {
            warn!(value = ?other, "Cutoff is not text, using default");
            Cutoff::default()
        }
    }
}

fn calendar(value: &Option<WeekdayList>) -> WorkCalendar {
    value.as_ref().map(WeekdayList::to_calendar).unwrap_or_default()
}

fn exclusions(value: &Option<ExcludedDates>, list: &str) -> ExclusionSet {
    value
        .as_ref()
        .map(|v| v.to_exclusion_set(list))
        .unwrap_or_default()
}
