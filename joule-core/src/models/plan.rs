//! Price plan data structures
//!
//! A price plan is offered by an energy supplier and has a unit rate (price per
//! kWh) plus an optional list of peak time multipliers. Multipliers raise or
//! lower the effective unit rate on specific days of the week, optionally only
//! inside a date window.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Period of the day charged at a distinct rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodType {
    #[serde(rename = "PEAK")]
    Peak,
    #[serde(rename = "OFF_PEAK")]
    OffPeak,
}

/// Day of the week, serialized the way the public API spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(rename = "MONDAY")]
    Monday,
    #[serde(rename = "TUESDAY")]
    Tuesday,
    #[serde(rename = "WEDNESDAY")]
    Wednesday,
    #[serde(rename = "THURSDAY")]
    Thursday,
    #[serde(rename = "FRIDAY")]
    Friday,
    #[serde(rename = "SATURDAY")]
    Saturday,
    #[serde(rename = "SUNDAY")]
    Sunday,
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Serde helpers for the `"yyyy-MM-dd HH:mm:ss"` wire format of multiplier windows
mod window_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => NaiveDateTime::parse_from_str(&text, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// A rate multiplier applied on one day of the week, optionally limited to a
/// date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakTimeMultiplier {
    pub period: PeriodType,
    pub day_of_week: DayOfWeek,
    pub multiplier: f64,
    #[serde(default, with = "window_format", skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<NaiveDateTime>,
    #[serde(default, with = "window_format", skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<NaiveDateTime>,
}

impl PeakTimeMultiplier {
    /// Whether this multiplier applies at the given moment: the weekday must
    /// match, and when a date window is set the moment must fall inside it.
    pub fn applies_at(&self, at: NaiveDateTime) -> bool {
        if self.day_of_week != DayOfWeek::from(at.weekday()) {
            return false;
        }
        match (self.start_date_time, self.end_date_time) {
            (Some(start), Some(end)) => at >= start && at <= end,
            (Some(start), None) => at >= start,
            (None, Some(end)) => at <= end,
            (None, None) => true,
        }
    }
}

/// A price plan offered by an energy supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePlan {
    pub plan_name: String,
    pub energy_supplier: String,
    /// Unit price per kWh
    pub unit_rate: f64,
    #[serde(default)]
    pub peak_time_multipliers: Vec<PeakTimeMultiplier>,
}

impl PricePlan {
    /// Create a plan without multipliers
    pub fn new(plan_name: &str, energy_supplier: &str, unit_rate: f64) -> Self {
        Self {
            plan_name: plan_name.to_string(),
            energy_supplier: energy_supplier.to_string(),
            unit_rate,
            peak_time_multipliers: Vec::new(),
        }
    }

    /// Effective unit price at the given moment. The first multiplier that
    /// applies wins; without one the flat unit rate is charged.
    pub fn price(&self, at: NaiveDateTime) -> f64 {
        self.peak_time_multipliers
            .iter()
            .find(|m| m.applies_at(at))
            .map(|m| self.unit_rate * m.multiplier)
            .unwrap_or(self.unit_rate)
    }
}
