//! Flat tariffs and posted meter data

use crate::models::ElectricityReading;
use serde::{Deserialize, Serialize};

/// A flat tariff: a supplier name and a price per kWh, no multipliers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    pub supplier: String,
    /// Price per kWh
    pub unit_rate: f64,
}

impl Tariff {
    pub fn new(supplier: &str, unit_rate: f64) -> Self {
        Self {
            supplier: supplier.to_string(),
            unit_rate,
        }
    }
}

/// A self-contained batch of readings posted for tariff comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterData {
    pub user_id: String,
    pub electricity_readings: Vec<ElectricityReading>,
}

impl MeterData {
    /// Consumption over the batch: the latest reading minus the earliest one.
    /// An empty batch consumes nothing.
    pub fn consumption(&self) -> f64 {
        let first = self
            .electricity_readings
            .iter()
            .min_by_key(|r| r.time)
            .map(|r| r.reading);
        let last = self
            .electricity_readings
            .iter()
            .max_by_key(|r| r.time)
            .map(|r| r.reading);
        match (first, last) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading_at(secs: i64, kw: f64) -> ElectricityReading {
        ElectricityReading::new(Utc.timestamp_opt(secs, 0).unwrap(), kw)
    }

    #[test]
    fn test_consumption_is_last_minus_first_by_time() {
        let data = MeterData {
            user_id: "user-1".to_string(),
            // deliberately out of order
            electricity_readings: vec![
                reading_at(20, 30.0),
                reading_at(0, 10.0),
                reading_at(10, 20.0),
            ],
        };
        assert_eq!(data.consumption(), 20.0);
    }

    #[test]
    fn test_consumption_of_empty_batch_is_zero() {
        let data = MeterData {
            user_id: "user-1".to_string(),
            electricity_readings: vec![],
        };
        assert_eq!(data.consumption(), 0.0);
    }

    #[test]
    fn test_consumption_of_single_reading_is_zero() {
        let data = MeterData {
            user_id: "user-1".to_string(),
            electricity_readings: vec![reading_at(0, 10.0)],
        };
        assert_eq!(data.consumption(), 0.0);
    }
}
