//! Electricity reading data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single electricity reading: a timestamp and a power value in kilowatts (kW).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricityReading {
    /// Timestamp of the sample
    pub time: DateTime<Utc>,
    /// Power value in kW
    pub reading: f64,
}

impl ElectricityReading {
    /// Create a new reading
    pub fn new(time: DateTime<Utc>, reading: f64) -> Self {
        Self { time, reading }
    }
}

/// A batch of readings submitted for one smart meter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterReadings {
    /// Identifier of the smart meter the readings belong to
    pub smart_meter_id: String,
    /// The readings being submitted
    pub electricity_readings: Vec<ElectricityReading>,
}

impl MeterReadings {
    /// A batch is valid when it names a meter and carries at least one reading.
    pub fn is_valid(&self) -> bool {
        !self.smart_meter_id.is_empty() && !self.electricity_readings.is_empty()
    }
}
