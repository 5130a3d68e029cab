//! Demo electricity reading generation

use crate::models::ElectricityReading;
use chrono::{Duration, Utc};
use rand::Rng;

/// Generate `count` pseudo-random readings, 10 seconds apart and ending now,
/// sorted ascending by time. Values are non-negative kW rounded up to 4
/// decimal places.
pub fn generate(count: usize) -> Vec<ElectricityReading> {
    let now = Utc::now();
    let mut rng = rand::thread_rng();

    let mut readings: Vec<ElectricityReading> = (0..count)
        .map(|i| {
            let kw: f64 = rng.gen::<f64>() * 2.0;
            let rounded = (kw * 10_000.0).ceil() / 10_000.0;
            ElectricityReading::new(now - Duration::seconds(i as i64 * 10), rounded)
        })
        .collect();

    readings.sort_by_key(|r| r.time);
    readings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_count() {
        assert_eq!(generate(20).len(), 20);
        assert!(generate(0).is_empty());
    }

    #[test]
    fn test_readings_are_sorted_ascending() {
        let readings = generate(10);
        for pair in readings.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
    }

    #[test]
    fn test_readings_are_non_negative() {
        assert!(generate(50).iter().all(|r| r.reading >= 0.0));
    }

    #[test]
    fn test_readings_are_ten_seconds_apart() {
        let readings = generate(5);
        for pair in readings.windows(2) {
            assert_eq!((pair[1].time - pair[0].time).num_seconds(), 10);
        }
    }
}
