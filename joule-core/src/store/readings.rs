//! Per-meter electricity reading storage

use crate::models::ElectricityReading;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage of electricity readings keyed by smart meter id.
///
/// Readings for a meter only ever grow; a store call appends to the existing
/// list under a single write lock so concurrent submissions don't lose data.
#[derive(Clone)]
pub struct ReadingStore {
    inner: Arc<RwLock<HashMap<String, Vec<ElectricityReading>>>>,
}

impl ReadingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Append readings for a smart meter, creating the entry on first write
    pub async fn store(&self, smart_meter_id: &str, readings: Vec<ElectricityReading>) {
        let mut map = self.inner.write().await;
        map.entry(smart_meter_id.to_string())
            .or_insert_with(Vec::new)
            .extend(readings);
    }

    /// Readings for a smart meter, or `None` when the meter is unknown
    pub async fn get(&self, smart_meter_id: &str) -> Option<Vec<ElectricityReading>> {
        let map = self.inner.read().await;
        map.get(smart_meter_id).cloned()
    }

    /// Number of readings stored for a smart meter
    pub async fn reading_count(&self, smart_meter_id: &str) -> usize {
        let map = self.inner.read().await;
        map.get(smart_meter_id).map(|v| v.len()).unwrap_or(0)
    }

    /// All smart meter ids with stored readings
    pub async fn meter_ids(&self) -> Vec<String> {
        let map = self.inner.read().await;
        map.keys().cloned().collect()
    }
}

impl Default for ReadingStore {
    fn default() -> Self {
        Self::new()
    }
}
