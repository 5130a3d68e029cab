//! Flat tariff storage

use crate::models::Tariff;
use std::sync::Arc;

/// Immutable list of flat tariffs, fixed at seeding time.
#[derive(Clone)]
pub struct TariffStore {
    inner: Arc<Vec<Tariff>>,
}

impl TariffStore {
    pub fn new(tariffs: Vec<Tariff>) -> Self {
        Self {
            inner: Arc::new(tariffs),
        }
    }

    /// All tariffs, in seeding order
    pub fn all(&self) -> &[Tariff] {
        &self.inner
    }
}

impl Default for TariffStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
