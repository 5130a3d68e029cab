//! Price plan storage

use crate::models::{PeakTimeMultiplier, PricePlan};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory list of the price plans on offer. Plans are seeded at startup;
/// peak time multipliers may be attached to them afterwards through the API.
#[derive(Clone)]
pub struct PlanStore {
    inner: Arc<RwLock<Vec<PricePlan>>>,
}

impl PlanStore {
    pub fn new(plans: Vec<PricePlan>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(plans)),
        }
    }

    /// All plans, in seeding order
    pub async fn all(&self) -> Vec<PricePlan> {
        let plans = self.inner.read().await;
        plans.clone()
    }

    /// Plan with the given name, if any
    pub async fn by_name(&self, plan_name: &str) -> Option<PricePlan> {
        let plans = self.inner.read().await;
        plans.iter().find(|p| p.plan_name == plan_name).cloned()
    }

    /// Attach a peak time multiplier to the named plan. Unknown plan names are
    /// ignored.
    pub async fn add_peak_time_multiplier(&self, plan_name: &str, multiplier: PeakTimeMultiplier) {
        let mut plans = self.inner.write().await;
        if let Some(plan) = plans.iter_mut().find(|p| p.plan_name == plan_name) {
            plan.peak_time_multipliers.push(multiplier);
        }
    }
}

impl Default for PlanStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
