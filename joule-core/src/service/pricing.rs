//! Price plan comparison and recommendation
//!
//! Costs follow the consumption model of the original tariff engine: the
//! average power draw over the submitted window divided by the elapsed hours,
//! priced at the plan's effective unit rate at calculation time.

use crate::models::{ElectricityReading, PricePlan};
use crate::store::{PlanStore, ReadingStore};
use chrono::{NaiveDateTime, Utc};
use std::collections::BTreeMap;

/// Compares the cost of a meter's stored readings across all price plans.
#[derive(Clone)]
pub struct PricePlanService {
    plans: PlanStore,
    readings: ReadingStore,
}

impl PricePlanService {
    pub fn new(plans: PlanStore, readings: ReadingStore) -> Self {
        Self { plans, readings }
    }

    /// Consumption cost of the meter's readings under every plan, keyed by
    /// plan name. `None` when the meter has no stored readings.
    pub async fn cost_for_each_plan(&self, smart_meter_id: &str) -> Option<BTreeMap<String, f64>> {
        let readings = self.readings.get(smart_meter_id).await?;
        let at = Utc::now().naive_utc();

        let mut costs = BTreeMap::new();
        for plan in self.plans.all().await {
            let cost = consumption_cost(&readings, &plan, at);
            costs.insert(plan.plan_name, cost);
        }
        Some(costs)
    }

    /// Cheapest plans first. Ties keep plan-name order. `None` when the meter
    /// has no stored readings.
    pub async fn recommend(
        &self,
        smart_meter_id: &str,
        limit: Option<usize>,
    ) -> Option<Vec<(String, f64)>> {
        let costs = self.cost_for_each_plan(smart_meter_id).await?;

        let mut recommendations: Vec<(String, f64)> = costs.into_iter().collect();
        recommendations.sort_by(|a, b| a.1.total_cmp(&b.1));
        if let Some(limit) = limit {
            recommendations.truncate(limit);
        }
        Some(recommendations)
    }
}

/// Cost of a set of readings under a plan at the given moment.
///
/// Average reading divided by elapsed hours, multiplied by the plan's
/// effective unit rate. Zero when the readings span no time at all.
pub fn consumption_cost(readings: &[ElectricityReading], plan: &PricePlan, at: NaiveDateTime) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    let average: f64 =
        readings.iter().map(|r| r.reading).sum::<f64>() / readings.len() as f64;

    let first = readings.iter().map(|r| r.time).min();
    let last = readings.iter().map(|r| r.time).max();
    let elapsed_hours = match (first, last) {
        (Some(first), Some(last)) => (last - first).num_seconds() as f64 / 3600.0,
        _ => 0.0,
    };
    if elapsed_hours == 0.0 {
        return 0.0;
    }

    (average / elapsed_hours) * plan.price(at)
}
