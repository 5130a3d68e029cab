//! Tariff comparison and account cost calculation

use crate::models::{MeterData, Tariff};
use crate::service::pricing;
use crate::store::{AccountStore, PlanStore, ReadingStore, TariffStore};
use chrono::{Duration, Utc};
use thiserror::Error;

/// Errors from account-based cost calculation
#[derive(Debug, Error)]
pub enum CostError {
    #[error("no readings stored for smart meter {0}")]
    UnknownMeter(String),

    #[error("smart meter {0} has no price plan account")]
    NoPlanAccount(String),

    #[error("price plan {0} does not exist")]
    UnknownPlan(String),
}

/// Prices posted meter data against flat tariffs and computes account costs.
#[derive(Clone)]
pub struct CostService {
    tariffs: TariffStore,
    plans: PlanStore,
    accounts: AccountStore,
    readings: ReadingStore,
}

impl CostService {
    pub fn new(
        tariffs: TariffStore,
        plans: PlanStore,
        accounts: AccountStore,
        readings: ReadingStore,
    ) -> Self {
        Self {
            tariffs,
            plans,
            accounts,
            readings,
        }
    }

    /// Cost of the posted batch under a single tariff: consumption times the
    /// tariff's unit rate.
    pub fn tariff_cost(meter_data: &MeterData, tariff: &Tariff) -> f64 {
        meter_data.consumption() * tariff.unit_rate
    }

    /// Cost of the posted batch under every known tariff, in tariff order.
    pub fn compare_tariffs(&self, meter_data: &MeterData) -> Vec<f64> {
        self.tariffs
            .all()
            .iter()
            .map(|tariff| Self::tariff_cost(meter_data, tariff))
            .collect()
    }

    /// Cost of the meter's readings from the past seven days, priced with the
    /// plan the meter's account is on.
    pub async fn last_week_cost(&self, smart_meter_id: &str) -> Result<f64, CostError> {
        let readings = self
            .readings
            .get(smart_meter_id)
            .await
            .ok_or_else(|| CostError::UnknownMeter(smart_meter_id.to_string()))?;

        let plan_id = self
            .accounts
            .plan_id_for(smart_meter_id)
            .await
            .ok_or_else(|| CostError::NoPlanAccount(smart_meter_id.to_string()))?;
        let plan = self
            .plans
            .by_name(&plan_id)
            .await
            .ok_or(CostError::UnknownPlan(plan_id))?;

        let now = Utc::now();
        let cutoff = now - Duration::days(7);
        let recent: Vec<_> = readings.into_iter().filter(|r| r.time >= cutoff).collect();

        Ok(pricing::consumption_cost(&recent, &plan, now.naive_utc()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElectricityReading, PricePlan};
    use chrono::TimeZone;

    fn reading_at(secs: i64, kw: f64) -> ElectricityReading {
        ElectricityReading::new(Utc.timestamp_opt(secs, 0).unwrap(), kw)
    }

    fn meter_data() -> MeterData {
        MeterData {
            user_id: "user-1".to_string(),
            electricity_readings: vec![reading_at(0, 10.0), reading_at(60, 25.0)],
        }
    }

    #[test]
    fn test_tariff_cost_is_consumption_times_rate() {
        let tariff = Tariff::new("The Green Eco", 2.0);
        assert_eq!(CostService::tariff_cost(&meter_data(), &tariff), 30.0);
    }

    #[test]
    fn test_compare_tariffs_prices_every_tariff() {
        let service = CostService::new(
            TariffStore::new(vec![
                Tariff::new("Dr Evil's Dark Energy", 10.0),
                Tariff::new("Power for Everyone", 1.0),
            ]),
            PlanStore::default(),
            AccountStore::default(),
            ReadingStore::default(),
        );
        assert_eq!(service.compare_tariffs(&meter_data()), vec![150.0, 15.0]);
    }

    #[tokio::test]
    async fn test_last_week_cost_requires_stored_readings() {
        let service = CostService::new(
            TariffStore::default(),
            PlanStore::default(),
            AccountStore::default(),
            ReadingStore::default(),
        );
        let err = service.last_week_cost("smart-meter-9").await.unwrap_err();
        assert!(matches!(err, CostError::UnknownMeter(_)));
    }

    #[tokio::test]
    async fn test_last_week_cost_requires_plan_account() {
        let readings = ReadingStore::new();
        readings.store("smart-meter-0", vec![reading_at(0, 1.0)]).await;
        let service = CostService::new(
            TariffStore::default(),
            PlanStore::default(),
            AccountStore::default(),
            readings,
        );
        let err = service.last_week_cost("smart-meter-0").await.unwrap_err();
        assert!(matches!(err, CostError::NoPlanAccount(_)));
    }

    #[tokio::test]
    async fn test_last_week_cost_prices_recent_readings() {
        let now = Utc::now();
        let readings = ReadingStore::new();
        readings
            .store(
                "smart-meter-0",
                vec![
                    // old reading outside the window
                    ElectricityReading::new(now - Duration::days(30), 100.0),
                    ElectricityReading::new(now - Duration::hours(2), 10.0),
                    ElectricityReading::new(now - Duration::hours(1), 20.0),
                ],
            )
            .await;
        let accounts = AccountStore::new();
        accounts.assign("smart-meter-0", "price-plan-2").await;
        let service = CostService::new(
            TariffStore::default(),
            PlanStore::new(vec![PricePlan::new("price-plan-2", "Power for Everyone", 1.0)]),
            accounts,
            readings,
        );

        // average 15 kW over one hour at rate 1
        let cost = service.last_week_cost("smart-meter-0").await.unwrap();
        assert!((cost - 15.0).abs() < 1e-6);
    }
}
