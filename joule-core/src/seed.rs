//! Demo data seeding: plans, tariffs, accounts and generated readings

use crate::generator;
use crate::models::{PricePlan, Tariff};
use crate::store::{AccountStore, ReadingStore};

const DR_EVILS_DARK_ENERGY: &str = "Dr Evil's Dark Energy";
const THE_GREEN_ECO: &str = "The Green Eco";
const POWER_FOR_EVERYONE: &str = "Power for Everyone";

pub const MOST_EVIL_PRICE_PLAN_ID: &str = "price-plan-0";
pub const RENEWABLES_PRICE_PLAN_ID: &str = "price-plan-1";
pub const STANDARD_PRICE_PLAN_ID: &str = "price-plan-2";

/// The demo price plans
pub fn demo_plans() -> Vec<PricePlan> {
    vec![
        PricePlan::new(MOST_EVIL_PRICE_PLAN_ID, DR_EVILS_DARK_ENERGY, 10.0),
        PricePlan::new(RENEWABLES_PRICE_PLAN_ID, THE_GREEN_ECO, 2.0),
        PricePlan::new(STANDARD_PRICE_PLAN_ID, POWER_FOR_EVERYONE, 1.0),
    ]
}

/// One flat tariff per demo plan, same supplier and unit rate
pub fn demo_tariffs() -> Vec<Tariff> {
    demo_plans()
        .into_iter()
        .map(|p| Tariff::new(&p.energy_supplier, p.unit_rate))
        .collect()
}

/// Which demo smart meter is on which plan
pub fn demo_accounts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smart-meter-0", MOST_EVIL_PRICE_PLAN_ID),
        ("smart-meter-1", RENEWABLES_PRICE_PLAN_ID),
        ("smart-meter-2", MOST_EVIL_PRICE_PLAN_ID),
        ("smart-meter-3", STANDARD_PRICE_PLAN_ID),
        ("smart-meter-4", RENEWABLES_PRICE_PLAN_ID),
    ]
}

/// Seed the account mapping and generated readings for every demo meter
pub async fn seed_demo_data(
    readings: &ReadingStore,
    accounts: &AccountStore,
    readings_per_meter: usize,
) {
    for (meter_id, plan_id) in demo_accounts() {
        accounts.assign(meter_id, plan_id).await;
        readings
            .store(meter_id, generator::generate(readings_per_meter))
            .await;
    }
    tracing::info!(
        meters = demo_accounts().len(),
        readings_per_meter,
        "Seeded demo accounts and readings"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_plans_cover_three_suppliers() {
        let plans = demo_plans();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].unit_rate, 10.0);
        assert_eq!(plans[1].unit_rate, 2.0);
        assert_eq!(plans[2].unit_rate, 1.0);
    }

    #[test]
    fn test_demo_tariffs_mirror_plans() {
        let tariffs = demo_tariffs();
        assert_eq!(tariffs.len(), 3);
        assert_eq!(tariffs[0].supplier, "Dr Evil's Dark Energy");
        assert_eq!(tariffs[2].unit_rate, 1.0);
    }

    #[tokio::test]
    async fn test_seed_populates_every_demo_meter() {
        let readings = ReadingStore::new();
        let accounts = AccountStore::new();
        seed_demo_data(&readings, &accounts, 20).await;

        for (meter_id, plan_id) in demo_accounts() {
            assert_eq!(readings.reading_count(meter_id).await, 20);
            assert_eq!(accounts.plan_id_for(meter_id).await.as_deref(), Some(plan_id));
        }
    }
}
