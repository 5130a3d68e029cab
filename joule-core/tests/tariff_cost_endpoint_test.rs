//! Endpoint tests for tariff comparison, last-week costs and the health check

use chrono::{Duration, Utc};
use joule_core::models::{ElectricityReading, MeterData};
use joule_core::seed;
use joule_core::server::api::create_api_routes;
use joule_core::store::{AccountStore, PlanStore, ReadingStore, TariffStore};
use serde_json::Value;

const TOLERANCE: f64 = 1e-6;

fn seeded_routes(
    readings: ReadingStore,
    accounts: AccountStore,
) -> impl warp::Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
    create_api_routes(
        readings,
        accounts,
        PlanStore::new(seed::demo_plans()),
        TariffStore::new(seed::demo_tariffs()),
    )
}

#[tokio::test]
async fn compare_tariffs_prices_the_posted_batch() {
    let routes = seeded_routes(ReadingStore::new(), AccountStore::new());

    let now = Utc::now();
    let batch = MeterData {
        user_id: "user-1".to_string(),
        electricity_readings: vec![
            ElectricityReading::new(now - Duration::minutes(1), 10.0),
            ElectricityReading::new(now, 25.0),
        ],
    };

    let response = warp::test::request()
        .method("POST")
        .path("/tariffs/compare-all")
        .json(&batch)
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    // consumption of 15 priced at rates 10, 2 and 1
    let costs: Vec<f64> = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(costs, vec![150.0, 30.0, 15.0]);
}

#[tokio::test]
async fn last_week_cost_prices_recent_readings() {
    let now = Utc::now();
    let readings = ReadingStore::new();
    readings
        .store(
            "smart-meter-3",
            vec![
                ElectricityReading::new(now - Duration::days(30), 100.0),
                ElectricityReading::new(now - Duration::hours(2), 10.0),
                ElectricityReading::new(now - Duration::hours(1), 20.0),
            ],
        )
        .await;
    let accounts = AccountStore::new();
    accounts
        .assign("smart-meter-3", seed::STANDARD_PRICE_PLAN_ID)
        .await;
    let routes = seeded_routes(readings, accounts);

    let response = warp::test::request()
        .method("GET")
        .path("/costs/last-week/smart-meter-3")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    // average 15 kW over one hour at unit rate 1
    let cost: f64 = serde_json::from_slice(response.body()).unwrap();
    assert!((cost - 15.0).abs() < TOLERANCE);
}

#[tokio::test]
async fn last_week_cost_for_unknown_meter_is_not_found() {
    let routes = seeded_routes(ReadingStore::new(), AccountStore::new());

    let response = warp::test::request()
        .method("GET")
        .path("/costs/last-week/nonexistent")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn last_week_cost_without_plan_account_is_not_found() {
    let readings = ReadingStore::new();
    readings
        .store(
            "smart-meter-0",
            vec![ElectricityReading::new(Utc::now(), 1.0)],
        )
        .await;
    let routes = seeded_routes(readings, AccountStore::new());

    let response = warp::test::request()
        .method("GET")
        .path("/costs/last-week/smart-meter-0")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = serde_json::from_slice(response.body()).unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("no price plan account"));
}

#[tokio::test]
async fn health_reports_version_and_channel() {
    let routes = seeded_routes(ReadingStore::new(), AccountStore::new());

    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["channel"], "stable");
}
