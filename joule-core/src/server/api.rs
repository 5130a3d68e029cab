//! HTTP API routes for readings, price plans, tariffs and costs

use crate::models::{MeterData, MeterReadings, PeakTimeMultiplier};
use crate::service::{CostError, CostService, PricePlanService};
use crate::store::{AccountStore, PlanStore, ReadingStore, TariffStore};
use crate::version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use thiserror::Error;
use warp::http::StatusCode;
use warp::Filter;

/// API error types, rendered as JSON problem bodies by the rejection handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("meter readings must name a smart meter and carry at least one reading")]
    InvalidReadings,

    #[error("no readings found for smart meter {0}")]
    MeterNotFound(String),

    #[error("price plan {0} not found")]
    PlanNotFound(String),

    #[error("smart meter {0} has no price plan account")]
    NoPlanAccount(String),
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidReadings => StatusCode::BAD_REQUEST,
            ApiError::MeterNotFound(_)
            | ApiError::PlanNotFound(_)
            | ApiError::NoPlanAccount(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// JSON problem body for error responses
#[derive(Debug, Serialize)]
struct ProblemBody {
    status: u16,
    error: String,
    message: String,
}

impl ProblemBody {
    fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("unknown")
                .to_lowercase(),
            message: message.to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub channel: String,
}

/// Query parameters for plan recommendations
#[derive(Debug, Deserialize)]
struct RecommendQuery {
    limit: Option<usize>,
}

/// Create the HTTP API routes over the shared stores
pub fn create_api_routes(
    readings: ReadingStore,
    accounts: AccountStore,
    plans: PlanStore,
    tariffs: TariffStore,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let pricing = PricePlanService::new(plans.clone(), readings.clone());
    let costs = CostService::new(tariffs, plans.clone(), accounts.clone(), readings.clone());

    let readings_filter = warp::any().map(move || readings.clone());
    let accounts_filter = warp::any().map(move || accounts.clone());
    let plans_filter = warp::any().map(move || plans.clone());
    let pricing_filter = warp::any().map(move || pricing.clone());
    let costs_filter = warp::any().map(move || costs.clone());

    // POST /readings/store - Store a batch of readings for a meter
    let store_readings = warp::path!("readings" / "store")
        .and(warp::post())
        .and(warp::body::json())
        .and(readings_filter.clone())
        .and_then(handle_store_readings);

    // GET /readings/read/:smartMeterId - Readings stored for a meter
    let read_readings = warp::path!("readings" / "read" / String)
        .and(warp::get())
        .and(readings_filter.clone())
        .and_then(handle_read_readings);

    // GET /price-plans/compare-all/:smartMeterId - Cost under every plan
    let compare_all = warp::path!("price-plans" / "compare-all" / String)
        .and(warp::get())
        .and(accounts_filter.clone())
        .and(pricing_filter.clone())
        .and_then(handle_compare_all);

    // GET /price-plans/recommend/:smartMeterId?limit=n - Cheapest plans first
    let recommend = warp::path!("price-plans" / "recommend" / String)
        .and(warp::get())
        .and(warp::query::<RecommendQuery>())
        .and(pricing_filter.clone())
        .and_then(handle_recommend);

    // GET /price-plans/peak-multipliers - Multipliers of every plan
    let all_multipliers = warp::path!("price-plans" / "peak-multipliers")
        .and(warp::get())
        .and(plans_filter.clone())
        .and_then(handle_all_multipliers);

    // POST /price-plans/:planName/peak-multiplier - Attach multipliers to a plan
    let add_multipliers = warp::path!("price-plans" / String / "peak-multiplier")
        .and(warp::post())
        .and(warp::body::json())
        .and(plans_filter.clone())
        .and_then(handle_add_multipliers);

    // GET /price-plans/:planName/peak-multiplier - Multipliers of one plan
    let get_multipliers = warp::path!("price-plans" / String / "peak-multiplier")
        .and(warp::get())
        .and(plans_filter.clone())
        .and_then(handle_get_multipliers);

    // POST /tariffs/compare-all - Price a posted batch against every tariff
    let compare_tariffs = warp::path!("tariffs" / "compare-all")
        .and(warp::post())
        .and(warp::body::json())
        .and(costs_filter.clone())
        .and_then(handle_compare_tariffs);

    // GET /costs/last-week/:smartMeterId - Cost of the meter's last week
    let last_week = warp::path!("costs" / "last-week" / String)
        .and(warp::get())
        .and(costs_filter.clone())
        .and_then(handle_last_week);

    // GET /health - Health check endpoint
    let get_health = warp::path!("health")
        .and(warp::get())
        .and_then(handle_get_health);

    store_readings
        .or(read_readings)
        .or(compare_all)
        .or(recommend)
        .or(all_multipliers)
        .or(add_multipliers)
        .or(get_multipliers)
        .or(compare_tariffs)
        .or(last_week)
        .or(get_health)
        .recover(handle_rejection)
}

/// Handle POST /readings/store
async fn handle_store_readings(
    batch: MeterReadings,
    readings: ReadingStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    if !batch.is_valid() {
        return Err(warp::reject::custom(ApiError::InvalidReadings));
    }

    tracing::debug!(
        smart_meter_id = %batch.smart_meter_id,
        count = batch.electricity_readings.len(),
        "Storing readings"
    );
    readings
        .store(&batch.smart_meter_id, batch.electricity_readings)
        .await;

    Ok(warp::reply())
}

/// Handle GET /readings/read/:smartMeterId
async fn handle_read_readings(
    smart_meter_id: String,
    readings: ReadingStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    match readings.get(&smart_meter_id).await {
        Some(list) => Ok(warp::reply::json(&list)),
        None => Err(warp::reject::custom(ApiError::MeterNotFound(
            smart_meter_id,
        ))),
    }
}

/// Handle GET /price-plans/compare-all/:smartMeterId
async fn handle_compare_all(
    smart_meter_id: String,
    accounts: AccountStore,
    pricing: PricePlanService,
) -> Result<impl warp::Reply, warp::Rejection> {
    let comparisons = pricing
        .cost_for_each_plan(&smart_meter_id)
        .await
        .ok_or_else(|| warp::reject::custom(ApiError::MeterNotFound(smart_meter_id.clone())))?;
    let plan_id = accounts.plan_id_for(&smart_meter_id).await;

    Ok(warp::reply::json(&serde_json::json!({
        "pricePlanId": plan_id,
        "pricePlanComparisons": comparisons,
    })))
}

/// Handle GET /price-plans/recommend/:smartMeterId
async fn handle_recommend(
    smart_meter_id: String,
    query: RecommendQuery,
    pricing: PricePlanService,
) -> Result<impl warp::Reply, warp::Rejection> {
    let recommendations = pricing
        .recommend(&smart_meter_id, query.limit)
        .await
        .ok_or_else(|| warp::reject::custom(ApiError::MeterNotFound(smart_meter_id)))?;

    // One single-entry object per plan, cheapest first
    let body: Vec<serde_json::Value> = recommendations
        .into_iter()
        .map(|(plan, cost)| serde_json::json!({ plan: cost }))
        .collect();

    Ok(warp::reply::json(&body))
}

/// Handle GET /price-plans/peak-multipliers
async fn handle_all_multipliers(plans: PlanStore) -> Result<impl warp::Reply, warp::Rejection> {
    let multipliers: BTreeMap<String, Vec<PeakTimeMultiplier>> = plans
        .all()
        .await
        .into_iter()
        .map(|p| (p.plan_name, p.peak_time_multipliers))
        .collect();

    Ok(warp::reply::json(&multipliers))
}

/// Handle POST /price-plans/:planName/peak-multiplier
async fn handle_add_multipliers(
    plan_name: String,
    multipliers: Vec<PeakTimeMultiplier>,
    plans: PlanStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    for multiplier in multipliers {
        plans.add_peak_time_multiplier(&plan_name, multiplier).await;
    }

    Ok(warp::reply::json(&serde_json::json!({ "message": "ok" })))
}

/// Handle GET /price-plans/:planName/peak-multiplier
async fn handle_get_multipliers(
    plan_name: String,
    plans: PlanStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    match plans.by_name(&plan_name).await {
        Some(plan) => Ok(warp::reply::json(&plan.peak_time_multipliers)),
        None => Err(warp::reject::custom(ApiError::PlanNotFound(plan_name))),
    }
}

/// Handle POST /tariffs/compare-all
async fn handle_compare_tariffs(
    meter_data: MeterData,
    costs: CostService,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&costs.compare_tariffs(&meter_data)))
}

/// Handle GET /costs/last-week/:smartMeterId
async fn handle_last_week(
    smart_meter_id: String,
    costs: CostService,
) -> Result<impl warp::Reply, warp::Rejection> {
    match costs.last_week_cost(&smart_meter_id).await {
        Ok(cost) => Ok(warp::reply::json(&cost)),
        Err(CostError::UnknownMeter(id)) => {
            Err(warp::reject::custom(ApiError::MeterNotFound(id)))
        }
        Err(CostError::NoPlanAccount(id)) => {
            Err(warp::reject::custom(ApiError::NoPlanAccount(id)))
        }
        Err(CostError::UnknownPlan(plan)) => {
            Err(warp::reject::custom(ApiError::PlanNotFound(plan)))
        }
    }
}

/// Handle GET /health
async fn handle_get_health() -> Result<impl warp::Reply, warp::Rejection> {
    let crate_version = env!("CARGO_PKG_VERSION");
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: crate_version.to_string(),
        channel: version::channel(crate_version).to_string(),
    };

    Ok(warp::reply::json(&response))
}

/// Map rejections to JSON problem bodies
async fn handle_rejection(rejection: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            "resource could not be found".to_string(),
        )
    } else if let Some(api_error) = rejection.find::<ApiError>() {
        (api_error.status(), api_error.to_string())
    } else if let Some(body_error) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, body_error.to_string())
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed".to_string(),
        )
    } else {
        tracing::error!(?rejection, "Unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        )
    };

    let body = ProblemBody::new(status, &message);
    Ok(warp::reply::with_status(
        warp::reply::json(&body),
        status,
    ))
}
