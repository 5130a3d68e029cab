//! Domain services built on top of the stores

pub mod cost;
pub mod pricing;

pub use cost::{CostError, CostService};
pub use pricing::PricePlanService;
