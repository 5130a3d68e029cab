//! Data models for joule

pub mod configuration;
pub mod plan;
pub mod reading;
pub mod tariff;

pub use configuration::*;
pub use plan::*;
pub use reading::*;
pub use tariff::*;
