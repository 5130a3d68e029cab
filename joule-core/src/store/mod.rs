//! In-memory stores shared across the API handlers

pub mod accounts;
pub mod plans;
pub mod readings;
pub mod tariffs;

pub use accounts::AccountStore;
pub use plans::PlanStore;
pub use readings::ReadingStore;
pub use tariffs::TariffStore;
