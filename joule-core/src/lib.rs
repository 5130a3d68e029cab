//! # Joule Core Library
//!
//! Shared core functionality for joule: domain models, in-memory stores,
//! pricing services and the HTTP API server.

pub mod generator;
pub mod logging;
pub mod models;
pub mod seed;
pub mod server;
pub mod service;
pub mod store;
pub mod version;
