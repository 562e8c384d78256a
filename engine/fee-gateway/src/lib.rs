//! FeeGateway - REST API for marketplace fee quotes
//!
//! Serves fee breakdowns computed by `fee-calculator` over HTTP so that web
//! and mobile clients share one implementation of the fee rules.

pub mod config;
pub mod error;
pub mod logging;
pub mod rest_api;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use rest_api::create_routes;
