//! Car Price API - price estimation service for used and new vehicles
//!
//! This library provides the pricing core used by the Car Price API.
//! Requests are served by a trained regression model when its artifacts
//! loaded at startup, and by a deterministic rule-based formula otherwise.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{ModelGateway, GatewayState, PredictionError, PricingEngine};
pub use models::{VehicleFeatures, PriceBreakdown, PredictionResult, PredictResponse, GatewayStatus};
pub use services::ArtifactLoader;
