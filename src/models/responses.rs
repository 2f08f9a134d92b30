use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::models::domain::{Confidence, PredictionMethod, PredictionResult, PriceBreakdown};

/// Response for the predict endpoint
///
/// `breakdown` and `confidence` are only present for rule-based estimates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted_price: f64,
    pub method: PredictionMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PriceBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        match result {
            PredictionResult::RuleBased(estimate) => Self {
                predicted_price: estimate.price,
                method: PredictionMethod::RuleBased,
                breakdown: Some(estimate.breakdown),
                confidence: Some(estimate.confidence),
            },
            PredictionResult::ModelBased { price } => Self {
                predicted_price: price,
                method: PredictionMethod::MlModel,
                breakdown: None,
                confidence: None,
            },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub method: String,
    pub model_loaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_unavailable_reason: Option<String>,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Service banner returned from the root path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub status: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
