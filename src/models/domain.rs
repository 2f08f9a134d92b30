use serde::{Deserialize, Serialize};

/// Itemized contributions of the rule-based price
///
/// `base_price` is carried alongside the nine adjustments so the wire
/// format lists every term of the formula. The adjustments reflect the
/// computation before the minimum-price floor is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: i64,
    pub horsepower_impact: i64,
    pub engine_size_impact: i64,
    pub weight_impact: i64,
    pub brand_premium: i64,
    pub body_type_premium: i64,
    pub turbo_premium: i64,
    pub cylinder_impact: i64,
    pub mpg_adjustment: i64,
    pub drivetrain_premium: i64,
}

impl PriceBreakdown {
    /// The nine adjustments applied on top of the base price
    pub fn adjustments(&self) -> [(&'static str, i64); 9] {
        [
            ("horsepower_impact", self.horsepower_impact),
            ("engine_size_impact", self.engine_size_impact),
            ("weight_impact", self.weight_impact),
            ("brand_premium", self.brand_premium),
            ("body_type_premium", self.body_type_premium),
            ("turbo_premium", self.turbo_premium),
            ("cylinder_impact", self.cylinder_impact),
            ("mpg_adjustment", self.mpg_adjustment),
            ("drivetrain_premium", self.drivetrain_premium),
        ]
    }

    /// Sum of all adjustments, excluding the base price
    pub fn total_adjustment(&self) -> i64 {
        self.adjustments().iter().map(|(_, amount)| amount).sum()
    }
}

/// Confidence label attached to rule-based estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
}

/// Output of the pricing engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleBasedEstimate {
    pub price: f64,
    pub breakdown: PriceBreakdown,
    pub confidence: Confidence,
}

/// Result of a single prediction request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictionResult {
    RuleBased(RuleBasedEstimate),
    ModelBased { price: f64 },
}

impl PredictionResult {
    pub fn price(&self) -> f64 {
        match self {
            PredictionResult::RuleBased(estimate) => estimate.price,
            PredictionResult::ModelBased { price } => *price,
        }
    }

    pub fn method(&self) -> PredictionMethod {
        match self {
            PredictionResult::RuleBased(_) => PredictionMethod::RuleBased,
            PredictionResult::ModelBased { .. } => PredictionMethod::MlModel,
        }
    }
}

/// Which path produced a price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    RuleBased,
    MlModel,
}

/// Availability of the trained model, as reported by the health check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayStatus {
    Ready,
    Unavailable,
}
