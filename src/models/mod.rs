// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{PriceBreakdown, Confidence, RuleBasedEstimate, PredictionResult, PredictionMethod, GatewayStatus};
pub use requests::{VehicleFeatures, FeatureValue, FEATURE_COUNT, CATEGORICAL_FIELDS};
pub use responses::{PredictResponse, HealthResponse, ServiceInfoResponse, ErrorResponse};
