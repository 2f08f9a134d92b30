// Core pricing exports
pub mod gateway;
pub mod model;
pub mod pricing;

pub use gateway::{ModelGateway, GatewayState, PredictionError, encode_features};
pub use model::{ModelArtifacts, ModelError, Predictor, PredictorArtifact, LinearRegressor, StandardScaler, LabelEncoder, CategoricalEncoders};
pub use pricing::{PricingEngine, calculate_breakdown, round_to_cents, BASE_PRICE, MIN_PRICE, LUXURY_BRANDS};
