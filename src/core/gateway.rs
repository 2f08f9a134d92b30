use thiserror::Error;
use crate::core::model::{ModelArtifacts, ModelError};
use crate::core::pricing::{round_to_cents, PricingEngine};
use crate::models::{FeatureValue, GatewayStatus, PredictionResult, VehicleFeatures};

/// Errors surfaced to the caller of a single prediction
#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error("Unknown category '{value}' for field '{field}'")]
    UnknownCategory { field: String, value: String },

    #[error("{0}")]
    Computation(String),
}

impl From<ModelError> for PredictionError {
    fn from(err: ModelError) -> Self {
        PredictionError::Computation(err.to_string())
    }
}

/// Whether trained artifacts were loaded at startup
///
/// Fixed for the lifetime of the process: an unavailable model is never
/// retried.
#[derive(Debug)]
pub enum GatewayState {
    Ready(ModelArtifacts),
    Unavailable { reason: String },
}

impl GatewayState {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        GatewayState::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Chooses between the trained model and the pricing engine
///
/// # Dispatch
/// - `Unavailable`: rule-based estimate with breakdown
/// - `Ready`: encode categoricals, scale, predict, round
///
/// Faults on the model path are returned to the caller and never fall
/// back to the rule-based estimate.
#[derive(Debug)]
pub struct ModelGateway {
    state: GatewayState,
    engine: PricingEngine,
}

impl ModelGateway {
    pub fn new(state: GatewayState) -> Self {
        Self {
            state,
            engine: PricingEngine::new(),
        }
    }

    pub fn ready(artifacts: ModelArtifacts) -> Self {
        Self::new(GatewayState::Ready(artifacts))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(GatewayState::unavailable(reason))
    }

    pub fn status(&self) -> GatewayStatus {
        match self.state {
            GatewayState::Ready(_) => GatewayStatus::Ready,
            GatewayState::Unavailable { .. } => GatewayStatus::Unavailable,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            GatewayState::Ready(_) => None,
            GatewayState::Unavailable { reason } => Some(reason),
        }
    }

    /// Price a vehicle using whichever path the gateway state selects
    pub fn predict(&self, features: &VehicleFeatures) -> Result<PredictionResult, PredictionError> {
        match &self.state {
            GatewayState::Unavailable { .. } => {
                Ok(PredictionResult::RuleBased(self.engine.estimate(features)))
            }
            GatewayState::Ready(artifacts) => {
                let price = predict_with_model(artifacts, features)?;
                Ok(PredictionResult::ModelBased { price })
            }
        }
    }
}

fn predict_with_model(
    artifacts: &ModelArtifacts,
    features: &VehicleFeatures,
) -> Result<f64, PredictionError> {
    let encoded = encode_features(artifacts, features)?;
    let scaled = artifacts.scaler().transform(&encoded)?;
    let raw = artifacts.predictor().predict(&scaled)?;

    tracing::debug!(
        "Model {} produced raw prediction {}",
        artifacts.predictor().name(),
        raw
    );

    // Rounding can overflow for finite raw values near f64::MAX
    let price = round_to_cents(raw);
    if !price.is_finite() {
        return Err(ModelError::NonFinite(price).into());
    }

    Ok(price)
}

/// Build the numeric feature vector, encoding categoricals by field name
pub fn encode_features(
    artifacts: &ModelArtifacts,
    features: &VehicleFeatures,
) -> Result<Vec<f64>, PredictionError> {
    features
        .fields()
        .into_iter()
        .map(|(field, value)| match value {
            FeatureValue::Numeric(number) => Ok(number),
            FeatureValue::Categorical(raw) => {
                let encoder = artifacts.encoders().get(field).ok_or_else(|| {
                    PredictionError::Computation(format!(
                        "No encoder available for categorical field '{}'",
                        field
                    ))
                })?;

                encoder
                    .encode(raw)
                    .map(|code| code as f64)
                    .ok_or_else(|| PredictionError::UnknownCategory {
                        field: field.to_string(),
                        value: raw.to_string(),
                    })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{CategoricalEncoders, LabelEncoder, LinearRegressor, StandardScaler};
    use crate::models::{CATEGORICAL_FIELDS, FEATURE_COUNT};
    use std::collections::HashMap;

    fn create_test_features() -> VehicleFeatures {
        VehicleFeatures {
            symboling: 0,
            fuel_type: "gas".to_string(),
            aspiration: "turbo".to_string(),
            door_number: 4,
            car_body: "sedan".to_string(),
            drive_wheel: "4wd".to_string(),
            engine_location: "front".to_string(),
            wheel_base: 99.4,
            car_length: 176.6,
            car_width: 66.4,
            car_height: 54.3,
            curb_weight: 2824,
            engine_type: "ohc".to_string(),
            cylinder_number: 5,
            engine_size: 136,
            fuel_system: "mpfi".to_string(),
            bore_ratio: 3.19,
            stroke: 3.4,
            compression_ratio: 8.0,
            horsepower: 115,
            peak_rpm: 5500,
            city_mpg: 18,
            highway_mpg: 22,
            company: "audi".to_string(),
        }
    }

    fn encoders_for(features: &VehicleFeatures) -> CategoricalEncoders {
        let encoders = features
            .categorical_fields()
            .map(|(field, value)| {
                let classes = vec!["__other".to_string(), value.to_string()];
                (field.to_string(), LabelEncoder::new(classes).unwrap())
            })
            .collect::<HashMap<_, _>>();
        CategoricalEncoders::new(encoders)
    }

    /// Predicts intercept + horsepower with an identity scaler
    fn create_artifacts(features: &VehicleFeatures) -> ModelArtifacts {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[19] = 1.0;

        ModelArtifacts::new(
            Box::new(LinearRegressor { coefficients, intercept: 10000.123 }),
            StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap(),
            encoders_for(features),
        )
        .unwrap()
    }

    #[test]
    fn test_unavailable_uses_rule_based() {
        let gateway = ModelGateway::unavailable("missing artifacts");
        let result = gateway.predict(&create_test_features()).unwrap();

        assert_eq!(gateway.status(), GatewayStatus::Unavailable);
        assert_eq!(gateway.unavailable_reason(), Some("missing artifacts"));
        match result {
            PredictionResult::RuleBased(estimate) => {
                assert_eq!(estimate.breakdown.brand_premium, 10_000);
                assert_eq!(estimate.breakdown.turbo_premium, 3000);
                assert_eq!(estimate.breakdown.drivetrain_premium, 2000);
            }
            other => panic!("expected rule-based result, got {:?}", other),
        }
    }

    #[test]
    fn test_ready_uses_model() {
        let features = create_test_features();
        let gateway = ModelGateway::ready(create_artifacts(&features));

        assert_eq!(gateway.status(), GatewayStatus::Ready);
        assert_eq!(gateway.unavailable_reason(), None);
        assert_eq!(
            gateway.predict(&features),
            Ok(PredictionResult::ModelBased { price: 10115.12 })
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let features = create_test_features();
        let gateway = ModelGateway::ready(create_artifacts(&features));

        let mut unseen = features.clone();
        unseen.company = "tesla".to_string();

        assert_eq!(
            gateway.predict(&unseen),
            Err(PredictionError::UnknownCategory {
                field: "company".to_string(),
                value: "tesla".to_string(),
            })
        );
    }

    #[test]
    fn test_encoded_vector_uses_class_codes() {
        let features = create_test_features();
        let artifacts = create_artifacts(&features);
        let encoded = encode_features(&artifacts, &features).unwrap();

        assert_eq!(encoded.len(), FEATURE_COUNT);
        // every categorical is the second class in its encoder
        for (index, (field, _)) in features.fields().iter().enumerate() {
            if CATEGORICAL_FIELDS.contains(field) {
                assert_eq!(encoded[index], 1.0, "field {}", field);
            }
        }
        assert_eq!(encoded[19], 115.0);
    }

    #[test]
    fn test_missing_encoder_is_a_computation_fault() {
        let features = create_test_features();
        let artifacts = ModelArtifacts::new(
            Box::new(LinearRegressor { coefficients: vec![0.0; FEATURE_COUNT], intercept: 0.0 }),
            StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap(),
            CategoricalEncoders::default(),
        )
        .unwrap();

        let result = ModelGateway::ready(artifacts).predict(&features);
        assert!(matches!(result, Err(PredictionError::Computation(_))));
    }

    #[test]
    fn test_rounding_overflow_is_a_computation_fault() {
        let features = create_test_features();
        let artifacts = ModelArtifacts::new(
            Box::new(LinearRegressor { coefficients: vec![0.0; FEATURE_COUNT], intercept: 1e307 }),
            StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap(),
            encoders_for(&features),
        )
        .unwrap();

        match ModelGateway::ready(artifacts).predict(&features) {
            Err(PredictionError::Computation(cause)) => assert!(cause.contains("non-finite")),
            other => panic!("expected computation fault, got {:?}", other),
        }
    }
}
