use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use crate::models::{CATEGORICAL_FIELDS, FEATURE_COUNT};
use thiserror::Error;

/// Errors raised by the trained model primitives
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Shape mismatch in {stage}: expected {expected} features, got {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Predictor produced a non-finite value: {0}")]
    NonFinite(f64),

    #[error("Duplicate class '{0}' in categorical encoder")]
    DuplicateClass(String),

    #[error("Encoder defined for unknown field '{0}'")]
    UnknownEncoderField(String),
}

/// Interface for trained regression models
pub trait Predictor: Send + Sync + fmt::Debug {
    /// Predict a single scalar from a scaled feature vector
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Number of features the model was trained on
    fn n_features(&self) -> usize;

    /// Get model name/type
    fn name(&self) -> &str;
}

/// Ordinary least squares regressor: y = w·x + b
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Predictor for LinearRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::ShapeMismatch {
                stage: "predictor",
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let value = self
            .coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (w, x)| acc + w * x);

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ModelError::NonFinite(value))
        }
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn name(&self) -> &str {
        "linear_regression"
    }
}

/// Serialized predictor, tagged by model kind
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictorArtifact {
    LinearRegression(LinearRegressor),
}

impl PredictorArtifact {
    pub fn into_predictor(self) -> Box<dyn Predictor> {
        match self {
            PredictorArtifact::LinearRegression(model) => Box::new(model),
        }
    }
}

/// Per-column standardization: (x - mean) / scale
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawScaler")]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Deserialize)]
struct RawScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<RawScaler> for StandardScaler {
    type Error = ModelError;

    fn try_from(raw: RawScaler) -> Result<Self, Self::Error> {
        Self::new(raw.mean, raw.scale)
    }
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ModelError> {
        if mean.len() != scale.len() {
            return Err(ModelError::ShapeMismatch {
                stage: "scaler",
                expected: mean.len(),
                actual: scale.len(),
            });
        }
        Ok(Self { mean, scale })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardize a feature vector
    ///
    /// Columns with zero variance are only centered.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.mean.len() {
            return Err(ModelError::ShapeMismatch {
                stage: "scaler",
                expected: self.mean.len(),
                actual: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

/// Maps the vocabulary seen during training to integer codes
///
/// A value's code is its position in the class list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct LabelEncoder {
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl TryFrom<Vec<String>> for LabelEncoder {
    type Error = ModelError;

    fn try_from(classes: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(classes)
    }
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ModelError> {
        let mut codes = HashMap::with_capacity(classes.len());
        for (code, class) in classes.iter().enumerate() {
            if codes.insert(class.clone(), code).is_some() {
                return Err(ModelError::DuplicateClass(class.clone()));
            }
        }
        Ok(Self { classes, codes })
    }

    pub fn encode(&self, value: &str) -> Option<usize> {
        self.codes.get(value).copied()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// Label encoders keyed by categorical field wire name
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CategoricalEncoders(HashMap<String, LabelEncoder>);

impl CategoricalEncoders {
    pub fn new(encoders: HashMap<String, LabelEncoder>) -> Self {
        Self(encoders)
    }

    pub fn get(&self, field: &str) -> Option<&LabelEncoder> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trained artifacts handed over by the training pipeline
///
/// Read-only once constructed.
#[derive(Debug)]
pub struct ModelArtifacts {
    predictor: Box<dyn Predictor>,
    scaler: StandardScaler,
    encoders: CategoricalEncoders,
}

impl ModelArtifacts {
    /// Bundle the artifacts, checking they agree with each other
    pub fn new(
        predictor: Box<dyn Predictor>,
        scaler: StandardScaler,
        encoders: CategoricalEncoders,
    ) -> Result<Self, ModelError> {
        if predictor.n_features() != scaler.n_features() {
            return Err(ModelError::ShapeMismatch {
                stage: "predictor",
                expected: scaler.n_features(),
                actual: predictor.n_features(),
            });
        }

        if scaler.n_features() != FEATURE_COUNT {
            return Err(ModelError::ShapeMismatch {
                stage: "scaler",
                expected: FEATURE_COUNT,
                actual: scaler.n_features(),
            });
        }

        if let Some(field) = encoders
            .fields()
            .find(|field| !CATEGORICAL_FIELDS.contains(field))
        {
            return Err(ModelError::UnknownEncoderField(field.to_string()));
        }

        Ok(Self {
            predictor,
            scaler,
            encoders,
        })
    }

    pub fn predictor(&self) -> &dyn Predictor {
        self.predictor.as_ref()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn encoders(&self) -> &CategoricalEncoders {
        &self.encoders
    }
}
