use crate::config::ModelSettings;
use crate::core::{
    CategoricalEncoders, GatewayState, ModelArtifacts, ModelError, PredictorArtifact, StandardScaler,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading model artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Inconsistent artifacts: {0}")]
    Invalid(#[from] ModelError),
}

/// Locations of the three artifacts produced by the training pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub predictor: PathBuf,
    pub scaler: PathBuf,
    pub encoders: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: impl AsRef<Path>, predictor: &str, scaler: &str, encoders: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            predictor: dir.join(predictor),
            scaler: dir.join(scaler),
            encoders: dir.join(encoders),
        }
    }

    pub fn from_settings(settings: &ModelSettings) -> Self {
        Self::in_dir(
            &settings.artifact_dir,
            &settings.predictor_file,
            &settings.scaler_file,
            &settings.encoders_file,
        )
    }
}

/// Loads model artifacts from disk once at startup
pub struct ArtifactLoader {
    enabled: bool,
    paths: ArtifactPaths,
}

impl ArtifactLoader {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            enabled: true,
            paths,
        }
    }

    pub fn from_settings(settings: &ModelSettings) -> Self {
        Self {
            enabled: settings.enabled,
            paths: ArtifactPaths::from_settings(settings),
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Load and cross-check all three artifacts
    pub fn load(&self) -> Result<ModelArtifacts, ArtifactError> {
        let predictor: PredictorArtifact = read_json(&self.paths.predictor)?;
        let scaler: StandardScaler = read_json(&self.paths.scaler)?;
        let encoders: CategoricalEncoders = read_json(&self.paths.encoders)?;

        Ok(ModelArtifacts::new(predictor.into_predictor(), scaler, encoders)?)
    }

    /// Resolve the gateway state, degrading to unavailable on any failure
    pub fn load_state(&self) -> GatewayState {
        if !self.enabled {
            tracing::info!("Model loading disabled, using rule-based pricing");
            return GatewayState::unavailable("model loading disabled");
        }

        match self.load() {
            Ok(artifacts) => {
                tracing::info!(
                    "Model artifacts loaded (predictor: {}, features: {}, encoders: {})",
                    artifacts.predictor().name(),
                    artifacts.scaler().n_features(),
                    artifacts.encoders().len()
                );
                GatewayState::Ready(artifacts)
            }
            Err(e) => {
                tracing::error!("Failed to load model artifacts ({}), falling back to rule-based pricing", e);
                GatewayState::unavailable(e.to_string())
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
