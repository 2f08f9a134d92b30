use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

/// Where the trained artifacts live
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: String,
    #[serde(default = "default_predictor_file")]
    pub predictor_file: String,
    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,
    #[serde(default = "default_encoders_file")]
    pub encoders_file: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            artifact_dir: default_artifact_dir(),
            predictor_file: default_predictor_file(),
            scaler_file: default_scaler_file(),
            encoders_file: default_encoders_file(),
        }
    }
}

fn default_true() -> bool { true }
fn default_artifact_dir() -> String { "models".to_string() }
fn default_predictor_file() -> String { "predictor.json".to_string() }
fn default_scaler_file() -> String { "scaler.json".to_string() }
fn default_encoders_file() -> String { "encoders.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local override file (config/local.toml)
    /// 4. Environment variables (prefixed with CARPRICE)
    /// 5. Platform variables MODEL_DIR and PORT
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CARPRICE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CARPRICE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CARPRICE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply unprefixed variables commonly set by container platforms
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(dir) = env::var("MODEL_DIR") {
        builder = builder.set_override("model.artifact_dir", dir)?;
    }
    if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        builder = builder.set_override("server.port", i64::from(port))?;
    }

    builder.build()
}
