//! API configuration

use std::path::Path;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use domain_appeals::PipelineSettings;
use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level, used when `RUST_LOG` is unset
    pub log_level: String,
    /// Persisted feature column list
    pub schema_path: String,
    /// Persisted classifier artifact
    pub model_path: String,
    /// Batch scored when a request carries no upload
    pub default_dataset_path: String,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
    /// Strict probability cut-off for recommending an appeal
    pub recommendation_threshold: f64,
    /// Number of recommendations listed in the response
    pub top_k: usize,
    /// Fields one-hot encoded against the schema
    pub categorical_fields: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let pipeline = PipelineSettings::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            schema_path: "models/feature_columns.json".to_string(),
            model_path: "models/claim_model.json".to_string(),
            default_dataset_path: "data/test_data.csv".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            recommendation_threshold: pipeline.recommendation_threshold,
            top_k: pipeline.top_k,
            categorical_fields: pipeline.categorical_fields,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `appeals.toml` (optional) and `APPEALS_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Loads configuration from defaults, a config file, then the environment
    ///
    /// With no explicit file, an `appeals.*` file in the working directory is
    /// used if present. `PORT` is honoured when `APPEALS_PORT` is unset.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => config::File::from(path),
            None => config::File::with_name("appeals").required(false),
        };

        let port_fallback = std::env::var("APPEALS_PORT")
            .is_err()
            .then(|| std::env::var("PORT").ok())
            .flatten();

        Self::defaults()?
            .add_source(file_source)
            .set_override_option("port", port_fallback)?
            .add_source(
                config::Environment::with_prefix("APPEALS")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("categorical_fields"),
            )
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("schema_path", defaults.schema_path)?
            .set_default("model_path", defaults.model_path)?
            .set_default("default_dataset_path", defaults.default_dataset_path)?
            .set_default("max_upload_bytes", defaults.max_upload_bytes as u64)?
            .set_default("recommendation_threshold", defaults.recommendation_threshold)?
            .set_default("top_k", defaults.top_k as u64)?
            .set_default("categorical_fields", defaults.categorical_fields)
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pipeline settings carried by this configuration
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            recommendation_threshold: self.recommendation_threshold,
            top_k: self.top_k,
            categorical_fields: self.categorical_fields.clone(),
        }
    }
}
