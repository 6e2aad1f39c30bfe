//! Configuration management for the Produce Freshness Advisor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PFA__ prefix (e.g. PFA__SERVER__PORT)

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Image classification model server
    pub classifier: ClassifierConfig,

    /// Upload limits
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ClassifierConfig {
    /// REST predict endpoint of the model server
    #[validate(url)]
    pub endpoint: String,

    /// Sent as `x-api-key` when present
    pub api_key: Option<String>,

    /// Label file, one `<index> <label>` per line
    pub labels_path: String,

    /// Side length of the square model input in pixels
    #[validate(range(min = 32, max = 1024))]
    pub input_size: u32,

    /// Request timeout in seconds
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Maximum request body size in bytes
    pub max_bytes: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PFA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5001)?
            .set_default("server.host", "0.0.0.0")?
            .set_default(
                "classifier.endpoint",
                "http://localhost:8501/v1/models/freshness:predict",
            )?
            .set_default("classifier.labels_path", "labels.txt")?
            .set_default("classifier.input_size", 224)?
            .set_default("classifier.timeout_secs", 30)?
            .set_default("upload.max_bytes", 10 * 1024 * 1024)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PFA__ prefix)
            .add_source(
                Environment::with_prefix("PFA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config
            .classifier
            .validate()
            .map_err(|e| ConfigError::Message(format!("Invalid classifier config: {}", e)))?;

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8501/v1/models/freshness:predict".to_string(),
            api_key: None,
            labels_path: "labels.txt".to_string(),
            input_size: 224,
            timeout_secs: 30,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            classifier: ClassifierConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}
