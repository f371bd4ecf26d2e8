//! Configuration management for the MacroMate CLI
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: MACROMATE__)

use anyhow::Result;
use macromate_shared::{HeightUnit, WeightUnit};
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level for MacroMate crates when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Display unit for weights in pretty output
    pub weight_unit: WeightUnit,
    /// Display unit for heights in pretty output
    pub height_unit: HeightUnit,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with MACROMATE__ prefix
    pub fn load() -> Result<Self> {
        let config_file = format!("config/{}.toml", Self::environment());
        Self::load_with(config::File::with_name(&config_file).required(false))
    }

    /// Load with TOML text in place of the environment-specific file
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::load_with(config::File::from_str(toml, config::FileFormat::Toml))
    }

    fn load_with<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(file)
            // e.g., MACROMATE__OUTPUT__FORMAT=json sets output.format
            .add_source(config::Environment::with_prefix("MACROMATE").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Deployment environment name, `development` unless RUST_ENV says otherwise
    pub fn environment() -> String {
        env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        Self::environment() == "production"
    }

    /// Whether log lines should be emitted as JSON
    pub fn json_logs(&self) -> bool {
        self.logging.json || Self::is_production()
    }

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub fn log_filter(&self) -> String {
        format!(
            "macromate_cli={level},macromate_shared={level}",
            level = self.logging.level
        )
    }
}
