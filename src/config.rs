use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use validator::{Validate, ValidationErrors};

use crate::models::forecast::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_GAMMA, DEFAULT_SEASON_LENGTH, DEFAULT_WINDOW_SIZE,
};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const CONFIG_DIR: &str = "config";
const DEFAULT_LEAD_TIME_DAYS: f64 = 7.0;
const DEFAULT_SERVICE_LEVEL_Z: f64 = 1.65; // one-sided ~95%
const DEFAULT_SERVICE_LEVEL_PCT: f64 = 95.0;

/// Defaults applied when a caller builds forecast parameters from config
/// rather than supplying its own.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ForecastDefaults {
    #[serde(default = "default_window_size")]
    #[validate(range(min = 1))]
    pub window_size: usize,

    #[serde(default = "default_alpha")]
    pub alpha: f64,

    #[serde(default = "default_beta")]
    pub beta: f64,

    #[serde(default = "default_gamma")]
    pub gamma: f64,

    #[serde(default = "default_season_length")]
    #[validate(range(min = 1))]
    pub season_length: usize,
}

impl Default for ForecastDefaults {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            season_length: DEFAULT_SEASON_LENGTH,
        }
    }
}

impl ForecastDefaults {
    /// Builds parameters for `model` and `horizon` from these defaults.
    pub fn params(
        &self,
        model: crate::models::ForecastModel,
        horizon: i64,
    ) -> crate::models::ForecastParams {
        crate::models::ForecastParams {
            model,
            horizon,
            window_size: self.window_size,
            alpha: self.alpha,
            beta: self.beta,
            gamma: self.gamma,
            season_length: self.season_length,
        }
    }
}

/// Replenishment policy for the recommendation engine.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct InventoryPolicy {
    /// Supplier lead time in days
    #[serde(default = "default_lead_time_days")]
    #[validate(range(min = 0.0))]
    pub lead_time_days: f64,

    /// z-score backing the safety-stock calculation
    #[serde(default = "default_service_level_z")]
    #[validate(range(min = 0.0))]
    pub service_level_z: f64,

    /// Service level reported on recommendations, in percent
    #[serde(default = "default_service_level_pct")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub service_level_pct: f64,
}

impl Default for InventoryPolicy {
    fn default() -> Self {
        Self {
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            service_level_z: DEFAULT_SERVICE_LEVEL_Z,
            service_level_pct: DEFAULT_SERVICE_LEVEL_PCT,
        }
    }
}

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Application environment
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Forecast parameter defaults
    #[serde(default)]
    #[validate]
    pub forecast: ForecastDefaults,

    /// Inventory replenishment policy
    #[serde(default)]
    #[validate]
    pub inventory: InventoryPolicy,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENV.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
            forecast: ForecastDefaults::default(),
            inventory: InventoryPolicy::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Loads the analytics configuration.
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config file (config/default.toml), if present
/// 3. Environment-specific config (config/{env}.toml), if present
/// 4. Environment variables (APP__*)
pub fn load_config() -> Result<AnalyticsConfig, ConfigLoadError> {
    // Support both RUN_ENV and APP_ENV for selecting config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("environment", DEFAULT_ENV)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let config: AnalyticsConfig = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_beta() -> f64 {
    DEFAULT_BETA
}

fn default_gamma() -> f64 {
    DEFAULT_GAMMA
}

fn default_season_length() -> usize {
    DEFAULT_SEASON_LENGTH
}

fn default_lead_time_days() -> f64 {
    DEFAULT_LEAD_TIME_DAYS
}

fn default_service_level_z() -> f64 {
    DEFAULT_SERVICE_LEVEL_Z
}

fn default_service_level_pct() -> f64 {
    DEFAULT_SERVICE_LEVEL_PCT
}
