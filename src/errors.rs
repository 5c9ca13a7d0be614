use serde::Serialize;

/// Crate-wide error type for the analytics engine.
///
/// The engine favors defensive numeric defaults over raising: empty inputs
/// yield empty outputs or zero-valued metrics, and every division guards its
/// denominator. The only conditions surfaced to callers are invalid forecast
/// parameters and series too short for the selected model.
#[derive(Debug, thiserror::Error, Serialize)]
pub enum AnalyticsError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Insufficient data: {required} data points required, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Other error: {0}")]
    Other(
        #[from]
        #[serde(skip)]
        anyhow::Error,
    ),
}

impl From<validator::ValidationErrors> for AnalyticsError {
    fn from(err: validator::ValidationErrors) -> Self {
        AnalyticsError::ValidationError(err.to_string())
    }
}

impl From<config::ConfigError> for AnalyticsError {
    fn from(err: config::ConfigError) -> Self {
        AnalyticsError::ConfigError(err.to_string())
    }
}
