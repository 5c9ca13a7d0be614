use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub(crate) const DEFAULT_WINDOW_SIZE: usize = 7;
pub(crate) const DEFAULT_ALPHA: f64 = 0.5;
pub(crate) const DEFAULT_BETA: f64 = 0.4;
pub(crate) const DEFAULT_GAMMA: f64 = 0.1;
pub(crate) const DEFAULT_SEASON_LENGTH: usize = 7;

/// The two interchangeable forecast models.
///
/// A closed set of stateless strategies over the same input/output contract,
/// so a tagged variant with dispatch rather than a trait hierarchy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum ForecastModel {
    #[serde(rename = "MOVING_AVERAGE")]
    #[strum(serialize = "Moving Average")]
    MovingAverage,

    #[serde(rename = "HOLT_WINTERS")]
    #[strum(serialize = "Holt-Winters (Exp Smoothing)")]
    HoltWinters,
}

/// Caller-supplied forecast configuration.
///
/// Smoothing constants are never tuned automatically; whatever the caller
/// supplies (or the defaults) is what runs.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ForecastParams {
    pub model: ForecastModel,

    /// Days to project beyond the end of the series
    pub horizon: i64,

    /// Moving-average window, in days
    #[serde(default = "default_window_size")]
    #[validate(range(min = 1))]
    pub window_size: usize,

    /// Level smoothing
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Trend smoothing
    #[serde(default = "default_beta")]
    pub beta: f64,

    /// Seasonal smoothing
    #[serde(default = "default_gamma")]
    pub gamma: f64,

    /// Length of one seasonal cycle, in days
    #[serde(default = "default_season_length")]
    #[validate(range(min = 1))]
    pub season_length: usize,
}

impl ForecastParams {
    /// Parameters for `model` and `horizon` with every tuning knob at its
    /// default (window 7, alpha/beta/gamma 0.5/0.4/0.1, weekly season).
    pub fn new(model: ForecastModel, horizon: i64) -> Self {
        Self {
            model,
            horizon,
            window_size: DEFAULT_WINDOW_SIZE,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            season_length: DEFAULT_SEASON_LENGTH,
        }
    }
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

/// One day of a forecast run.
///
/// In-sample days carry `actual` (and a fitted `forecast` once enough history
/// exists); out-of-sample days carry `forecast` with its confidence bounds
/// and no `actual`. In-sample points always precede out-of-sample points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_ci: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_ci: Option<f64>,
}
