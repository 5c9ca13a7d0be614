use chrono::Duration;
use tracing::{debug, instrument};

use crate::errors::AnalyticsError;
use crate::models::{DailyPoint, ForecastModel, ForecastParams, ForecastPoint};

/// z-score for the 95% confidence band
const CONFIDENCE_Z: f64 = 1.96;

/// Runs the model selected by `params.model` over a gap-filled daily series.
///
/// The series must be contiguous (see
/// [`fill_missing_dates`](crate::services::series::fill_missing_dates)); both
/// models treat index position as a proxy for elapsed days. In-sample points
/// come first, followed by `horizon` out-of-sample points with confidence
/// bounds. A zero horizon produces no out-of-sample points; a negative one is
/// rejected.
#[instrument(skip(series, params), fields(len = series.len(), model = %params.model, horizon = params.horizon))]
pub fn run_forecast(
    series: &[DailyPoint],
    params: &ForecastParams,
) -> Result<Vec<ForecastPoint>, AnalyticsError> {
    validate_params(params)?;
    match params.model {
        ForecastModel::MovingAverage => moving_average(series, params),
        ForecastModel::HoltWinters => holt_winters(series, params),
    }
}

/// Splits a forecast result into aligned (actual, fitted) vectors for the
/// accuracy metrics. Only points carrying both values participate.
pub fn fit_pairs(points: &[ForecastPoint]) -> (Vec<f64>, Vec<f64>) {
    points
        .iter()
        .filter_map(|p| Some((p.actual?, p.forecast?)))
        .unzip()
}

fn validate_params(params: &ForecastParams) -> Result<(), AnalyticsError> {
    if params.horizon < 0 {
        return Err(AnalyticsError::InvalidParameter(format!(
            "horizon must be non-negative, got {}",
            params.horizon
        )));
    }
    if params.window_size == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "windowSize must be at least 1".to_string(),
        ));
    }
    if params.season_length == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "seasonLength must be at least 1".to_string(),
        ));
    }
    for (name, value) in [
        ("alpha", params.alpha),
        ("beta", params.beta),
        ("gamma", params.gamma),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(AnalyticsError::InvalidParameter(format!(
                "{} must lie in [0, 1], got {}",
                name, value
            )));
        }
    }
    Ok(())
}

/// Simple moving average with a flat out-of-sample projection.
fn moving_average(
    series: &[DailyPoint],
    params: &ForecastParams,
) -> Result<Vec<ForecastPoint>, AnalyticsError> {
    let window = params.window_size;
    let required = window + 1;
    if series.len() < required {
        return Err(AnalyticsError::InsufficientData {
            required,
            actual: series.len(),
        });
    }

    let values: Vec<f64> = series.iter().map(|p| p.total_sales).collect();
    let n = values.len();
    let mut points = Vec::with_capacity(n + params.horizon as usize);

    // In-sample fit: mean of the window strictly preceding i, so the fitted
    // value never sees the point it predicts.
    for (i, point) in series.iter().enumerate() {
        let fitted = if i >= window {
            Some(values[i - window..i].iter().sum::<f64>() / window as f64)
        } else {
            None
        };
        points.push(ForecastPoint {
            date: point.date,
            actual: Some(values[i]),
            forecast: fitted,
            lower_ci: None,
            upper_ci: None,
        });
    }

    // Residual spread, sample variance with the denominator floored at 1
    let residuals: Vec<f64> = points
        .iter()
        .filter_map(|p| Some(p.actual? - p.forecast?))
        .collect();
    let denom = residuals.len().saturating_sub(1).max(1) as f64;
    let std_dev = (residuals.iter().map(|r| r * r).sum::<f64>() / denom).sqrt();

    // Flat projection: every future step repeats the mean of the last window
    let next_val = values[n - window..].iter().sum::<f64>() / window as f64;
    debug!(next_val, std_dev, "moving average projection");

    let last_date = series[n - 1].date;
    for h in 1..=params.horizon {
        points.push(ForecastPoint {
            date: last_date + Duration::days(h),
            actual: None,
            forecast: Some(next_val),
            lower_ci: Some(next_val - CONFIDENCE_Z * std_dev),
            upper_ci: Some(next_val + CONFIDENCE_Z * std_dev),
        });
    }
    Ok(points)
}

/// Holt-Winters additive triple exponential smoothing.
fn holt_winters(
    series: &[DailyPoint],
    params: &ForecastParams,
) -> Result<Vec<ForecastPoint>, AnalyticsError> {
    let season_length = params.season_length;
    // Seasonal initialization indexes the first full cycle, and the initial
    // trend needs two observations.
    let required = season_length.max(2);
    if series.len() < required {
        return Err(AnalyticsError::InsufficientData {
            required,
            actual: series.len(),
        });
    }

    let values: Vec<f64> = series.iter().map(|p| p.total_sales).collect();
    let n = values.len();

    let mut level = values[0];
    let mut trend = values[1] - values[0];
    let mut seasonals: Vec<f64> = (0..season_length).map(|i| values[i] - level).collect();

    let mut fitted = Vec::with_capacity(n);
    let mut points = Vec::with_capacity(n + params.horizon as usize);

    for (i, value) in values.iter().copied().enumerate() {
        let s = i % season_length;
        let prev_level = level;
        let prev_trend = trend;
        let prev_season = seasonals[s];

        level = params.alpha * (value - prev_season) + (1.0 - params.alpha) * (prev_level + prev_trend);
        trend = params.beta * (level - prev_level) + (1.0 - params.beta) * prev_trend;
        seasonals[s] = params.gamma * (value - level) + (1.0 - params.gamma) * prev_season;

        // One-step fit from the post-update state; the value reported at i is
        // the previous step's fit, with the first point echoing its actual
        fitted.push(level + trend + seasonals[s]);
        let reported = if i == 0 { value } else { fitted[i - 1] };
        points.push(ForecastPoint {
            date: series[i].date,
            actual: Some(value),
            forecast: Some(reported),
            lower_ci: None,
            upper_ci: None,
        });
    }

    // Population standard deviation of the one-step residuals
    let std_dev = (values
        .iter()
        .zip(&fitted)
        .map(|(v, f)| {
            let r = v - f;
            r * r
        })
        .sum::<f64>()
        / n as f64)
        .sqrt();
    debug!(level, trend, std_dev, "holt-winters final state");

    let last_date = series[n - 1].date;
    for h in 1..=params.horizon {
        let s = ((n as i64 + h - 1) % season_length as i64) as usize;
        let raw = level + h as f64 * trend + seasonals[s];
        // Band widens with the square root of the step
        let half_width = CONFIDENCE_Z * std_dev * (h as f64).sqrt();
        points.push(ForecastPoint {
            date: last_date + Duration::days(h),
            actual: None,
            // Sales cannot go negative; the upper bound stays unclamped
            forecast: Some(raw.max(0.0)),
            lower_ci: Some((raw - half_width).max(0.0)),
            upper_ci: Some(raw + half_width),
        });
    }
    Ok(points)
}
