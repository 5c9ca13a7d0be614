use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::errors::AnalyticsError;
use crate::models::{DailyPoint, Transaction};

use super::series::fill_missing_dates;

/// Headline dashboard figures for the whole transaction snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub avg_order_value: f64,
    pub total_units: f64,
}

/// Per-SKU sales totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub sku: String,
    pub total_sales: f64,
    pub total_quantity: f64,
    pub avg_price: f64,
}

/// One day of the trend/seasonal split of a daily series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecompositionPoint {
    pub date: NaiveDate,
    pub actual: f64,
    pub trend: f64,
    /// Detrended remainder: seasonality plus noise
    pub seasonal: f64,
}

/// Minimum number of daily points for a meaningful weekly decomposition
const MIN_DECOMPOSITION_POINTS: usize = 14;
const TREND_WINDOW: usize = 7;

/// Aggregate KPIs over the snapshot. Empty input yields all-zero figures.
pub fn kpi_summary(transactions: &[Transaction]) -> KpiSummary {
    let total_revenue: f64 = transactions.iter().map(|t| t.amount).sum();
    let total_units: f64 = transactions.iter().map(|t| t.quantity).sum();
    let total_orders = transactions.len();
    let avg_order_value = if total_orders == 0 {
        0.0
    } else {
        total_revenue / total_orders as f64
    };
    KpiSummary {
        total_revenue,
        total_orders,
        avg_order_value,
        total_units,
    }
}

/// Per-SKU totals and average unit price, in first-appearance order.
pub fn product_summaries(transactions: &[Transaction]) -> Vec<ProductSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (f64, f64)> = HashMap::new();
    for tx in transactions {
        let entry = totals.entry(tx.sku.as_str()).or_insert_with(|| {
            order.push(tx.sku.as_str());
            (0.0, 0.0)
        });
        entry.0 += tx.amount;
        entry.1 += tx.quantity;
    }

    order
        .into_iter()
        .map(|sku| {
            let (total_sales, total_quantity) = totals[sku];
            let avg_price = if total_quantity == 0.0 {
                0.0
            } else {
                total_sales / total_quantity
            };
            ProductSummary {
                sku: sku.to_string(),
                total_sales,
                total_quantity,
                avg_price,
            }
        })
        .collect()
}

/// Splits a daily series into a centered 7-day moving-average trend and the
/// detrended remainder.
///
/// Gap-fills first so the window spans exactly seven calendar days; edge
/// positions where the window does not fit fall back to the raw value.
#[instrument(skip(series), fields(len = series.len()))]
pub fn decompose_series(series: &[DailyPoint]) -> Result<Vec<DecompositionPoint>, AnalyticsError> {
    if series.len() < MIN_DECOMPOSITION_POINTS {
        return Err(AnalyticsError::InsufficientData {
            required: MIN_DECOMPOSITION_POINTS,
            actual: series.len(),
        });
    }

    let filled = fill_missing_dates(series);
    let half = TREND_WINDOW / 2;

    Ok(filled
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let trend = if i >= half && i + half < filled.len() {
                filled[i - half..=i + half]
                    .iter()
                    .map(|p| p.total_sales)
                    .sum::<f64>()
                    / TREND_WINDOW as f64
            } else {
                point.total_sales
            };
            DecompositionPoint {
                date: point.date,
                actual: point.total_sales,
                trend,
                seasonal: point.total_sales - trend,
            }
        })
        .collect())
}
