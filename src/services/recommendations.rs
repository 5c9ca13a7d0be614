use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::config::InventoryPolicy;
use crate::models::{Recommendation, StockStatus, Transaction};

/// External current-stock feed, keyed by SKU.
///
/// The engine has no inventory system of its own; deployments supply an
/// implementation backed by a real stock ledger. When a source does not know
/// a SKU the deterministic demo scenario stands in.
pub trait StockLevelSource {
    /// Units currently on hand for `sku`, or `None` when unknown.
    fn stock_on_hand(&self, sku: &str) -> Option<f64>;
}

impl StockLevelSource for HashMap<String, f64> {
    fn stock_on_hand(&self, sku: &str) -> Option<f64> {
        self.get(sku).copied()
    }
}

/// Stand-in source that knows no SKU, so every stock level falls back to the
/// demo scenario derived from the reorder point.
#[derive(Clone, Copy, Debug, Default)]
pub struct DemoStockSource;

impl StockLevelSource for DemoStockSource {
    fn stock_on_hand(&self, _sku: &str) -> Option<f64> {
        None
    }
}

/// Demo stock level: the SKU string length picks one of three scenarios
/// relative to the reorder point. A placeholder data feed, not a policy.
fn demo_stock_level(sku: &str, reorder_point: f64) -> f64 {
    match sku.len() % 3 {
        0 => (reorder_point * 0.4).floor(), // below the reorder point
        1 => (reorder_point * 1.2).floor(), // healthy
        _ => (reorder_point * 2.5).floor(), // overstocked
    }
}

/// Computes reorder recommendations using the demo stock scenario for every
/// SKU. See [`compute_recommendations_with`] for the injected-source variant.
pub fn compute_recommendations(
    transactions: &[Transaction],
    policy: &InventoryPolicy,
) -> Vec<Recommendation> {
    compute_recommendations_with(transactions, policy, &DemoStockSource)
}

/// Computes per-SKU reorder recommendations from the transaction history.
///
/// Demand statistics use the per-transaction quantity samples (population
/// variance). The reorder-point math is identical whichever stock source is
/// in play: `safety = z * sigma * sqrt(lead)`, `reorder = mean * lead + safety`.
/// Output is stably sorted with every `Reorder` entry before any `Healthy`
/// entry.
#[instrument(skip(transactions, policy, source), fields(tx = transactions.len()))]
pub fn compute_recommendations_with(
    transactions: &[Transaction],
    policy: &InventoryPolicy,
    source: &dyn StockLevelSource,
) -> Vec<Recommendation> {
    // Group quantity samples by SKU, keeping first-appearance order
    let mut order: Vec<&str> = Vec::new();
    let mut samples: HashMap<&str, Vec<f64>> = HashMap::new();
    for tx in transactions {
        samples
            .entry(tx.sku.as_str())
            .or_insert_with(|| {
                order.push(tx.sku.as_str());
                Vec::new()
            })
            .push(tx.quantity);
    }
    debug!(skus = order.len(), "computing recommendations");

    let mut results = Vec::with_capacity(order.len());
    for sku in order {
        let values = &samples[sku];
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        let safety_stock = policy.service_level_z * std_dev * policy.lead_time_days.sqrt();
        let reorder_point = mean * policy.lead_time_days + safety_stock;
        let current_stock = source
            .stock_on_hand(sku)
            .unwrap_or_else(|| demo_stock_level(sku, reorder_point));

        let status = if current_stock < reorder_point {
            StockStatus::Reorder
        } else {
            StockStatus::Healthy
        };
        // Order back up to twice the reorder point
        let suggested_order = match status {
            StockStatus::Reorder => (reorder_point * 2.0 - current_stock).ceil(),
            StockStatus::Healthy => 0.0,
        };

        results.push(Recommendation {
            sku: sku.to_string(),
            avg_demand: mean,
            std_dev,
            safety_stock,
            reorder_point,
            current_stock,
            status,
            suggested_order,
            lead_time: policy.lead_time_days,
            service_level: policy.service_level_pct,
        });
    }

    // Reorder entries first; the sort is stable so first-appearance order
    // survives within each group
    results.sort_by_key(|r| r.status == StockStatus::Healthy);
    results
}
