use serde::{Deserialize, Serialize};

/// Reorder decision for a SKU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum StockStatus {
    Reorder,
    Healthy,
}

/// Per-SKU reorder recommendation.
///
/// Derived entirely from the transaction history at computation time and
/// never persisted; every request recomputes from scratch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub sku: String,

    /// Mean quantity per transaction
    pub avg_demand: f64,

    /// Population standard deviation of the quantity samples
    pub std_dev: f64,

    pub safety_stock: f64,
    pub reorder_point: f64,
    pub current_stock: f64,
    pub status: StockStatus,

    /// Units to order when reordering, zero otherwise
    pub suggested_order: f64,

    /// Replenishment lead time in days
    pub lead_time: f64,

    /// Service level in percent
    pub service_level: f64,
}
