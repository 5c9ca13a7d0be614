use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of aggregated sales.
///
/// After gap-filling the sequence is strictly date-ordered with no duplicate
/// dates and no gaps; days without transactions carry zero totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub total_sales: f64,
    pub total_quantity: f64,
}

impl DailyPoint {
    /// A zero-valued point for a day with no transactions.
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            total_sales: 0.0,
            total_quantity: 0.0,
        }
    }
}
