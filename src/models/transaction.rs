use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single retail sale line, as supplied by the ingestion collaborator.
///
/// Transactions are a read-only snapshot: the engine derives everything from
/// them and never mutates them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Transaction {
    /// Order identifier; not required to be unique
    pub order_id: String,

    /// Product identifier
    pub sku: String,

    /// Calendar date of the sale, no time component
    pub tx_date: NaiveDate,

    /// Units sold
    #[validate(range(min = 0.0))]
    pub quantity: f64,

    /// Monetary amount of the sale
    #[validate(range(min = 0.0))]
    pub amount: f64,

    /// Store where the sale occurred
    pub store_id: String,
}
