use chrono::{Duration, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::models::Transaction;

const DEMO_DAYS: usize = 300;
const DEMO_SEED: u64 = 42;

/// Deterministic demo dataset: 300 consecutive days of sales for two SKUs
/// with a mild upward trend, weekly seasonality and bounded noise.
pub fn demo_transactions() -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    demo_transactions_from(start, DEMO_SEED)
}

/// Demo dataset starting at `start`, seeded for reproducibility.
pub fn demo_transactions_from(start: NaiveDate, seed: u64) -> Vec<Transaction> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..DEMO_DAYS)
        .map(|i| {
            let base = 100.0 + i as f64 * 0.5;
            let season = (i as f64 / 7.0).sin() * 20.0;
            let noise = rng.gen_range(-20.0..20.0);
            let amount = (base + season + noise).max(10.0);
            Transaction {
                order_id: format!("ORD-{}", 1000 + i),
                sku: if i % 2 == 0 { "SKU-001" } else { "SKU-002" }.to_string(),
                tx_date: start + Duration::days(i as i64),
                quantity: (amount / 10.0).floor().max(1.0),
                amount,
                store_id: "STORE-Main".to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn demo_dataset_is_reproducible() {
        assert_eq!(demo_transactions(), demo_transactions());
    }

    #[test]
    fn demo_dataset_spans_consecutive_days() {
        let txs = demo_transactions();
        assert_eq!(txs.len(), DEMO_DAYS);
        for pair in txs.windows(2) {
            assert_eq!((pair[1].tx_date - pair[0].tx_date).num_days(), 1);
        }
    }

    #[test]
    fn demo_transactions_pass_model_validation() {
        for tx in demo_transactions() {
            assert!(tx.validate().is_ok());
            assert!(tx.amount >= 10.0);
            assert!(tx.quantity >= 1.0);
        }
    }
}
