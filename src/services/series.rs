use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{DailyPoint, Transaction};

/// Aggregates raw transactions into one total per calendar day.
///
/// The output is sorted ascending by date with one entry per distinct
/// `tx_date` present in the input. It is NOT gap-filled; run the result
/// through [`fill_missing_dates`] before forecasting.
pub fn build_daily_series(transactions: &[Transaction]) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<NaiveDate, DailyPoint> = BTreeMap::new();
    for tx in transactions {
        let entry = by_date
            .entry(tx.tx_date)
            .or_insert_with(|| DailyPoint::zero(tx.tx_date));
        entry.total_sales += tx.amount;
        entry.total_quantity += tx.quantity;
    }
    by_date.into_values().collect()
}

/// Aggregates one SKU's transactions into a daily series.
pub fn build_sku_series(transactions: &[Transaction], sku: &str) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<NaiveDate, DailyPoint> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.sku == sku) {
        let entry = by_date
            .entry(tx.tx_date)
            .or_insert_with(|| DailyPoint::zero(tx.tx_date));
        entry.total_sales += tx.amount;
        entry.total_quantity += tx.quantity;
    }
    by_date.into_values().collect()
}

/// Distinct SKUs in order of first appearance.
pub fn distinct_skus(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut skus = Vec::new();
    for tx in transactions {
        if seen.insert(tx.sku.as_str()) {
            skus.push(tx.sku.clone());
        }
    }
    skus
}

/// Fills date gaps so the series has one observation per calendar day.
///
/// The input need not be sorted or contiguous; when the same date appears
/// more than once the later entry wins. Every day between the first and last
/// date inclusive is emitted, with zero-valued points standing in for missing
/// days, so the output length is always the inclusive day span. Both forecast
/// models require this shape: they treat index position as elapsed days.
pub fn fill_missing_dates(series: &[DailyPoint]) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<NaiveDate, DailyPoint> = BTreeMap::new();
    for point in series {
        by_date.insert(point.date, point.clone());
    }
    let (Some((&first, _)), Some((&last, _))) = (by_date.first_key_value(), by_date.last_key_value())
    else {
        return Vec::new();
    };

    let span = (last - first).num_days() as usize + 1;
    if span > by_date.len() {
        debug!(missing = span - by_date.len(), "filling date gaps");
    }

    let mut filled = Vec::with_capacity(span);
    let mut day = first;
    while day <= last {
        filled.push(
            by_date
                .get(&day)
                .cloned()
                .unwrap_or_else(|| DailyPoint::zero(day)),
        );
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    filled
}
