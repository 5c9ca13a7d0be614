use serde::Serialize;
use tracing::{info, instrument};

use crate::config::InventoryPolicy;
use crate::errors::AnalyticsError;
use crate::models::{DailyPoint, ForecastParams, ForecastPoint, Recommendation, Transaction};
use crate::services::{accuracy, analytics, forecasting, recommendations, series};

/// Minimum number of observed days before a forecast run is allowed
const MIN_FORECAST_POINTS: usize = 10;

/// A forecast result plus its in-sample accuracy.
#[derive(Clone, Debug, Serialize)]
pub struct ForecastRun {
    pub points: Vec<ForecastPoint>,
    pub rmse: f64,
    pub mape: f64,
}

/// Owns the current transaction snapshot and the daily series derived from it.
///
/// The daily series is recomputed whenever the snapshot is replaced; every
/// other artifact (forecasts, recommendations, KPIs) is computed on demand by
/// calling the pure services. Callers that need sharing across threads wrap
/// the store themselves; nothing here blocks or suspends.
#[derive(Clone, Debug, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    daily_series: Vec<DailyPoint>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot and recomputes the daily series.
    #[instrument(skip(self, transactions), fields(count = transactions.len()))]
    pub fn replace_transactions(&mut self, transactions: Vec<Transaction>) {
        self.daily_series = series::build_daily_series(&transactions);
        self.transactions = transactions;
        info!(days = self.daily_series.len(), "transaction snapshot replaced");
    }

    /// Loads the bundled demo dataset (300 days, two SKUs).
    pub fn load_demo_data(&mut self) {
        self.replace_transactions(crate::demo::demo_transactions());
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Daily aggregate series, sorted ascending; not gap-filled.
    pub fn daily_series(&self) -> &[DailyPoint] {
        &self.daily_series
    }

    /// Distinct SKUs in order of first appearance.
    pub fn skus(&self) -> Vec<String> {
        series::distinct_skus(&self.transactions)
    }

    /// Daily series restricted to one SKU.
    pub fn sku_series(&self, sku: &str) -> Vec<DailyPoint> {
        series::build_sku_series(&self.transactions, sku)
    }

    /// Runs a forecast over the gap-filled aggregate series, or over a single
    /// SKU's series when one is given, and reports in-sample accuracy.
    ///
    /// Requires at least ten observed days before gap-filling.
    pub fn forecast(
        &self,
        sku: Option<&str>,
        params: &ForecastParams,
    ) -> Result<ForecastRun, AnalyticsError> {
        let raw = match sku {
            Some(sku) => self.sku_series(sku),
            None => self.daily_series.clone(),
        };
        if raw.len() < MIN_FORECAST_POINTS {
            return Err(AnalyticsError::InsufficientData {
                required: MIN_FORECAST_POINTS,
                actual: raw.len(),
            });
        }

        let filled = series::fill_missing_dates(&raw);
        let points = forecasting::run_forecast(&filled, params)?;
        let (actuals, fits) = forecasting::fit_pairs(&points);
        Ok(ForecastRun {
            rmse: accuracy::rmse(&actuals, &fits),
            mape: accuracy::mape(&actuals, &fits),
            points,
        })
    }

    /// Reorder recommendations for every SKU in the snapshot.
    pub fn recommendations(&self, policy: &InventoryPolicy) -> Vec<Recommendation> {
        recommendations::compute_recommendations(&self.transactions, policy)
    }

    /// Headline dashboard figures.
    pub fn kpis(&self) -> analytics::KpiSummary {
        analytics::kpi_summary(&self.transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastModel;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn tx(sku: &str, day: u32, quantity: f64, amount: f64) -> Transaction {
        Transaction {
            order_id: format!("ORD-{}", day),
            sku: sku.to_string(),
            tx_date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            quantity,
            amount,
            store_id: "STORE-Main".to_string(),
        }
    }

    #[test]
    fn replacing_the_snapshot_recomputes_the_series()  {
        let mut store = TransactionStore::new();
        assert!(store.is_empty());
        assert!(store.daily_series().is_empty());

        store.replace_transactions(vec![tx("A", 1, 1.0, 10.0), tx("A", 1, 1.0, 5.0)]);
        assert_eq!(store.daily_series().len(), 1);
        assert_eq!(store.daily_series()[0].total_sales, 15.0);

        store.replace_transactions(vec![tx("A", 2, 1.0, 7.0)]);
        assert_eq!(store.daily_series().len(), 1);
        assert_eq!(store.daily_series()[0].total_sales, 7.0);
    }

    #[test]
    fn forecast_refuses_thin_history() {
        let mut store = TransactionStore::new();
        store.replace_transactions(vec![tx("A", 1, 1.0, 10.0), tx("A", 2, 1.0, 12.0)]);

        let params = ForecastParams::new(ForecastModel::MovingAverage, 7);
        assert_matches!(
            store.forecast(None, &params).unwrap_err(),
            AnalyticsError::InsufficientData { required: 10, actual: 2 }
        );
    }

    #[test]
    fn sku_forecast_uses_only_that_skus_history() {
        let mut store = TransactionStore::new();
        let mut txs: Vec<Transaction> = (1..=20).map(|d| tx("A", d, 2.0, 100.0)).collect();
        txs.push(tx("B", 1, 1.0, 5.0));
        store.replace_transactions(txs);

        let params = ForecastParams::new(ForecastModel::MovingAverage, 3);
        let run = store.forecast(Some("A"), &params).unwrap();
        // constant series forecasts itself exactly
        let future: Vec<_> = run.points.iter().filter(|p| p.actual.is_none()).collect();
        assert_eq!(future.len(), 3);
        assert_eq!(future[0].forecast, Some(100.0));
        assert_eq!(run.rmse, 0.0);

        // B alone has too little history
        assert_matches!(
            store.forecast(Some("B"), &params).unwrap_err(),
            AnalyticsError::InsufficientData { .. }
        );
    }
}
