//! Retail Analytics Engine
//!
//! This crate provides the analytical core of a retail sales system. It
//! ingests immutable sales transactions and derives a continuous daily sales
//! series, short-horizon demand forecasts with uncertainty bounds, and
//! per-product inventory reorder recommendations.
//!
//! Ingestion (CSV/spreadsheet parsing), persistence and rendering are
//! external collaborators: they supply a clean `Vec<Transaction>` and consume
//! the daily series, forecast points and recommendation list produced here.
//! Every operation is a synchronous pure function over immutable input.
//!
//! ```
//! use retail_analytics::prelude::*;
//!
//! let mut store = TransactionStore::new();
//! store.load_demo_data();
//!
//! let params = ForecastParams::new(ForecastModel::HoltWinters, 14);
//! let run = store.forecast(None, &params)?;
//! assert_eq!(run.points.iter().filter(|p| p.actual.is_none()).count(), 14);
//! # Ok::<(), retail_analytics::AnalyticsError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod demo;
pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;

pub use errors::AnalyticsError;
pub use store::{ForecastRun, TransactionStore};

pub mod prelude {
    pub use crate::config::{AnalyticsConfig, ForecastDefaults, InventoryPolicy};
    pub use crate::errors::AnalyticsError;
    pub use crate::models::*;
    pub use crate::services::accuracy::{mape, rmse};
    pub use crate::services::analytics::{kpi_summary, product_summaries};
    pub use crate::services::forecasting::run_forecast;
    pub use crate::services::recommendations::{
        compute_recommendations, compute_recommendations_with, StockLevelSource,
    };
    pub use crate::services::series::{build_daily_series, distinct_skus, fill_missing_dates};
    pub use crate::store::{ForecastRun, TransactionStore};
}
