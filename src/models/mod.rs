pub mod forecast;
pub mod inventory;
pub mod series;
pub mod transaction;

pub use forecast::{ForecastModel, ForecastParams, ForecastPoint};
pub use inventory::{Recommendation, StockStatus};
pub use series::DailyPoint;
pub use transaction::Transaction;
