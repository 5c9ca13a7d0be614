// Series construction and gap filling
pub mod series;

// Forecast models and accuracy metrics
pub mod accuracy;
pub mod forecasting;

// Inventory recommendations
pub mod recommendations;

// Dashboard analytics and decomposition
pub mod analytics;
