//! Domain types for stock records and dashboard metrics.

pub mod dashboard;
pub mod fixtures;
pub mod stock;

pub use dashboard::{ChartData, DailySales, DashboardStats, SalesPoint, SalesTotal, StatMetric, Trend};
pub use stock::{FacetField, StatusPolicy, StockDraft, StockItem, StockStatus};
