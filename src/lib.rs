pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{DashboardAggregator, InventoryViewModel, StockService};
pub use domain::filter::{FilterQuery, FilterTag};
pub use domain::model::{StatusPolicy, StockDraft, StockItem, StockStatus};
pub use domain::validation::ValidationRules;
pub use error::AppError;
pub use infra::gateway::{HttpGateway, InventoryGateway, StatsGateway};
