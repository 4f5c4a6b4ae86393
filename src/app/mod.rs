pub mod dashboard;
pub mod inventory;
pub mod stock_service;

pub use dashboard::{DashboardAggregator, Resource};
pub use inventory::{InventoryState, InventoryView, InventoryViewModel, LoadOutcome, Phase};
pub use stock_service::StockService;
