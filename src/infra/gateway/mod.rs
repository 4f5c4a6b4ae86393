//! Boundary to the remote inventory and statistics services.
//!
//! The view-models only see these traits, so tests can script responses and the
//! console can swap the HTTP gateway for the offline fixtures.

use crate::domain::model::{ChartData, DailySales, DashboardStats, SalesTotal, StockDraft, StockItem};
use crate::error::AppError;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

pub mod fixture;
pub mod http;

pub use fixture::FixtureStatsGateway;
pub use http::{GatewaySettings, HttpGateway};

#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// Full current collection (all pages for paginated backends).
    async fn list(&self) -> Result<Vec<StockItem>, AppError>;

    /// Creates a record; the server assigns `id` and `lastUpdated`.
    async fn create(&self, draft: &StockDraft) -> Result<StockItem, AppError>;

    /// Replaces the record. Backends may answer with the new record or an empty body.
    async fn update(&self, id: &str, draft: &StockDraft) -> Result<Option<StockItem>, AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait StatsGateway: Send + Sync {
    async fn stats(&self) -> Result<DashboardStats, AppError>;

    async fn charts(&self) -> Result<ChartData, AppError>;

    /// The last `days` daily sales points, oldest first.
    async fn recent_sales(&self, days: u32) -> Result<Vec<DailySales>, AppError>;

    async fn sales_total(&self, period: Option<&str>) -> Result<SalesTotal, AppError>;
}

/// Path and pagination conventions of the two known inventory backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendFlavor {
    /// `/api/inventory`, flat list, `DELETE /api/inventory/{id}`.
    #[default]
    Flat,
    /// `/api/stocks?page=&limit=`, paged envelope, `DELETE /api/stocks` with `{ "issueId": id }`.
    Paginated,
}

impl BackendFlavor {
    pub fn collection_path(&self) -> &'static str {
        match self {
            BackendFlavor::Flat => "/api/inventory",
            BackendFlavor::Paginated => "/api/stocks",
        }
    }
}

impl fmt::Display for BackendFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendFlavor::Flat => f.write_str("flat"),
            BackendFlavor::Paginated => f.write_str("paginated"),
        }
    }
}

impl FromStr for BackendFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" | "inventory" => Ok(BackendFlavor::Flat),
            "paginated" | "stocks" => Ok(BackendFlavor::Paginated),
            other => Err(format!("unknown backend flavor '{}'", other)),
        }
    }
}
