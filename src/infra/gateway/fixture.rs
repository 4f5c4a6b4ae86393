use super::StatsGateway;
use crate::domain::model::fixtures;
use crate::domain::model::{ChartData, DailySales, DashboardStats, SalesTotal};
use crate::error::AppError;
use async_trait::async_trait;

/// Offline stats source used when `USE_BACKEND_API` is off.
#[derive(Debug, Clone, Default)]
pub struct FixtureStatsGateway;

#[async_trait]
impl StatsGateway for FixtureStatsGateway {
    async fn stats(&self) -> Result<DashboardStats, AppError> {
        Ok(fixtures::fallback_stats())
    }

    async fn charts(&self) -> Result<ChartData, AppError> {
        Ok(fixtures::fallback_charts())
    }

    async fn recent_sales(&self, days: u32) -> Result<Vec<DailySales>, AppError> {
        Ok(fixtures::recent_daily_sales(days))
    }

    async fn sales_total(&self, period: Option<&str>) -> Result<SalesTotal, AppError> {
        Ok(fixtures::fallback_sales_total(period))
    }
}
