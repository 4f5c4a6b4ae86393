//! Dashboard aggregator: two panels fetched in parallel, each with its own state.

use crate::domain::model::{ChartData, DashboardStats};
use crate::error::AppError;
use crate::infra::gateway::StatsGateway;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Idle,
    Loading,
    Ready(T),
    Error(String),
}

impl<T> Resource<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Resource::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Resource::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    fn settle(result: Result<T, AppError>, panel: &str) -> Self {
        match result {
            Ok(v) => Resource::Ready(v),
            Err(err) => {
                tracing::warn!(panel, error = %err, "dashboard panel failed to load");
                Resource::Error(format!("Failed to load {}", panel))
            }
        }
    }
}

pub struct DashboardAggregator {
    gateway: Arc<dyn StatsGateway>,
    stats: Mutex<Resource<DashboardStats>>,
    charts: Mutex<Resource<ChartData>>,
}

impl DashboardAggregator {
    pub fn new(gateway: Arc<dyn StatsGateway>) -> Self {
        Self {
            gateway,
            stats: Mutex::new(Resource::Idle),
            charts: Mutex::new(Resource::Idle),
        }
    }

    /// Fetches both panels concurrently. Each panel settles as soon as its own
    /// response arrives; a failure in one never touches the other.
    pub async fn refresh(&self) {
        *self.stats.lock().await = Resource::Loading;
        *self.charts.lock().await = Resource::Loading;

        let stats = async {
            let result = self.gateway.stats().await;
            *self.stats.lock().await = Resource::settle(result, "stats");
        };
        let charts = async {
            let result = self.gateway.charts().await;
            *self.charts.lock().await = Resource::settle(result, "charts");
        };
        tokio::join!(stats, charts);
    }

    pub async fn stats(&self) -> Resource<DashboardStats> {
        self.stats.lock().await.clone()
    }

    pub async fn charts(&self) -> Resource<ChartData> {
        self.charts.lock().await.clone()
    }
}
