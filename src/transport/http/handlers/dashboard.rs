use crate::domain::model::{fixtures, ChartData, DailySales, DashboardStats, SalesTotal};
use crate::transport::http::types::{AppState, SalesParams, SalesTotalParams};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Metric cards", body = DashboardStats)
    )
)]
pub async fn dashboard_stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut stats = fixtures::fallback_stats();
    // The inventory card reflects the live mock collection.
    let stock = state.stock.read().await;
    stats.active_inventory.value = stock.len().to_string();
    Json(stats)
}

#[utoipa::path(
    get,
    path = "/api/dashboard/charts",
    responses(
        (status = 200, description = "Weekly sales series", body = ChartData)
    )
)]
pub async fn dashboard_charts_handler() -> impl IntoResponse {
    Json(fixtures::fallback_charts())
}

#[utoipa::path(
    get,
    path = "/api/sales",
    params(SalesParams),
    responses(
        (status = 200, description = "Most recent daily sales, oldest first", body = [DailySales])
    )
)]
pub async fn recent_sales_handler(Query(params): Query<SalesParams>) -> impl IntoResponse {
    Json(fixtures::recent_daily_sales(params.days.unwrap_or(7)))
}

#[utoipa::path(
    get,
    path = "/api/sales/total_sales",
    params(SalesTotalParams),
    responses(
        (status = 200, description = "Sales totals for a period", body = SalesTotal)
    )
)]
pub async fn sales_total_handler(Query(params): Query<SalesTotalParams>) -> impl IntoResponse {
    Json(fixtures::fallback_sales_total(params.period.as_deref()))
}
