use crate::domain::model::{
    ChartData, DailySales, DashboardStats, SalesPoint, SalesTotal, StatMetric, StockDraft,
    StockItem, StockStatus, Trend,
};
use crate::infra::auth::{LoginRequest, LoginResponse};
use crate::transport::http::handlers::{auth, dashboard, health, inventory};
use crate::transport::http::types::{ApiResponse, AppState, DeleteByBodyRequest, StockPage};
use axum::routing::{get, post, put};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        inventory::list_inventory_handler,
        inventory::list_stocks_handler,
        inventory::create_stock_handler,
        inventory::update_stock_handler,
        inventory::delete_stock_handler,
        inventory::delete_stock_by_body_handler,
        dashboard::dashboard_stats_handler,
        dashboard::dashboard_charts_handler,
        dashboard::recent_sales_handler,
        dashboard::sales_total_handler,
        auth::login_handler
    ),
    components(schemas(
        ApiResponse,
        StockItem,
        StockDraft,
        StockStatus,
        StockPage,
        DeleteByBodyRequest,
        DashboardStats,
        StatMetric,
        Trend,
        ChartData,
        SalesPoint,
        DailySales,
        SalesTotal,
        LoginRequest,
        LoginResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/inventory",
            get(inventory::list_inventory_handler).post(inventory::create_stock_handler),
        )
        .route(
            "/api/inventory/:id",
            put(inventory::update_stock_handler).delete(inventory::delete_stock_handler),
        )
        .route(
            "/api/stocks",
            get(inventory::list_stocks_handler)
                .post(inventory::create_stock_handler)
                .delete(inventory::delete_stock_by_body_handler),
        )
        .route("/api/stocks/:id", put(inventory::update_stock_handler))
        .route("/api/dashboard/stats", get(dashboard::dashboard_stats_handler))
        .route("/api/dashboard/charts", get(dashboard::dashboard_charts_handler))
        .route("/api/sales", get(dashboard::recent_sales_handler))
        .route("/api/sales/total_sales", get(dashboard::sales_total_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .with_state(app_state)
}
