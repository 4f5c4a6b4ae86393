use crate::domain::filter::FilterQuery;
use crate::domain::model::{StockDraft, StockItem};
use crate::domain::validation::Operation;
use crate::transport::http::handlers::common::{filter_query_from_params, require_session};
use crate::transport::http::types::{
    api_error, json_422, ApiResponse, AppState, DeleteByBodyRequest, InventoryListParams,
    StockPage, StockPageParams,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

const DRAFT_SHAPE: &str =
    "{\"name\": ..., \"category\": ..., \"price\": ..., \"quantity\": ...}";

#[utoipa::path(
    get,
    path = "/api/inventory",
    params(InventoryListParams),
    responses(
        (status = 200, description = "Matching stock items", body = [StockItem]),
        (status = 400, description = "Invalid status filter", body = ApiResponse)
    )
)]
pub async fn list_inventory_handler(
    State(state): State<AppState>,
    Query(params): Query<InventoryListParams>,
) -> impl IntoResponse {
    let query = match filter_query_from_params(&params) {
        Ok(q) => q,
        Err(resp) => return resp.into_response(),
    };
    let stock = state.stock.read().await;
    (StatusCode::OK, Json(stock.list(&query))).into_response()
}

#[utoipa::path(
    get,
    path = "/api/stocks",
    params(StockPageParams),
    responses(
        (status = 200, description = "One page of stock items", body = StockPage)
    )
)]
pub async fn list_stocks_handler(
    State(state): State<AppState>,
    Query(params): Query<StockPageParams>,
) -> impl IntoResponse {
    let limit = params.limit.clamp(1, 500);
    let stock = state.stock.read().await;
    let (data, total) = stock.page(&FilterQuery::default(), params.page, limit);
    Json(StockPage {
        data,
        total,
        page: params.page.max(1),
        limit,
    })
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = StockDraft,
    responses(
        (status = 201, description = "Created stock item", body = StockItem),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 401, description = "Missing or invalid session", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_stock_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<StockDraft>, JsonRejection>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let Json(draft) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, DRAFT_SHAPE).into_response(),
    };
    if let Err(e) = state.settings.validation_rules().validate(Operation::Create, &draft) {
        return api_error(StatusCode::BAD_REQUEST, e.to_string()).into_response();
    }

    let mut stock = state.stock.write().await;
    let created = stock.create(draft);
    (StatusCode::CREATED, Json(created)).into_response()
}

#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    params(
        ("id" = String, Path, description = "Stock item id (e.g. INV001)")
    ),
    request_body = StockDraft,
    responses(
        (status = 200, description = "Updated stock item", body = StockItem),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 401, description = "Missing or invalid session", body = ApiResponse),
        (status = 404, description = "Unknown id", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn update_stock_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    request: Result<Json<StockDraft>, JsonRejection>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let Json(draft) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, DRAFT_SHAPE).into_response(),
    };
    if let Err(e) = state.settings.validation_rules().validate(Operation::Update, &draft) {
        return api_error(StatusCode::BAD_REQUEST, e.to_string()).into_response();
    }

    let mut stock = state.stock.write().await;
    match stock.update(&id, draft) {
        Some(updated) => (StatusCode::OK, Json(updated)).into_response(),
        None => api_error(StatusCode::NOT_FOUND, format!("Stock item '{}' not found", id))
            .into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    params(
        ("id" = String, Path, description = "Stock item id (e.g. INV001)")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing or invalid session", body = ApiResponse),
        (status = 404, description = "Unknown id", body = ApiResponse)
    )
)]
pub async fn delete_stock_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    delete_by_id(&state, &id).await
}

#[utoipa::path(
    delete,
    path = "/api/stocks",
    request_body = DeleteByBodyRequest,
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing or invalid session", body = ApiResponse),
        (status = 404, description = "Unknown id", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn delete_stock_by_body_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<DeleteByBodyRequest>, JsonRejection>,
) -> impl IntoResponse {
    if let Err(resp) = require_session(&state, &headers).await {
        return resp.into_response();
    }
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"issueId\": \"...\"}").into_response(),
    };
    delete_by_id(&state, &request.issue_id).await
}

async fn delete_by_id(state: &AppState, id: &str) -> axum::response::Response {
    let mut stock = state.stock.write().await;
    if stock.delete(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        api_error(StatusCode::NOT_FOUND, format!("Stock item '{}' not found", id)).into_response()
    }
}
