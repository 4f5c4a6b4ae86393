use crate::domain::filter::FilterQuery;
use crate::domain::model::StockStatus;
use crate::transport::http::types::{api_error, ApiError, AppState, InventoryListParams};
use axum::http::{header, HeaderMap, StatusCode};
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Checks the bearer token on mutating routes when the backend requires auth.
pub async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    if !state.settings.require_auth {
        return Ok(());
    }

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "Missing bearer token"))?;

    let mut sessions = state.sessions.lock().await;
    let now = Utc::now();
    sessions.retain(|_, expires_at| *expires_at > now);
    if sessions.contains_key(token) {
        Ok(())
    } else {
        Err(api_error(StatusCode::UNAUTHORIZED, "Invalid or expired session"))
    }
}

pub fn new_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(40)
        .map(char::from)
        .collect()
}

/// Translates list query parameters into a filter query.
pub fn filter_query_from_params(params: &InventoryListParams) -> Result<FilterQuery, ApiError> {
    let mut query = FilterQuery::default();
    if let Some(search) = params.search.as_deref() {
        query.text = search.to_string();
    }
    if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
        query.toggle_category(category, true);
    }
    if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty()) {
        let parsed: StockStatus = status
            .parse()
            .map_err(|e: String| api_error(StatusCode::BAD_REQUEST, e))?;
        query.status = Some(parsed);
    }
    Ok(query)
}
