use crate::app::StockService;
use crate::domain::model::{FacetField, StatusPolicy, StockItem};
use crate::domain::validation::ValidationRules;
use crate::infra::config;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use utoipa::{IntoParams, ToSchema};

/// Knobs of the mock backend.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub policy: StatusPolicy,
    /// Grouping field a draft must carry on create and update.
    pub facet: FacetField,
    /// Mutating routes demand a bearer token from `/api/auth/login`.
    pub require_auth: bool,
    /// The only account accepted by the login route. Login always fails when `None`.
    pub account: Option<(String, String)>,
    pub session_ttl_secs: i64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            policy: StatusPolicy::default(),
            facet: FacetField::Category,
            require_auth: false,
            account: None,
            session_ttl_secs: 900,
        }
    }
}

impl BackendSettings {
    pub fn from_env() -> Self {
        Self {
            policy: config::status_policy(),
            facet: config::facet_field(),
            require_auth: config::mock_require_auth(),
            account: config::mock_account(),
            session_ttl_secs: config::session_ttl_secs(),
        }
    }

    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules::default().with_facet(self.facet)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub stock: Arc<RwLock<StockService>>,
    /// Issued bearer tokens and their expiry.
    pub sessions: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
    pub settings: Arc<BackendSettings>,
}

impl AppState {
    pub fn new(stock: StockService, settings: BackendSettings) -> Self {
        Self {
            stock: Arc::new(RwLock::new(stock)),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            settings: Arc::new(settings),
        }
    }

    /// Seeded inventory with settings taken from the environment.
    pub fn from_env() -> Self {
        let settings = BackendSettings::from_env();
        Self::new(StockService::seeded(settings.policy), settings)
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Error tuple returned by the handlers.
pub type ApiError = (StatusCode, Json<ApiResponse>);

pub fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::failure(error)))
}

/// Server-side filters for `GET /api/inventory`, evaluated with the client's filter engine.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryListParams {
    /// Case-insensitive substring of name or id.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// `In Stock`, `Low Stock` or `Out of Stock`.
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockPageParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StockPage {
    pub data: Vec<StockItem>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteByBodyRequest {
    #[serde(alias = "id")]
    pub issue_id: String,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalesParams {
    /// Number of most recent days to return (default 7, `0` for all).
    pub days: Option<u32>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalesTotalParams {
    pub period: Option<String>,
}

pub fn json_422(err: JsonRejection, expected: &str) -> ApiError {
    api_error(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("Invalid JSON body: {} (expected: {})", err, expected),
    )
}
