//! Centralized configuration (environment variables + defaults).
//!
//! Every value has a default so the console and the mock backend start with no `.env`.
//! Invalid values are logged and replaced by the default.

use crate::domain::model::{FacetField, StatusPolicy};
use crate::infra::gateway::BackendFlavor;
use std::str::FromStr;
use std::time::Duration;

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match env_string(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, "invalid configuration value, using default");
                default
            }
        },
        None => default,
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    match env_string(key).map(|v| v.trim().to_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        Some(v) => {
            tracing::warn!(key, value = %v, "invalid boolean, using default");
            default
        }
        None => default,
    }
}

/// Base URL of the inventory/stats backend.
pub fn backend_base_url() -> String {
    env_string("BACKEND_BASE_URL")
        .unwrap_or_else(|| "http://localhost:3333".to_string())
        .trim_end_matches('/')
        .to_string()
}

/// When false the dashboard is served from the offline fallback constants.
pub fn use_backend_api() -> bool {
    env_bool("USE_BACKEND_API", false)
}

pub fn backend_flavor() -> BackendFlavor {
    env_parse("BACKEND_FLAVOR", BackendFlavor::Flat)
}

/// Page size for the paginated backend flavor.
pub fn page_limit() -> u32 {
    env_parse("PAGE_LIMIT", 50u32).max(1)
}

/// Per-request timeout. `REQUEST_TIMEOUT_SECS=0` disables it.
pub fn request_timeout() -> Option<Duration> {
    match env_parse("REQUEST_TIMEOUT_SECS", 10u64) {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}

pub fn status_policy() -> StatusPolicy {
    StatusPolicy::new(env_parse("LOW_STOCK_THRESHOLD", StatusPolicy::default().low_stock_below))
}

/// Which record field backs the multi-select facet (`category` or `supplier`).
pub fn facet_field() -> FacetField {
    match env_string("INVENTORY_FACET").map(|v| v.trim().to_lowercase()).as_deref() {
        Some("supplier") => FacetField::Supplier,
        Some("category") | None => FacetField::Category,
        Some(other) => {
            tracing::warn!(value = other, "unknown INVENTORY_FACET, using category");
            FacetField::Category
        }
    }
}

/// Credentials the console signs in with. Never defaulted.
pub fn session_credentials() -> Option<(String, String)> {
    Some((env_string("STOCKROOM_EMAIL")?, env_string("STOCKROOM_PASSWORD")?))
}

/// Mock backend listen address.
pub fn bind_addr() -> String {
    env_string("API_BIND").unwrap_or_else(|| "0.0.0.0:3333".to_string())
}

/// Longest token lifetime the mock backend will issue (30 days).
pub const MAX_SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Lifetime of tokens issued by the mock backend's login route, clamped to
/// `1..=MAX_SESSION_TTL_SECS`.
pub fn session_ttl_secs() -> i64 {
    env_parse("SESSION_TTL_SECS", 900i64).clamp(1, MAX_SESSION_TTL_SECS)
}

/// Whether the mock backend demands a bearer token on mutating routes.
pub fn mock_require_auth() -> bool {
    env_bool("MOCK_REQUIRE_AUTH", false)
}

/// The single account the mock backend accepts. Login is refused when unset.
pub fn mock_account() -> Option<(String, String)> {
    Some((env_string("MOCK_USER_EMAIL")?, env_string("MOCK_USER_PASSWORD")?))
}

pub fn log_json() -> bool {
    env_bool("LOG_JSON", false)
}
