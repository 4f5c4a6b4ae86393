use crate::infra::auth::{expiry_after, LoginRequest, LoginResponse};
use crate::transport::http::handlers::common::new_session_token;
use crate::transport::http::types::{api_error, json_422, ApiResponse, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Short-lived bearer token", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Session lifetime out of range", body = ApiResponse)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"email\": \"...\", \"password\": \"...\"}").into_response(),
    };

    let accepted = match &state.settings.account {
        Some((email, password)) => {
            email.eq_ignore_ascii_case(request.email.trim()) && *password == request.password
        }
        None => false,
    };
    if !accepted {
        tracing::warn!(email = %request.email, "mock backend refused sign-in");
        return api_error(StatusCode::UNAUTHORIZED, "Invalid login credentials").into_response();
    }

    let ttl = state.settings.session_ttl_secs;
    let Some(expires_at) = expiry_after(Utc::now(), ttl) else {
        tracing::error!(ttl, "session ttl out of range");
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Session lifetime misconfigured")
            .into_response();
    };
    let token = new_session_token();
    state.sessions.lock().await.insert(token.clone(), expires_at);
    tracing::info!(email = %request.email, ttl, "mock backend issued session");

    (
        StatusCode::OK,
        Json(LoginResponse {
            access_token: token,
            expires_in: ttl,
        }),
    )
        .into_response()
}
