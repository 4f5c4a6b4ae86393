//! Session handling: short-lived bearer tokens from a login flow, route guarding
//! and the sign-up form check.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use utoipa::ToSchema;

/// Source of the bearer token attached to mutating gateway calls.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Whether a usable session is present right now.
    fn has_session(&self) -> bool;

    /// The current token, or `AppError::Auth` when signed out or expired.
    async fn bearer_token(&self) -> Result<String, AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// `now + ttl_secs`, or `None` when the offset does not fit a timestamp.
pub fn expiry_after(now: DateTime<Utc>, ttl_secs: i64) -> Option<DateTime<Utc>> {
    now.checked_add_signed(Duration::try_seconds(ttl_secs)?)
}

impl SessionToken {
    /// `None` when `ttl_secs` is out of range for a timestamp.
    pub fn new(access_token: impl Into<String>, ttl_secs: i64) -> Option<Self> {
        Some(Self {
            access_token: access_token.into(),
            expires_at: expiry_after(Utc::now(), ttl_secs)?,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// Session backed by a token issued by the backend's login route.
#[derive(Debug, Default)]
pub struct TokenSession {
    token: RwLock<Option<SessionToken>>,
}

impl TokenSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }

    /// Exchanges credentials for a token via `POST {base_url}/api/auth/login`.
    pub async fn sign_in(
        &self,
        client: &reqwest::Client,
        base_url: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AppError> {
        let url = format!("{}/api/auth/login", base_url.trim_end_matches('/'));
        let resp = client
            .post(&url)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(AppError::from)?;

        let status = resp.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            tracing::warn!(email, "sign-in rejected");
            return Err(AppError::Auth("Invalid login credentials".to_string()));
        }
        if !status.is_success() {
            return Err(AppError::Http {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))?;
        let token = SessionToken::new(body.access_token, body.expires_in).ok_or_else(|| {
            AppError::InvalidResponse(format!("expiresIn out of range: {}", body.expires_in))
        })?;
        self.store(token);
        tracing::info!(email, expires_in = body.expires_in, "signed in");
        Ok(())
    }

    pub fn sign_out(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    fn store(&self, token: SessionToken) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token);
    }

    fn current(&self) -> Option<SessionToken> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl SessionProvider for TokenSession {
    fn has_session(&self) -> bool {
        self.current()
            .map(|t| !t.is_expired_at(Utc::now()))
            .unwrap_or(false)
    }

    async fn bearer_token(&self) -> Result<String, AppError> {
        match self.current() {
            None => Err(AppError::Auth("Not signed in".to_string())),
            Some(t) if t.is_expired_at(Utc::now()) => {
                Err(AppError::Auth("Session expired, sign in again".to_string()))
            }
            Some(t) => Ok(t.access_token),
        }
    }
}

const PROTECTED_ROUTES: &[&str] = &["/dashboard", "/inventory", "/main-page", "/reset-password"];
const AUTH_ROUTES: &[&str] = &["/login", "/signup", "/auth"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin { redirect_to: String },
    RedirectToDashboard,
}

impl RouteDecision {
    /// Redirect target (path and query), if any.
    pub fn location(&self) -> Option<String> {
        match self {
            RouteDecision::Allow => None,
            RouteDecision::RedirectToDashboard => Some("/dashboard".to_string()),
            RouteDecision::RedirectToLogin { redirect_to } => {
                let query: String = reqwest::Url::parse("http://localhost/login")
                    .map(|mut url| {
                        url.query_pairs_mut().append_pair("redirectTo", redirect_to);
                        url.query().unwrap_or_default().to_string()
                    })
                    .unwrap_or_default();
                Some(format!("/login?{}", query))
            }
        }
    }
}

/// Signed-out visitors of protected pages go to login; signed-in visitors of
/// login/sign-up pages go to the dashboard.
pub fn guard_route(path: &str, has_session: bool) -> RouteDecision {
    let protected = PROTECTED_ROUTES.iter().any(|r| path.starts_with(r));
    let auth_page = AUTH_ROUTES.iter().any(|r| path.starts_with(r));

    if protected && !has_session {
        return RouteDecision::RedirectToLogin {
            redirect_to: path.to_string(),
        };
    }
    if auth_page && has_session {
        return RouteDecision::RedirectToDashboard;
    }
    RouteDecision::Allow
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() {
            return Err(AppError::validation("email", "is required"));
        }
        if self.password.is_empty() {
            return Err(AppError::validation("password", "is required"));
        }
        if self.password != self.confirm_password {
            return Err(AppError::validation("confirm_password", "Passwords don't match"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_route_without_session_redirects_to_login() {
        let decision = guard_route("/inventory", false);
        assert_eq!(
            decision,
            RouteDecision::RedirectToLogin { redirect_to: "/inventory".into() }
        );
        assert_eq!(decision.location().as_deref(), Some("/login?redirectTo=%2Finventory"));
    }

    #[test]
    fn auth_route_with_session_redirects_to_dashboard() {
        assert_eq!(guard_route("/login", true), RouteDecision::RedirectToDashboard);
        assert_eq!(guard_route("/signup", false), RouteDecision::Allow);
        assert_eq!(guard_route("/dashboard/sales", true), RouteDecision::Allow);
        assert_eq!(guard_route("/", false), RouteDecision::Allow);
    }

    #[tokio::test]
    async fn expired_token_is_not_a_session() {
        let session = TokenSession::with_token(SessionToken::new("abc", -1).unwrap());
        assert!(!session.has_session());
        assert!(matches!(session.bearer_token().await, Err(AppError::Auth(_))));

        let session = TokenSession::with_token(SessionToken::new("abc", 60).unwrap());
        assert!(session.has_session());
        assert_eq!(session.bearer_token().await.unwrap(), "abc");
        session.sign_out();
        assert!(!session.has_session());
    }

    #[test]
    fn out_of_range_ttl_yields_no_token() {
        assert!(SessionToken::new("abc", i64::MAX).is_none());
        assert!(SessionToken::new("abc", i64::MIN).is_none());
        assert!(expiry_after(Utc::now(), 900).is_some());
    }

    #[test]
    fn sign_up_requires_matching_passwords() {
        let form = SignUpForm {
            email: "staff@example.com".into(),
            password: "one".into(),
            confirm_password: "two".into(),
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.user_message(), "Invalid confirm_password: Passwords don't match");

        let form = SignUpForm { confirm_password: "one".into(), ..form };
        assert!(form.validate().is_ok());
    }
}
