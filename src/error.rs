//! Error taxonomy shared by the gateways and the view-models.
//!
//! Every remote failure is caught at the view-model boundary and turned into a
//! notice for staff. Nothing here is retried automatically.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Connection failure, DNS failure or timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Rejected locally before any request was issued.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Missing or expired credentials, or a failed sign-in.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation { .. })
    }

    /// Short message suitable for a banner next to the list or dashboard panel.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "Could not reach the inventory service".to_string(),
            AppError::Http { status: 401, .. } | AppError::Http { status: 403, .. } => {
                "You are not signed in or your session has expired".to_string()
            }
            AppError::Http { status: 404, .. } => "The requested item no longer exists".to_string(),
            AppError::Http { status, .. } => format!("The server rejected the request ({})", status),
            AppError::Validation { .. } => self.to_string(),
            AppError::Auth(msg) => msg.clone(),
            AppError::InvalidResponse(_) => "The server sent an unexpected response".to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return AppError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_decode() {
            return AppError::InvalidResponse(err.to_string());
        }
        AppError::Network(err.to_string())
    }
}
