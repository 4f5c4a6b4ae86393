//! Mock inventory/stats backend speaking the gateway contract.

pub mod router;
pub mod types;
pub mod handlers {
    pub mod auth;
    pub mod common;
    pub mod dashboard;
    pub mod health;
    pub mod inventory;
}

pub use router::{create_router, ApiDoc};
pub use types::{AppState, BackendSettings};
