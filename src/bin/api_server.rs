// src/bin/api_server.rs

use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use stockroom::infra::{config, telemetry};
use stockroom::transport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    // --- State Initialization ---
    println!("> Seeding in-memory inventory...");
    let app_state = transport::http::AppState::from_env();
    let seeded = app_state.stock.read().await.len();
    println!(
        "> Inventory ready: {} items, low-stock threshold {}.",
        seeded, app_state.settings.policy.low_stock_below
    );
    if app_state.settings.require_auth {
        match &app_state.settings.account {
            Some((email, _)) => println!("> Mutations require a bearer token (login as {}).", email),
            None => println!("> Mutations require a bearer token but no MOCK_USER_EMAIL is set; login will always fail."),
        }
    }

    // --- API Server Initialization ---
    println!("> Starting API server...");
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let bind = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    let local = listener.local_addr()?;
    tracing::info!(%local, "api server listening");
    println!("> API server listening on http://{}", local);
    println!("> Swagger UI available at http://localhost:{}/swagger-ui", local.port());
    println!("> Press Ctrl+C to stop (records are not persisted)");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\n> Shutdown signal received (Ctrl+C)...");
            println!("> Graceful shutdown complete.");
        }
    }

    Ok(())
}
