use std::sync::Arc;

use stockroom::infra::auth::{SessionProvider, TokenSession};
use stockroom::infra::{config, telemetry};
use stockroom::{HttpGateway, InventoryGateway, StatsGateway};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--sign-in] [--stats]\n\
         \n\
         Reads env vars:\n\
           BACKEND_BASE_URL, BACKEND_FLAVOR, PAGE_LIMIT, REQUEST_TIMEOUT_SECS\n\
         With --sign-in also:\n\
           STOCKROOM_EMAIL, STOCKROOM_PASSWORD\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let sign_in = args.iter().any(|a| a == "--sign-in");
    let check_stats = args.iter().any(|a| a == "--stats");

    let base_url = config::backend_base_url();
    let flavor = config::backend_flavor();
    let timeout = config::request_timeout();

    println!("> Preflight:");
    println!("  BACKEND_BASE_URL={}", base_url);
    println!("  BACKEND_FLAVOR={}", flavor);
    println!("  PAGE_LIMIT={}", config::page_limit());
    match timeout {
        Some(t) => println!("  REQUEST_TIMEOUT_SECS={}", t.as_secs()),
        None => println!("  REQUEST_TIMEOUT_SECS=0 (disabled)"),
    }

    let mut gateway = HttpGateway::from_env()?;

    // Basic connectivity
    let health = gateway
        .client()
        .get(format!("{}/health", base_url))
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("Backend not reachable at {}: {}", base_url, e))?;
    if health.status().is_success() {
        println!("  /health answered {}", health.status());
    } else {
        eprintln!("  Warning: /health answered {} (backend may not expose it).", health.status());
    }

    if sign_in {
        let (email, password) = config::session_credentials().ok_or_else(|| {
            anyhow::anyhow!("--sign-in needs STOCKROOM_EMAIL and STOCKROOM_PASSWORD")
        })?;
        let session = Arc::new(TokenSession::new());
        session
            .sign_in(gateway.client(), &base_url, &email, &password)
            .await?;
        println!("  Signed in as {} (session active: {}).", email, session.has_session());
        gateway = gateway.with_session(session);
    }

    let items = gateway.list().await?;
    println!("  Inventory listing OK: {} items via {} endpoint.", items.len(), flavor.collection_path());
    if let Some(first) = items.first() {
        println!("  First record: {} ({})", first.id, first.name);
    }

    if check_stats {
        let stats = gateway.stats().await?;
        let charts = gateway.charts().await?;
        println!(
            "  Dashboard OK: revenue {} / {} chart points.",
            stats.total_revenue.value,
            charts.sales_data.len()
        );
    }

    println!("> Preflight OK.");
    Ok(())
}
