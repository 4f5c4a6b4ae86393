//! One-shot console: loads the inventory through the list view-model, applies the
//! filters given on the command line and prints the list plus the dashboard.

use std::sync::Arc;

use stockroom::app::inventory::{InventoryView, Phase};
use stockroom::app::Resource;
use stockroom::domain::filter::FilterTag;
use stockroom::infra::auth::{SessionProvider, TokenSession};
use stockroom::infra::gateway::FixtureStatsGateway;
use stockroom::infra::{config, telemetry};
use stockroom::{
    DashboardAggregator, HttpGateway, InventoryViewModel, StatsGateway, StatusPolicy, ValidationRules,
};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin stockroom -- [--search TEXT] [--category C]... [--status S]\n\
         \n\
         --category may be repeated; --status is one of all, in-stock, low-stock, out-of-stock.\n\
         Reads BACKEND_BASE_URL, BACKEND_FLAVOR, USE_BACKEND_API, INVENTORY_FACET,\n\
         LOW_STOCK_THRESHOLD and optionally STOCKROOM_EMAIL / STOCKROOM_PASSWORD.\n"
    );
    std::process::exit(2);
}

#[derive(Debug, Default)]
struct CliFilters {
    search: Option<String>,
    categories: Vec<String>,
    status: Option<String>,
}

fn parse_args(args: &[String]) -> CliFilters {
    let mut out = CliFilters::default();
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => usage_and_exit(),
            "--search" => out.search = Some(it.next().cloned().unwrap_or_else(|| usage_and_exit())),
            "--category" => out
                .categories
                .push(it.next().cloned().unwrap_or_else(|| usage_and_exit())),
            "--status" => out.status = Some(it.next().cloned().unwrap_or_else(|| usage_and_exit())),
            other => {
                eprintln!("Unknown argument: {}", other);
                usage_and_exit();
            }
        }
    }
    out
}

fn print_inventory(view: &InventoryView, policy: &StatusPolicy) {
    match &view.phase {
        Phase::Error(msg) => {
            println!("  Inventory unavailable: {}", msg);
            return;
        }
        Phase::Idle | Phase::Loading => {
            println!("  Inventory not loaded.");
            return;
        }
        Phase::Ready => {}
    }

    println!(
        "  {:<10} {:<28} {:<16} {:>6} {:>10}  {}",
        "ID", "NAME", "CATEGORY", "QTY", "PRICE", "STATUS"
    );
    for item in &view.visible {
        println!(
            "  {:<10} {:<28} {:<16} {:>6} {:>10.2}  {}",
            item.id,
            item.name,
            item.category.as_deref().unwrap_or("-"),
            item.quantity,
            item.price,
            item.effective_status(policy),
        );
    }
    println!("  Showing {} of {} items.", view.visible.len(), view.total);

    if !view.active_filters.is_empty() {
        let tags: Vec<String> = view.active_filters.iter().map(FilterTag::label).collect();
        println!("  Active filters: {}", tags.join(", "));
    }
    if !view.facet_values.is_empty() {
        println!("  Available values: {}", view.facet_values.join(", "));
    }
    let counts: Vec<String> = view
        .status_counts
        .iter()
        .map(|(status, n)| format!("{} {}", status, n))
        .collect();
    println!("  By status: {}", counts.join(" | "));
}

async fn print_dashboard(dashboard: &DashboardAggregator) {
    match dashboard.stats().await {
        Resource::Ready(stats) => {
            for (title, metric) in stats.cards() {
                println!("  {:<18} {:>12}  {} from last month", title, metric.value, metric.change_label());
            }
        }
        Resource::Error(msg) => println!("  Stats: {}", msg),
        _ => println!("  Stats: not loaded"),
    }
    match dashboard.charts().await {
        Resource::Ready(charts) => {
            let points: Vec<String> = charts
                .sales_data
                .iter()
                .map(|p| format!("{} {}", p.name, p.sales))
                .collect();
            println!("  Weekly sales: {}", points.join(", "));
        }
        Resource::Error(msg) => println!("  Charts: {}", msg),
        _ => println!("  Charts: not loaded"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let filters = parse_args(&args);

    let base_url = config::backend_base_url();
    let mut gateway = HttpGateway::from_env()?;
    if let Some((email, password)) = config::session_credentials() {
        let session = Arc::new(TokenSession::new());
        match session.sign_in(gateway.client(), &base_url, &email, &password).await {
            Ok(()) => println!("> Signed in as {}.", email),
            Err(e) => eprintln!("> Sign-in failed: {}", e.user_message()),
        }
        if session.has_session() {
            gateway = gateway.with_session(session);
        }
    }
    let gateway = Arc::new(gateway);

    let facet = config::facet_field();
    let policy = config::status_policy();
    let view_model = InventoryViewModel::new(
        gateway.clone(),
        policy,
        ValidationRules::default().with_facet(facet),
    );

    println!("> Loading inventory from {}...", base_url);
    if let Err(e) = view_model.load().await {
        tracing::debug!(error = %e, "initial load failed");
    }

    if let Some(text) = &filters.search {
        view_model.set_search(text).await;
    }
    for value in &filters.categories {
        view_model.toggle_category(value, true).await;
    }
    if let Some(choice) = &filters.status {
        view_model.set_status_choice(choice).await?;
    }

    println!("> Inventory ({} facet):", facet.label());
    print_inventory(&view_model.view().await, &policy);

    let stats: Arc<dyn StatsGateway> = if config::use_backend_api() {
        gateway
    } else {
        Arc::new(FixtureStatsGateway)
    };
    let dashboard = DashboardAggregator::new(stats);
    dashboard.refresh().await;
    println!("> Dashboard:");
    print_dashboard(&dashboard).await;

    Ok(())
}
