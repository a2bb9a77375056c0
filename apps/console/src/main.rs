use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    build_geo_hierarchy, config, CartManager, DataOrchestrator, FetchOutcome, SessionManager,
    SqliteCredentialStore, StorefrontClient,
};
use shared::domain::{DateRange, Role, Session};
use storage::Storage;
use url::Url;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
    /// Overrides base_url from client.toml / APP__BASE_URL.
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long, default_value = "all")]
    range: DateRange,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    let base_url = settings.parse_base_url()?;
    let database_url = config::normalize_database_url(&settings.database_url);

    let storage = Storage::new(&database_url)
        .await
        .context("failed to open credential store")?;
    let sessions = SessionManager::new(
        base_url.clone(),
        Arc::new(SqliteCredentialStore::new(storage)),
    );

    let session = match sessions.restore().await {
        Some(session) => {
            println!("Restored session for {}", session.display_name);
            session
        }
        None => sessions.login(&args.username, &args.password).await?,
    };
    tracing::info!(role = ?session.role, "authenticated");

    match session.role {
        Role::Administrator => run_dashboard(base_url, sessions, &session, args.range).await,
        Role::Customer => run_storefront(base_url, sessions, &session).await,
    }
}

async fn run_dashboard(
    base_url: Url,
    sessions: Arc<SessionManager>,
    session: &Session,
    range: DateRange,
) -> Result<()> {
    let orchestrator = DataOrchestrator::new(base_url, sessions);

    match orchestrator.fetch_snapshot(range, session, 1).await? {
        FetchOutcome::Applied(snapshot) => {
            println!(
                "Sales {:.2} across {} orders (avg ticket {:.2})",
                snapshot.kpis.total_sales, snapshot.kpis.total_orders, snapshot.kpis.average_ticket
            );

            let nodes = build_geo_hierarchy(&snapshot.geo);
            let roots = nodes.iter().filter(|node| node.is_root()).count();
            println!(
                "Geo hierarchy: {roots} countries, {} regions",
                nodes.len() - roots
            );

            println!("Recent orders:");
            for order in &snapshot.recent_orders {
                println!(
                    "  #{} {} {} {:.2}",
                    order.order_key.0, order.date, order.company, order.total
                );
            }
        }
        FetchOutcome::Stale => println!("Fetch was superseded by a newer refresh"),
        FetchOutcome::Skipped => println!("Session lacks dashboard access"),
    }

    Ok(())
}

async fn run_storefront(
    base_url: Url,
    sessions: Arc<SessionManager>,
    session: &Session,
) -> Result<()> {
    let storefront = StorefrontClient::new(base_url, sessions);

    let catalog = storefront.fetch_catalog(session).await?;
    let featured = storefront.fetch_featured(session).await?;
    println!("{} products in catalog, {} featured", catalog.len(), featured.len());

    let mut cart = CartManager::new();
    if let Some(product) = catalog.first() {
        cart.add_item(product.clone());
        println!("Added '{}' to the cart", product.name);
    }
    let receipt = cart.checkout();
    println!(
        "Checked out {} line(s) for {:.2}",
        receipt.line_count, receipt.total
    );

    let history = storefront.fetch_purchase_history(session).await?;
    println!("{} past orders on record", history.len());

    Ok(())
}
