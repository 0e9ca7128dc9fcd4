//! shopbook-sync - synchronize one user's data and print a summary.
//!
//! Usage: `shopbook-sync <user-id>` (or set `SYNC_USER_ID`).

use shopbook_client::{Config, HttpDocumentStore, SyncCoordinator};
use shopbook_engine::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopbook_client=debug,shopbook_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let user_id = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SYNC_USER_ID").ok())
        .unwrap_or_default();

    tracing::info!("Synchronizing user data from {}", config.endpoint);

    let store = HttpDocumentStore::new(&config)?;
    let coordinator = SyncCoordinator::new(store);
    let mut state = AppState::new();

    let report = coordinator.synchronize_report(&user_id, &mut state).await?;

    for failed in &report.failed {
        tracing::warn!(kind = %failed.kind, "Not loaded: {}", failed.reason);
    }

    tracing::info!(
        products = state.inventory.products.len(),
        sales = state.sales.len(),
        today_total = state.sales.today_total(),
        purchases = state.purchases.purchases.len(),
        expenses = state.expenses.expenses.len(),
        categories = state.expenses.categories.len(),
        phase = ?state.session.phase(),
        "Sync finished"
    );

    Ok(())
}
