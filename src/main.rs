//! `CheckinBuddy` server binary.

use checkin_buddy::{
    api::{self, AppState},
    config::{database, directory, settings::AppConfig},
    core::{session::SessionManager, store::CheckinStore},
    errors::Result,
    services::{RewriteClient, rewrite::RewriteConfig},
};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = AppConfig::from_env()?;
    info!("Successfully processed application configuration.");

    // 4. Initialize the database (the default URL lives under data/)
    std::fs::create_dir_all("data")?;
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;

    // 5. Seed the directory (skipped when accounts already exist)
    let directory_file = directory::load_directory(&app_config.directory_path)
        .inspect_err(|e| error!("Failed to load directory file: {e}"))?;
    directory::seed_directory(&db, &directory_file)
        .await
        .inspect(|_| info!("Directory ready."))
        .inspect_err(|e| error!("Failed to seed directory: {e}"))?;

    // 6. Restore the check-in store for the active period
    let store = CheckinStore::load(db.clone(), app_config.period.clone()).await;

    // 7. Serve the API
    let state = AppState {
        db,
        store: Arc::new(store),
        sessions: Arc::new(SessionManager::new()),
        rewriter: Arc::new(RewriteClient::new(RewriteConfig {
            endpoint: app_config.rewrite_api_url.clone(),
        })),
    };

    api::serve(state, app_config.bind_addr)
        .await
        .inspect_err(|e| error!("Server exited with error: {e}"))
}
