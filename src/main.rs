//! # Resets API Main Entry Point
//!
//! This is the main entry point for the Sales Assist resets service.

use migration::{Migrator, MigratorTrait};
use resets::{config::ConfigLoader, db::init_pool, server::run_server, telemetry::init_tracing};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from layered env files and variables
    let config_loader = ConfigLoader::new();
    let config = config_loader.load()?;

    init_tracing(&config)?;

    info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        info!(configuration = %redacted_json, "Effective configuration");
    }

    let db = init_pool(&config).await?;
    Migrator::up(&db, None).await?;

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    run_server(config, db, shutdown).await
}
