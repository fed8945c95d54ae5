//! Kicks Admin Backend
//!
//! E-commerce administration backend for a shoe storefront.

use kicks_admin::{api, core, db};

use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (handles CLI args, env vars, and config file)
    let config = match core::config::Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Print to stderr since logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let _logger = match core::Logger::init(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return Err(e);
        }
    };

    info!("Starting Kicks Admin Backend v{}", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = config.server.port,
        "Server configuration"
    );
    info!(path = ?config.database.path, "Database configuration");
    info!(upload_dir = ?config.storage.upload_dir, "Upload directory");

    info!("Initializing database...");
    let db = std::sync::Arc::new(db::DatabaseManager::new(
        &config.database.path,
        config.database.connection_pool_size as u32,
        std::time::Duration::from_millis(config.database.busy_timeout),
    )?);
    info!("Database initialized successfully");

    let server_url = format!("http://{}:{}", config.server.host, config.server.port);
    let server = api::ApiServer::new(config, db)?;

    info!(url = %server_url, "Server ready - starting to serve requests");

    // Blocks until a shutdown signal arrives
    server.serve().await?;

    Ok(())
}
