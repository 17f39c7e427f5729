// SPDX-License-Identifier: GPL-3.0-only
mod api;
mod config;
mod error;
mod logging;
mod parking;
mod registry;

#[cfg(test)]
mod test_helpers;

use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use api::HttpServer;
use config::Config;
use logging::setup_logging;
use parking::ParkingSpotService;
use registry::{ParkingSpotRegistry, SqliteRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    setup_logging(&config.log_level, config.log_json)?;

    info!("Starting parking-control v{}", env!("CARGO_PKG_VERSION"));

    // Initialize registry
    let registry: Arc<dyn ParkingSpotRegistry> = Arc::new(
        SqliteRegistry::new(&config.database_path, config.max_connections).await?,
    );
    info!("Registry initialized at {}", config.database_path.display());

    let service = ParkingSpotService::new(registry);

    // Start HTTP server and run until Ctrl+C
    let http_server = HttpServer::new(service, &config);
    if let Err(e) = http_server.serve(shutdown_signal()).await {
        error!(error = %e, "HTTP server error");
        return Err(e);
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Received shutdown signal (Ctrl+C)");
        }
        Err(err) => {
            error!(error = %err, "Unable to listen for shutdown signal");
        }
    }
}
