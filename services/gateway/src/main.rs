mod config;
mod error;
mod handlers;
mod models;
mod router;
mod state;

use config::ServerConfig;
use router::create_router;
use state::AppState;
use statistics::{WindowAggregator, WindowConfig, spawn_maintenance};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting tick statistics service");

    let server_config = ServerConfig::from_env()?;
    let window_config = WindowConfig::from_env()?;

    let aggregator = Arc::new(WindowAggregator::with_system_clock(&window_config));
    let maintenance = spawn_maintenance(
        aggregator.clone(),
        window_config.maintenance_interval(),
    );

    // Create router
    let app = create_router(AppState::new(aggregator));

    // Bind and serve
    let listener = TcpListener::bind(server_config.bind_addr).await?;

    tracing::info!(
        addr = %server_config.bind_addr,
        window_seconds = window_config.window_seconds,
        "Listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    maintenance.abort();
    tracing::info!("Tick statistics service stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
