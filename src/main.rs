//! Task management HTTP service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 TASK SERVICE                  │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!   ───────────────────┼─▶│  http   │───▶│ routing  │───▶│  tasks  │  │
//!                      │  │ server  │    │  table   │    │handlers │  │
//!                      │  └─────────┘    └──────────┘    └────┬────┘  │
//!                      │                                      │       │
//!                      │                                      ▼       │
//!   Client Response    │                               ┌──────────┐   │
//!   ◀──────────────────┼───────────────────────────────│  store   │──▶ db.json
//!                      │                               └──────────┘   │
//!                      │  ┌─────────────────────────────────────────┐ │
//!                      │  │  config        tracing        timeouts  │ │
//!                      │  └─────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! Routes are compiled once at startup; the store rewrites its JSON file on
//! every mutation.

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_api::config::{self, ServiceConfig};
use task_api::{HttpServer, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path as the only process argument.
    let config = match std::env::args().nth(1) {
        Some(path) => config::load_config(Path::new(&path))?,
        None => ServiceConfig::default(),
    };

    // Initialize tracing subscriber; RUST_LOG overrides the config filter.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.observability.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("task-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_path = %config.storage.data_path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let store = Arc::new(Store::open(&config.storage.data_path)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&config, store);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
