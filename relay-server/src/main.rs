//! Entity Relay Server
//!
//! Publishes committed entity changes to Kafka topics through a REST proxy.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::ConfigLoader;
use relay_core::RelayEngine;
use relay_core::publisher::RestProxyBroker;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Entity Relay - publish committed entity changes to a message broker
#[derive(Parser, Debug)]
#[command(name = "relay-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "RELAY_CONFIG", default_value = "./relay-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting relay-server v{}", env!("CARGO_PKG_VERSION"));

    let loaded_config = ConfigLoader::new(&args.config, args.listen)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;
    tracing::info!(
        routes = loaded_config.routing.len(),
        broker = %loaded_config.broker.url,
        "Configuration loaded from {:?}",
        args.config
    );

    let listen_addr = loaded_config.listen;
    let broker = Arc::new(RestProxyBroker::new(loaded_config.broker));
    let engine = RelayEngine::start(loaded_config.engine, loaded_config.routing, broker);

    let router = build_router(AppState::new(engine.hook()));

    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Publish whatever is still queued before exiting.
    tracing::info!("Draining dispatch queue...");
    engine.shutdown().await?;
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
