//! Travel Graph server
//!
//! People-and-places graph service over Neo4j - HTTP entrypoint
use anyhow::Context;
use clap::{Arg, Command};
use std::sync::Arc;
use tokio::signal;

use travel_graph::core::config::Config;
use travel_graph::store::Neo4jStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = Command::new("travel-graph")
        .version(travel_graph::VERSION)
        .about("People-and-places graph service backed by Neo4j")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .get_matches();

    // Load configuration
    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let config = Config::load(config_path).context("failed to load configuration")?;

    // Initialize logging
    travel_graph::init(&config.logging);

    // Connect the long-lived store pool; a bad URI or credential fails here,
    // not on the first request
    let store = Neo4jStore::connect(&config.neo4j)
        .await
        .context("failed to connect to Neo4j")?;
    let store = Arc::new(store);

    // Start the HTTP server
    let addr = config.server.http_addr;
    let server_handle: tokio::task::JoinHandle<()> = tokio::spawn(async move {
        travel_graph::api::start_server(addr, store)
            .await
            .expect("HTTP server failed")
    });

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::warn!("Received shutdown signal");
        }
        _ = server_handle => {
            tracing::warn!("HTTP server terminated unexpectedly");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
