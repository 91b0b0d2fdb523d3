//! Travel Graph - a people-and-places graph service
//!
//! Travel Graph exposes a small CRUD HTTP API over a graph of `Person` nodes
//! and the `Place` nodes they have visited, stored in Neo4j and reached over
//! Bolt. The crate is split into a graph data access layer ([`store`]) and an
//! HTTP resource layer ([`api`]) that depends on it only through the
//! [`store::PersonStore`] trait.
#![warn(missing_docs)]

// Core foundational modules
pub mod core;

// Main functional modules
pub mod api;
pub mod store;

// Re-export commonly used items for convenience
pub use crate::core::{Config, Error, Person, Result};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise the configured default
/// level is used.
pub fn init(logging: &crate::core::config::LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Initializing {} v{}", NAME, VERSION);
}
