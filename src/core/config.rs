//! Configuration management for Travel Graph
//!
//! Configuration is resolved once at startup: built-in defaults, then an
//! optional TOML file, then environment variable overrides, then validation.
//! Nothing re-reads configuration mid-run.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::core::error::{Error, Result};

/// Default config file probed when no `--config` path is given
pub const DEFAULT_CONFIG_FILE: &str = "travel-graph.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Neo4j connection configuration
    #[serde(default)]
    pub neo4j: Neo4jConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_addr: SocketAddr,
}

/// Neo4j connection configuration
///
/// The three external parameters the store boundary needs: endpoint URI,
/// credentials, and target database name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Neo4jConfig {
    /// Bolt endpoint URI, e.g. `neo4j://localhost:7687` or `neo4j+s://…`
    pub uri: String,

    /// Username for basic auth
    pub username: String,

    /// Password for basic auth
    pub password: String,

    /// Target database name
    pub database: String,

    /// Upper bound on pooled Bolt connections
    pub max_connections: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            neo4j: Neo4jConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8080".parse().unwrap(),
        }
    }
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "neo4j://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: String::new(),
            database: "neo4j".to_string(),
            max_connections: 16,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional TOML file, and
    /// environment variables.
    ///
    /// An explicitly given path must exist; the default path is probed and
    /// silently skipped when absent.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_file(DEFAULT_CONFIG_FILE).unwrap_or_default(),
        };

        // Override with environment variables
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        use std::env;

        // Server overrides
        if let Ok(addr) = env::var("TG_HTTP_ADDR") {
            self.server.http_addr = addr
                .parse()
                .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
        }

        // Neo4j overrides
        if let Ok(uri) = env::var("NEO4J_URI") {
            self.neo4j.uri = uri;
        }

        if let Ok(username) = env::var("NEO4J_USERNAME") {
            self.neo4j.username = username;
        }

        if let Ok(password) = env::var("NEO4J_PASSWORD") {
            self.neo4j.password = password;
        }

        if let Ok(database) = env::var("NEO4J_DATABASE") {
            self.neo4j.database = database;
        }

        if let Ok(max_conn) = env::var("TG_MAX_CONNECTIONS") {
            self.neo4j.max_connections = max_conn
                .parse()
                .map_err(|e| Error::config(format!("Invalid max connections: {}", e)))?;
        }

        // Logging overrides
        if let Ok(level) = env::var("TG_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.neo4j.uri.is_empty() {
            return Err(Error::config("Neo4j URI must not be empty"));
        }

        if self.neo4j.database.is_empty() {
            return Err(Error::config("Neo4j database name must not be empty"));
        }

        if self.neo4j.max_connections == 0 {
            return Err(Error::config("Max connections must be at least 1"));
        }

        // Validate log level
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(Error::config("Invalid log level")),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for var in [
            "TG_HTTP_ADDR",
            "TG_MAX_CONNECTIONS",
            "TG_LOG_LEVEL",
            "NEO4J_URI",
            "NEO4J_USERNAME",
            "NEO4J_PASSWORD",
            "NEO4J_DATABASE",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.http_addr.port(), 8080);
        assert_eq!(config.neo4j.uri, "neo4j://localhost:7687");
        assert_eq!(config.neo4j.database, "neo4j");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[neo4j]\nuri = \"neo4j+s://example.databases.neo4j.io\"\npassword = \"secret\""
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.neo4j.uri, "neo4j+s://example.databases.neo4j.io");
        assert_eq!(config.neo4j.password, "secret");
        // Untouched sections keep their defaults
        assert_eq!(config.server.http_addr.port(), 8080);
        assert_eq!(config.neo4j.username, "neo4j");
    }

    #[test]
    fn test_from_file_missing_path_fails() {
        assert!(Config::from_file("/nonexistent/travel-graph.toml").is_err());
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        assert!(Config::load(Some("/nonexistent/travel-graph.toml")).is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_connections_rejected() {
        let mut config = Config::default();
        config.neo4j.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("NEO4J_URI", "neo4j://db.internal:7687");
        std::env::set_var("NEO4J_PASSWORD", "hunter2");
        std::env::set_var("NEO4J_DATABASE", "people");
        std::env::set_var("TG_HTTP_ADDR", "127.0.0.1:9999");

        let config = Config::load(None).unwrap();
        assert_eq!(config.neo4j.uri, "neo4j://db.internal:7687");
        assert_eq!(config.neo4j.password, "hunter2");
        assert_eq!(config.neo4j.database, "people");
        assert_eq!(config.server.http_addr.port(), 9999);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_env_address_rejected() {
        clear_env();
        std::env::set_var("TG_HTTP_ADDR", "not-an-address");

        assert!(Config::load(None).is_err());

        clear_env();
    }
}
