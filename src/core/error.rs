//! Error types and handling for Travel Graph
//!
//! This module defines all error types used throughout the service. The HTTP
//! layer decides response codes from these; nothing below it ever swallows a
//! store failure.

use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Travel Graph service
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or missing request fields; never reaches the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any failure surfaced by the graph store driver
    #[error("Store error: {0}")]
    Store(#[from] neo4rs::Error),

    /// A store row could not be decoded into the resource model
    #[error("Store decode error: {0}")]
    Decode(#[from] neo4rs::DeError),

    /// Internal system errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if this is a client error (4xx equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotFound(_))
    }

    /// Check if this is a server error (5xx equivalent)
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}
