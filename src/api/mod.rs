//! # API Module
//!
//! This module provides the HTTP resource layer of Travel Graph: routing,
//! shape validation, and the mapping of data-layer outcomes to response
//! codes.
//!
//! ## Endpoints Overview
//!
//! ### Person Operations
//! - `GET /persons` - List all people with their place lists
//! - `POST /person` - Create (upsert) a person
//! - `GET /person/{name}` - Get a person by name
//! - `PUT /person/{name}` - Update a person, replacing their place list
//! - `DELETE /person/{name}` - Delete a person (idempotent)
//!
//! ### Query Operations
//! - `GET /persons/city/{city}` - Everyone who visited a city
//! - `GET /persons/filter?age=&place=` - Minimum age and visited place
//!
//! ### Maintenance
//! - `DELETE /reset` - Wipe the entire graph (test/staging only)
//! - `GET /health` - Health check

pub mod error;
pub mod handlers;
pub mod server;

// Re-export commonly used items
pub use error::ApiError;
pub use server::{create_app, start_server};
