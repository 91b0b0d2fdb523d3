//! Resource model for the Travel Graph service
//!
//! The HTTP layer and the graph layer exchange [`Person`] values; the graph
//! schema behind them (Person and Place nodes joined by VISITED edges) never
//! leaks past the store.

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// A person and the set of places they have visited.
///
/// `name` is the unique business key within the graph; there is no generated
/// identifier. `places_visited` is set-like: order carries no meaning and an
/// absent field deserializes to an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique name of the person
    pub name: String,
    /// Age in years, non-negative
    pub age: i64,
    /// Free-form gender string
    pub gender: String,
    /// Names of visited places, possibly empty
    #[serde(default)]
    pub places_visited: Vec<String>,
}

impl Person {
    /// Check the payload invariants the store relies on.
    ///
    /// Field *presence* is already enforced during JSON binding; this covers
    /// the value-level rules: a non-empty name and a non-negative age.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("name must not be empty"));
        }
        if self.age < 0 {
            return Err(Error::validation("age must be non-negative"));
        }
        Ok(())
    }
}
