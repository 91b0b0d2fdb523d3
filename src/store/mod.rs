//! Graph data access layer
//!
//! Translates between the [`Person`] resource model and the graph schema
//! (Person nodes, Place nodes, VISITED edges), executing queries inside
//! appropriately-scoped transactions. The HTTP layer depends on this module
//! only through [`PersonStore`].

pub mod neo4j;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::types::Person;

pub use neo4j::Neo4jStore;

/// Operations the HTTP resource layer needs from the graph store.
///
/// Every operation returns at most one error per call; there is no retry,
/// no backoff, and no partial-success reporting inside this layer.
#[async_trait]
pub trait PersonStore: Send + Sync + 'static {
    /// Return every person together with their full place list.
    ///
    /// A person with no VISITED edges yields an empty list, never null.
    async fn list_people(&self) -> Result<Vec<Person>>;

    /// Upsert a person by name, then upsert their places and VISITED edges.
    ///
    /// Runs in a single transaction scope; a failure partway through is
    /// surfaced as one aggregate error.
    async fn create_person(&self, person: &Person) -> Result<()>;

    /// Resolve a person by name, or `None` when no such node exists.
    async fn person_by_name(&self, name: &str) -> Result<Option<Person>>;

    /// Set a person's properties and replace their entire VISITED edge set
    /// with the supplied place list (full replace, not merge).
    ///
    /// A name matching no node silently succeeds with zero rows affected.
    async fn update_person(&self, name: &str, person: &Person) -> Result<()>;

    /// Detach-delete a person node and all its incident edges.
    ///
    /// Deleting a non-existent name is a no-op success.
    async fn delete_person(&self, name: &str) -> Result<()>;

    /// Return every person who visited the given city, each with their full
    /// place list (not just the matched city).
    async fn people_by_city(&self, city: &str) -> Result<Vec<Person>>;

    /// Return every person who visited `place` and has `age >= min_age`,
    /// each with their full place list.
    async fn people_by_min_age_and_place(&self, min_age: i64, place: &str) -> Result<Vec<Person>>;

    /// Detach-delete every node and edge in the graph. Irreversible;
    /// intended for test and staging use only.
    async fn reset(&self) -> Result<()>;
}
