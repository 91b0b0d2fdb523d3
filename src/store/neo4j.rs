//! Neo4j implementation of the graph data access layer
//!
//! Wraps a `neo4rs` connection pool. Reads run as single auto-commit queries
//! and reassemble each person's nested place list from flattened rows with
//! `collect()`. Writes open one explicit transaction, issue their statement
//! sequence, and commit; a failure partway through abandons the transaction
//! and is surfaced as the single error for the call.

use neo4rs::{query, ConfigBuilder, Graph, Query, Row};

use crate::core::config::Neo4jConfig;
use crate::core::error::{Error, Result};
use crate::core::types::Person;
use crate::store::PersonStore;

const RETURN_PERSON: &str =
    "RETURN p.name AS name, p.age AS age, p.gender AS gender, collect(pl.name) AS places_visited";

/// Graph store backed by a pooled Neo4j Bolt connection.
///
/// Constructed once at startup and shared across requests; sessions and
/// transactions are acquired per call and never outlive it.
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connect to Neo4j and verify connectivity with a trivial probe query,
    /// so that a bad URI or credential fails at startup rather than on the
    /// first request.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self> {
        let driver_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.username.as_str())
            .password(config.password.as_str())
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .build()
            .map_err(|e| Error::config(format!("Invalid Neo4j configuration: {}", e)))?;

        let graph = Graph::connect(driver_config).await?;
        graph.run(query("RETURN 1")).await?;

        tracing::info!(uri = %config.uri, database = %config.database, "Connected to Neo4j");

        Ok(Self { graph })
    }

    /// Run a read query and decode every row into a [`Person`].
    async fn fetch_people(&self, q: Query) -> Result<Vec<Person>> {
        let mut rows = self.graph.execute(q).await?;
        let mut people = Vec::new();
        while let Some(row) = rows.next().await? {
            people.push(person_from_row(&row)?);
        }
        Ok(people)
    }
}

#[async_trait::async_trait]
impl PersonStore for Neo4jStore {
    async fn list_people(&self) -> Result<Vec<Person>> {
        let q = format!(
            "MATCH (p:Person) \
             OPTIONAL MATCH (p)-[:VISITED]->(pl:Place) \
             {RETURN_PERSON}"
        );
        self.fetch_people(query(&q)).await
    }

    async fn create_person(&self, person: &Person) -> Result<()> {
        let mut txn = self.graph.start_txn().await?;
        txn.run(
            query("MERGE (p:Person {name: $name}) SET p.age = $age, p.gender = $gender")
                .param("name", person.name.as_str())
                .param("age", person.age)
                .param("gender", person.gender.as_str()),
        )
        .await?;
        for place in &person.places_visited {
            txn.run(merge_visited(&person.name, place)).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn person_by_name(&self, name: &str) -> Result<Option<Person>> {
        let q = format!(
            "MATCH (p:Person {{name: $name}}) \
             OPTIONAL MATCH (p)-[:VISITED]->(pl:Place) \
             {RETURN_PERSON}"
        );
        let mut rows = self.graph.execute(query(&q).param("name", name)).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(person_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn update_person(&self, name: &str, person: &Person) -> Result<()> {
        let mut txn = self.graph.start_txn().await?;
        txn.run(
            query("MATCH (p:Person {name: $name}) SET p.age = $age, p.gender = $gender")
                .param("name", name)
                .param("age", person.age)
                .param("gender", person.gender.as_str()),
        )
        .await?;
        // Full replace: drop every existing VISITED edge before re-creating
        // the set from the payload.
        txn.run(
            query("MATCH (p:Person {name: $name})-[v:VISITED]->(:Place) DELETE v")
                .param("name", name),
        )
        .await?;
        for place in &person.places_visited {
            txn.run(merge_visited(name, place)).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn delete_person(&self, name: &str) -> Result<()> {
        let mut txn = self.graph.start_txn().await?;
        txn.run(query("MATCH (p:Person {name: $name}) DETACH DELETE p").param("name", name))
            .await?;
        txn.commit().await?;
        Ok(())
    }

    async fn people_by_city(&self, city: &str) -> Result<Vec<Person>> {
        let q = format!(
            "MATCH (p:Person)-[:VISITED]->(:Place {{name: $city}}) \
             WITH DISTINCT p \
             MATCH (p)-[:VISITED]->(pl:Place) \
             {RETURN_PERSON}"
        );
        self.fetch_people(query(&q).param("city", city)).await
    }

    async fn people_by_min_age_and_place(&self, min_age: i64, place: &str) -> Result<Vec<Person>> {
        let q = format!(
            "MATCH (p:Person)-[:VISITED]->(:Place {{name: $place}}) \
             WHERE p.age >= $min_age \
             WITH DISTINCT p \
             MATCH (p)-[:VISITED]->(pl:Place) \
             {RETURN_PERSON}"
        );
        self.fetch_people(query(&q).param("place", place).param("min_age", min_age))
            .await
    }

    async fn reset(&self) -> Result<()> {
        let mut txn = self.graph.start_txn().await?;
        txn.run(query("MATCH (n) DETACH DELETE n")).await?;
        txn.commit().await?;
        Ok(())
    }
}

/// Statement upserting a Place node by name and the VISITED edge to it.
///
/// MERGE on both the node and the edge keeps Place nodes shared between
/// people and makes re-running the statement idempotent.
fn merge_visited(name: &str, place: &str) -> Query {
    query(
        "MATCH (p:Person {name: $name}) \
         MERGE (pl:Place {name: $place}) \
         MERGE (p)-[:VISITED]->(pl)",
    )
    .param("name", name)
    .param("place", place)
}

fn person_from_row(row: &Row) -> Result<Person> {
    Ok(Person {
        name: row.get("name")?,
        age: decode_age(row),
        gender: row.get("gender")?,
        places_visited: row.get("places_visited")?,
    })
}

/// Normalize the `age` column to a plain integer.
///
/// Depending on driver and server version the value arrives as a 64-bit
/// integer or a float; anything else falls back to `0`, loudly, so that a
/// schema drift shows up in the logs instead of silently zeroing ages.
fn decode_age(row: &Row) -> i64 {
    if let Ok(age) = row.get::<i64>("age") {
        return age;
    }
    if let Ok(age) = row.get::<f64>("age") {
        return age as i64;
    }
    tracing::warn!("age column has an unrecognized representation, defaulting to 0");
    0
}
