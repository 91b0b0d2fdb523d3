//! HTTP request handlers for the Travel Graph API
//!
//! Handlers are generic over the [`PersonStore`] implementation so the
//! resource layer can be exercised against an in-memory store double without
//! a running database. Shape validation happens here and never reaches the
//! data layer.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::core::types::Person;
use crate::store::PersonStore;

/// Acknowledgement body returned by write operations
#[derive(Debug, Serialize)]
pub struct Message {
    /// Human-readable outcome description
    pub message: String,
}

impl Message {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Query parameters accepted by the filter action
#[derive(Debug, Deserialize)]
pub struct FilterParams {
    /// Minimum age, inclusive; must parse as an integer
    pub age: Option<String>,
    /// Place name that must have been visited
    pub place: Option<String>,
}

/// JSON extractor that maps rejections to single-field 400 responses
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                let message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid request body: {}", err)
                    }
                    JsonRejection::JsonSyntaxError(_) => "Malformed JSON".to_string(),
                    JsonRejection::MissingJsonContentType(_) => {
                        "Expected 'application/json' content type".to_string()
                    }
                    _ => "Invalid JSON request".to_string(),
                };
                Err(ApiError::bad_request(message))
            }
        }
    }
}

/// GET /persons
pub async fn list_people<S: PersonStore>(
    State(store): State<Arc<S>>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let people = store.list_people().await?;
    Ok(Json(people))
}

/// POST /person
pub async fn create_person<S: PersonStore>(
    State(store): State<Arc<S>>,
    JsonBody(person): JsonBody<Person>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    person.validate()?;
    store.create_person(&person).await?;
    Ok((StatusCode::CREATED, Json(Message::new("Person created"))))
}

/// GET /person/{name}
pub async fn person_by_name<S: PersonStore>(
    State(store): State<Arc<S>>,
    Path(name): Path<String>,
) -> Result<Json<Person>, ApiError> {
    match store.person_by_name(&name).await? {
        Some(person) => Ok(Json(person)),
        None => Err(ApiError::not_found(format!("Person not found: {}", name))),
    }
}

/// PUT /person/{name}
///
/// The path parameter is authoritative; a differing `name` in the body is
/// ignored.
pub async fn update_person<S: PersonStore>(
    State(store): State<Arc<S>>,
    Path(name): Path<String>,
    JsonBody(person): JsonBody<Person>,
) -> Result<Json<Message>, ApiError> {
    person.validate()?;
    store.update_person(&name, &person).await?;
    Ok(Json(Message::new("Person updated")))
}

/// DELETE /person/{name}
///
/// Deleting a name that does not exist is a success, not a 404.
pub async fn delete_person<S: PersonStore>(
    State(store): State<Arc<S>>,
    Path(name): Path<String>,
) -> Result<Json<Message>, ApiError> {
    store.delete_person(&name).await?;
    Ok(Json(Message::new("Person deleted")))
}

/// GET /persons/city/{city}
pub async fn people_by_city<S: PersonStore>(
    State(store): State<Arc<S>>,
    Path(city): Path<String>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let people = store.people_by_city(&city).await?;
    Ok(Json(people))
}

/// GET /persons/filter?age=&place=
///
/// Both parameters are required; a missing or unparseable `age` is rejected
/// before any store call is made.
pub async fn people_by_filter<S: PersonStore>(
    State(store): State<Arc<S>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let age = params
        .age
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Missing required query parameter: age"))?;
    let min_age: i64 = age
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid age parameter: {}", age)))?;
    let place = params
        .place
        .filter(|place| !place.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required query parameter: place"))?;

    let people = store.people_by_min_age_and_place(min_age, &place).await?;
    Ok(Json(people))
}

/// DELETE /reset
///
/// Wipes the entire graph. Intended for test and staging use only.
pub async fn reset_graph<S: PersonStore>(
    State(store): State<Arc<S>>,
) -> Result<Json<Message>, ApiError> {
    store.reset().await?;
    Ok(Json(Message::new("Graph reset")))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
    })
}
