//! HTTP server assembly for the Travel Graph API

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::store::PersonStore;

/// Creates the application router with all routes and middleware.
///
/// The store is injected as shared state; it is the only state handlers see.
/// No request timeout layer is installed: store interactions are bounded by
/// the driver's own timeouts.
pub fn create_app<S: PersonStore>(store: Arc<S>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        // Person resources
        .route("/persons", get(handlers::list_people::<S>))
        .route("/person", post(handlers::create_person::<S>))
        .route("/person/{name}", get(handlers::person_by_name::<S>))
        .route("/person/{name}", put(handlers::update_person::<S>))
        .route("/person/{name}", delete(handlers::delete_person::<S>))
        // Query routes
        .route("/persons/city/{city}", get(handlers::people_by_city::<S>))
        .route("/persons/filter", get(handlers::people_by_filter::<S>))
        // Maintenance routes
        .route("/reset", delete(handlers::reset_graph::<S>))
        .route("/health", get(handlers::health_check))
        // Apply middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // Add the store as shared state
        .with_state(store)
}

/// Start the HTTP server
pub async fn start_server<S: PersonStore>(addr: SocketAddr, store: Arc<S>) -> std::io::Result<()> {
    let app = create_app(store);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await
}
