//! API route configuration.

use crate::api::handlers::{graphql_get_handler, graphql_handler, health_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public routes of the service.
///
/// # Endpoints
///
/// - `POST /graphql` - Execute a query sent as JSON
/// - `GET  /graphql` - Execute a query from the query string, or open GraphiQL
/// - `GET  /health`  - Health check
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/graphql", get(graphql_get_handler).post(graphql_handler))
        .route("/health", get(health_handler))
}
