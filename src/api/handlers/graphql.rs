//! Handlers for the `/graphql` endpoint.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQLRequest;
use async_graphql_axum::rejection::GraphQLRejection;
use axum::{
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Path the explorer sends its queries to.
const ENDPOINT: &str = "/graphql";

/// Executes a GraphQL request sent as a JSON body.
///
/// # Endpoint
///
/// `POST /graphql`
///
/// # Request Body
///
/// ```json
/// {
///   "query": "query($u: String!) { parse(rssUrl: $u) { title items { title } } }",
///   "variables": { "u": "https://example.com/podcast.xml" }
/// }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: Query executed; resolver failures are listed under `errors`
/// - **400 Bad Request**: Body is not a GraphQL request
pub async fn graphql_handler(
    State(state): State<AppState>,
    request: Result<GraphQLRequest, GraphQLRejection>,
) -> Result<Response, AppError> {
    execute(&state, request).await
}

/// Executes a GraphQL request passed in the query string, or serves GraphiQL.
///
/// # Endpoint
///
/// `GET /graphql?query=...&variables=...`
///
/// Browsers (an `Accept` header listing `text/html`) get the interactive
/// explorer instead, unless it is disabled via `GRAPHIQL=false`.
pub async fn graphql_get_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<GraphQLRequest, GraphQLRejection>,
) -> Result<Response, AppError> {
    if state.graphiql && accepts_html(&headers) {
        return Ok(Html(GraphiQLSource::build().endpoint(ENDPOINT).finish()).into_response());
    }

    execute(&state, request).await
}

async fn execute(
    state: &AppState,
    request: Result<GraphQLRequest, GraphQLRejection>,
) -> Result<Response, AppError> {
    let request = request
        .map_err(|rejection| {
            AppError::bad_request("Invalid GraphQL request", json!(rejection.0.to_string()))
        })?
        .into_inner();

    let response = state.schema.execute(request).await;
    if response.is_err() {
        tracing::debug!(errors = response.errors.len(), "GraphQL request completed with errors");
    }

    let body = serde_json::to_string_pretty(&response)
        .map_err(|e| AppError::internal("Failed to serialize response", json!(e.to_string())))?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}
