//! HTTP server initialization and runtime setup.
//!
//! Builds the feed parser and the executable schema, then runs the Axum
//! server until Ctrl+C.

use crate::config::Config;
use crate::domain::FeedParser;
use crate::graphql::build_schema;
use crate::infrastructure::feed::HttpFeedParser;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built
/// - The schema fails to assemble
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let parser: Arc<dyn FeedParser> = Arc::new(
        HttpFeedParser::new(config.fetch_options()).context("Failed to build HTTP client")?,
    );

    let schema =
        build_schema(parser, config.fetch_error_mode).context("Failed to build GraphQL schema")?;
    tracing::info!("GraphQL schema ready");

    let state = AppState::new(schema, config.graphiql);
    let app = app_router(state);

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}/graphql");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
