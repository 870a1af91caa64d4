//! Handler for health check endpoint.

use axum::{Json, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::graphql::canonical_types;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Canonical type registry is available
/// - **503 Service Unavailable**: Registry failed to build
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "schema": {
///       "status": "ok",
///       "message": "10 canonical types registered"
///     }
///   }
/// }
/// ```
pub async fn health_handler() -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let schema_check = check_schema();
    let healthy = schema_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            schema: schema_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks that the canonical type registry is built.
fn check_schema() -> CheckStatus {
    match canonical_types() {
        Ok(registry) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{} canonical types registered", registry.len())),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Registry error: {}", e)),
        },
    }
}
