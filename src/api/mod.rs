//! HTTP layer in front of the GraphQL schema.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies for non-GraphQL endpoints
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
