//! HTTP request handlers.

pub mod graphql;
pub mod health;

pub use graphql::{graphql_get_handler, graphql_handler};
pub use health::health_handler;
