//! # feedql
//!
//! A GraphQL service that fetches RSS and Atom feeds and returns them in one
//! canonical shape, built with Axum and async-graphql.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Canonical feed entities and the [`domain::FeedParser`] trait
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP fetching and RSS/Atom translation
//! - **GraphQL Layer** ([`graphql`]) - Type registry and executable schema
//! - **API Layer** ([`api`]) - HTTP handlers and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run
//!
//! curl -s localhost:3000/graphql \
//!   -H 'content-type: application/json' \
//!   -d '{"query":"{ parse(rssUrl: \"https://example.com/podcast.xml\") { title items { title } } }"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod domain;
pub mod error;
pub mod graphql;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, FeedError, RegistryError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::domain::FeedParser;
    pub use crate::domain::entities::{Feed, Item, ItunesCategory};
    pub use crate::error::{AppError, FeedError, RegistryError};
    pub use crate::graphql::{FetchErrorMode, build_schema};
    pub use crate::infrastructure::feed::{FetchOptions, HttpFeedParser};
    pub use crate::state::AppState;
}
