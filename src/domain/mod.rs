//! Domain layer: the canonical feed model and the parser contract.
//!
//! # Architecture
//!
//! - [`entities`] - canonical entities shared by every wire format
//! - [`feed_parser`] - the [`FeedParser`] trait implemented by the infrastructure layer
//!
//! The domain layer has no dependencies on the GraphQL or HTTP layers.

pub mod entities;
pub mod feed_parser;

pub use feed_parser::FeedParser;

#[cfg(test)]
pub use feed_parser::MockFeedParser;
