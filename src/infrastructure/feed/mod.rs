//! Feed fetching and RSS/Atom translation.
//!
//! # Pipeline
//!
//! 1. [`HttpFeedParser`] fetches the document with a bounded timeout and size
//! 2. [`xml::parse_document`] folds the XML into a namespace-aware tree
//! 3. [`parse_bytes`] sniffs the root element and picks a translator
//! 4. [`rss`] or [`atom`] builds the canonical [`Feed`], with [`extensions`]
//!    filling in iTunes and Dublin Core metadata

pub mod atom;
pub mod dates;
pub mod extensions;
pub mod fetcher;
pub mod namespaces;
pub mod rss;
pub mod xml;

pub use fetcher::{FetchOptions, HttpFeedParser};

use crate::domain::entities::Feed;
use crate::error::FeedError;

/// Parses a feed document held in memory.
///
/// # Errors
///
/// - [`FeedError::Parse`] if the bytes are not well-formed XML
/// - [`FeedError::UnsupportedFormat`] if the root element is neither
///   `rss`, `rdf:RDF` nor `feed`
pub fn parse_bytes(bytes: &[u8]) -> Result<Feed, FeedError> {
    let root = xml::parse_document(bytes)?;

    match root.name.as_str() {
        "rss" => rss::translate(&root),
        "RDF" if root.in_namespace(namespaces::RDF) => rss::translate(&root),
        "feed" => Ok(atom::translate(&root)),
        other => Err(FeedError::UnsupportedFormat(other.to_string())),
    }
}
