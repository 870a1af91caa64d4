//! The feed parser seam: URL in, canonical [`Feed`] out.

use crate::domain::entities::Feed;
use crate::error::FeedError;
use async_trait::async_trait;

/// Fetches a feed by URL and translates it into the canonical model.
///
/// The `parse` query resolver only depends on this trait, so the concrete
/// network and XML handling can be swapped out in tests.
///
/// # Implementations
///
/// - [`crate::infrastructure::feed::HttpFeedParser`] - HTTP fetch + RSS/Atom translation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedParser: Send + Sync {
    /// Fetches `url` and parses the response body.
    ///
    /// The URL is used verbatim; no shape validation happens before the
    /// request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when the document cannot be fetched or is not a
    /// well-formed RSS or Atom feed.
    async fn parse_url(&self, url: &str) -> Result<Feed, FeedError>;
}
