//! HTTP-backed [`FeedParser`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;

use super::parse_bytes;
use crate::domain::FeedParser;
use crate::domain::entities::Feed;
use crate::error::FeedError;

/// Limits applied to every fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Upper bound for the whole request, body included.
    pub timeout: Duration,
    /// Maximum accepted response body size in bytes.
    pub max_bytes: usize,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_bytes: 10 * 1024 * 1024,
            user_agent: concat!("feedql/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fetches feeds over HTTP(S) and parses them in-process.
///
/// Holds a single pooled `reqwest` client; cloning the parser is cheap and
/// concurrent `parse_url` calls share no other state.
#[derive(Debug, Clone)]
pub struct HttpFeedParser {
    client: reqwest::Client,
    options: FetchOptions,
}

impl HttpFeedParser {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Network`] if the TLS backend cannot be initialized.
    pub fn new(options: FetchOptions) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()?;

        Ok(Self { client, options })
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest)?;

        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        read_limited_bytes(response, self.options.max_bytes).await
    }
}

#[async_trait]
impl FeedParser for HttpFeedParser {
    async fn parse_url(&self, url: &str) -> Result<Feed, FeedError> {
        tracing::debug!(url = %url, "Fetching feed");

        let bytes = tokio::time::timeout(self.options.timeout, self.fetch(url))
            .await
            .map_err(|_| FeedError::Timeout)??;

        let feed = parse_bytes(&bytes)?;

        tracing::debug!(
            url = %url,
            feed_type = %feed.feed_type,
            items = feed.items.len(),
            "Feed parsed"
        );

        Ok(feed)
    }
}

fn map_reqwest(e: reqwest::Error) -> FeedError {
    if e.is_timeout() {
        FeedError::Timeout
    } else {
        FeedError::Network(e)
    }
}

/// A length that does not fit `usize` is over any limit.
fn exceeds_limit(len: u64, limit: usize) -> bool {
    usize::try_from(len).map_or(true, |n| n > limit)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FeedError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length()
        && exceeds_limit(len, limit)
    {
        return Err(FeedError::TooLarge(limit));
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FeedError::TooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
