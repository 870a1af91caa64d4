//! Error types for every layer of the service.
//!
//! - [`AppError`] - HTTP-level failures rendered as a JSON error envelope
//! - [`FeedError`] - request-level failures of the feed parser
//! - [`RegistryError`] - schema construction defects, fatal at startup

use async_graphql::ErrorExtensions;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Errors that can occur while fetching and parsing a feed.
///
/// Covers the full lifecycle of a `parse` query: network issues,
/// HTTP errors, oversized bodies and documents that are not RSS or Atom.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured fetch timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the configured size limit
    #[error("Response too large (limit: {0} bytes)")]
    TooLarge(usize),
    /// Body is not well-formed XML
    #[error("Parse error: {0}")]
    Parse(String),
    /// Well-formed XML whose root element is neither RSS nor Atom
    #[error("Unsupported feed format: root element <{0}>")]
    UnsupportedFormat(String),
}

impl FeedError {
    /// GraphQL error code reported in the `extensions.code` field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::HttpStatus(_) | Self::Timeout | Self::TooLarge(_) => {
                "FETCH_ERROR"
            }
            Self::Parse(_) | Self::UnsupportedFormat(_) => "PARSE_ERROR",
        }
    }
}

impl ErrorExtensions for FeedError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

/// Defects in the canonical type registry or the executable schema.
///
/// None of these can happen at request time; the process refuses to serve
/// traffic when one is returned during startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("type `{0}` is declared twice")]
    DuplicateType(String),

    #[error("field `{0}` is declared twice")]
    DuplicateField(String),

    #[error("type `{owner}` references undeclared type `{referenced}`")]
    UnknownType { owner: String, referenced: String },

    #[error("failed to assemble schema: {0}")]
    Schema(String),
}
