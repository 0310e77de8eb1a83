//! Error types for the upstream API.

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong on the wire; no request is ever retried.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures, and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for the address list endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The key cannot be sent as an HTTP header value.
    #[error("API key contains characters that are not allowed in an HTTP header")]
    InvalidKey,

    /// HTTP 401: the key is wrong or the tenant lives on the other endpoint.
    #[error(
        "HTTP 401 received from {endpoint}. Check the API key and the API endpoint. \
         Some Cloud Managed deployments use the prod6 endpoint; run with --endpoint2 to use it."
    )]
    Unauthorized {
        /// Endpoint that rejected the key.
        endpoint: String,
    },

    /// Any other non-2xx status.
    #[error("HTTP {status} received from {endpoint}: {body}")]
    Status {
        /// Response status.
        status: http::StatusCode,
        /// Endpoint that answered.
        endpoint: String,
        /// Response body, lossily decoded.
        body: String,
    },
}

impl ApiError {
    /// Returns `true` for the 401 case that has operator guidance attached.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
