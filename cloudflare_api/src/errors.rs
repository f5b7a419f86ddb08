//! Error types for the API client.

use std::time::Duration;

use crate::response::{RawResponse, ResponseDiagnostics};
use crate::types::{ApiError, ApiMessage};

/// Errors that can occur when making API requests.
///
/// Every variant is surfaced to the immediate caller. The only local
/// recovery anywhere in the stack is the 429 retry for idempotent methods.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client could not be constructed (for example, an empty API token).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The base URL or request path did not form a valid URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request body could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The transport failed before a response status was received.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A single attempt exceeded the per-attempt timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-success status without a parseable error envelope.
    #[error("Request failed with status {status} {reason}")]
    HttpStatus {
        status: u16,
        reason: String,
        body: String,
        diagnostics: ResponseDiagnostics,
    },

    /// The envelope reported failure, either through the HTTP status or
    /// through `success: false`.
    #[error("API request failed with status {status}: {}", describe_errors(.errors))]
    Api {
        status: u16,
        errors: Vec<ApiError>,
        messages: Vec<ApiMessage>,
    },

    /// The body could not be parsed into the expected shape.
    #[error("Failed to deserialize response: {source}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Every 429 retry was spent; carries the last response seen.
    #[error("Rate limited after {attempts} attempts")]
    RateLimitExhausted {
        attempts: u32,
        last_response: Box<RawResponse>,
    },

    /// The admission queue was full.
    #[error("Request rejected: {max_in_flight} requests in flight and {max_queued} already queued")]
    AdmissionRejected {
        max_in_flight: usize,
        max_queued: usize,
    },

    /// The circuit breaker is open after repeated transient failures.
    #[error("Circuit breaker open, retry in {retry_in:?}")]
    CircuitOpen { retry_in: Duration },

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,

    /// A listing failed after some items had already been produced.
    #[error("Listing failed after {items_yielded} items over {pages_completed} pages: {source}")]
    Pagination {
        items_yielded: usize,
        pages_completed: u32,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::RateLimitExhausted { last_response, .. } => Some(last_response.status.as_u16()),
            Self::Pagination { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Structured errors reported by the envelope, empty for other kinds.
    pub fn api_errors(&self) -> &[ApiError] {
        match self {
            Self::Api { errors, .. } => errors,
            Self::Pagination { source, .. } => source.api_errors(),
            _ => &[],
        }
    }

    /// True when the failure was caused by rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExhausted { .. }) || self.status() == Some(429)
    }

    /// Strips any pagination wrapper and returns the underlying failure.
    pub fn root(&self) -> &Error {
        match self {
            Self::Pagination { source, .. } => source.root(),
            other => other,
        }
    }
}

fn describe_errors(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
