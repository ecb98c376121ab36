//! Error types and response classification for the request pipeline.
//!
//! This module contains the closed [`Error`] type returned by every API
//! call, and the classifier that maps an HTTP response to exactly one of
//! its variants.
//!
//! # Error Handling
//!
//! Callers pattern-match on the variant rather than inspecting strings:
//!
//! ```rust,ignore
//! use dokan_api::Error;
//!
//! match client.products().get(42).await {
//!     Ok(product) => println!("{}", product.name),
//!     Err(Error::NotFound { resource, id }) => {
//!         println!("no such {resource} ({id})");
//!     }
//!     Err(Error::RateLimited { retry_after }) => {
//!         println!("throttled, retry in {retry_after}s");
//!     }
//!     Err(Error::Api { code, message, status, .. }) => {
//!         println!("API failure {status}: {code} - {message}");
//!     }
//!     Err(other) => return Err(other.into()),
//! }
//! ```
//!
//! # Classification
//!
//! A failed response is classified deterministically from its status code
//! and body. A structured Dokan error payload (`{"code", "message",
//! "data"}`) with a non-empty code always wins; otherwise a fixed
//! status-code table applies. The pipeline never logs or swallows a
//! failure: every classified error is returned to the caller.

use serde::Deserialize;
use thiserror::Error;

use crate::auth::AuthError;

/// Fallback `Retry-After` value used for 429 responses that omit the header.
pub const DEFAULT_RATE_LIMIT_RETRY_AFTER_SECS: u64 = 60;

/// The error type returned by every Dokan API operation.
///
/// Exactly one variant is produced per failed call, derived from the
/// transport outcome, the HTTP status code, and the parsed body — never
/// from caller-provided hints.
#[derive(Debug, Error)]
pub enum Error {
    /// A transport-level failure (DNS, connection, TLS, I/O, timeout).
    ///
    /// Always wraps the underlying cause. Retryable.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Credentials were missing, invalid, or rejected by the server.
    ///
    /// Produced locally by [`Credentials::attach`](crate::Credentials::attach)
    /// or from a 401/403 response. Never retried.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A structured error reported by the Dokan API.
    #[error("dokan api error: {code} - {message}")]
    Api {
        /// Machine-readable error code (e.g. `dokan_rest_invalid_product_id`).
        code: String,
        /// Human-readable message from the server.
        message: String,
        /// The HTTP status code of the response.
        status: u16,
        /// Optional additional data from the error payload.
        data: Option<serde_json::Value>,
    },

    /// The requested resource does not exist.
    #[error("resource not found: {resource} with ID {id}")]
    NotFound {
        /// The resource kind (e.g. "product").
        resource: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The server is throttling requests (429).
    #[error("rate limit exceeded, retry after {retry_after} seconds")]
    RateLimited {
        /// Seconds to wait before retrying, from the `Retry-After` header
        /// or the configured fallback.
        retry_after: u64,
    },

    /// A caller-side pre-submission check failed.
    ///
    /// Never produced by the pipeline itself.
    #[error("validation error on field '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// Machine-readable validation code.
        code: String,
        /// Human-readable message.
        message: String,
    },

    /// Query parameters could not be encoded.
    ///
    /// Produced locally, before any network I/O.
    #[error("failed to encode query parameters: {0}")]
    Query(String),

    /// A request or response payload could not be (de)serialized.
    #[error("failed to parse payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The caller-supplied deadline expired before the call completed.
    #[error("deadline exceeded before the request could complete")]
    DeadlineExceeded,
}

impl Error {
    /// Returns `true` when the retry controller may attempt the call again.
    ///
    /// Transient failures — network errors, rate limiting, and server-side
    /// (5xx) API errors — are retryable. Client errors other than 429,
    /// authentication failures, and local errors are terminal.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(Box::new(err))
    }
}

/// The error payload shape returned by the Dokan REST API.
#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Classifies a failed HTTP response into exactly one [`Error`] variant.
///
/// Returns `None` for status codes below 400. A structured payload with a
/// non-empty `code` wins over the generic status mapping; otherwise the
/// fixed fallback table applies. `retry_after` is the parsed `Retry-After`
/// header, and `rate_limit_retry_after` the configured fallback for 429
/// responses that omit it.
#[must_use]
pub(crate) fn classify_response(
    status: u16,
    body: &[u8],
    retry_after: Option<u64>,
    rate_limit_retry_after: u64,
) -> Option<Error> {
    if status < 400 {
        return None;
    }

    // A structured Dokan error payload takes precedence over the table.
    if let Ok(payload) = serde_json::from_slice::<ApiErrorPayload>(body) {
        if !payload.code.is_empty() {
            return Some(Error::Api {
                code: payload.code,
                message: payload.message,
                status,
                data: payload.data,
            });
        }
    }

    Some(match status {
        401 => Error::Auth(AuthError::Denied("unauthorized access".to_string())),
        403 => Error::Auth(AuthError::Denied("forbidden access".to_string())),
        404 => Error::NotFound {
            resource: "resource".to_string(),
            id: "unknown".to_string(),
        },
        429 => Error::RateLimited {
            retry_after: retry_after.unwrap_or(rate_limit_retry_after),
        },
        400 => Error::Api {
            code: "bad_request".to_string(),
            message: "bad request".to_string(),
            status,
            data: None,
        },
        500 => Error::Api {
            code: "internal_error".to_string(),
            message: "internal server error".to_string(),
            status,
            data: None,
        },
        _ => Error::Api {
            code: "http_error".to_string(),
            message: format!("HTTP {status} error"),
            status,
            data: None,
        },
    })
}
