//! HTTP request types for the Dokan API SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! describing a single API call. A request is an immutable value built
//! fresh per call; the [`HttpClient`](crate::clients::HttpClient) turns it
//! into an actual HTTP exchange.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tokio::time::Instant;

use crate::clients::errors::Error;
use crate::clients::query::to_query_pairs;

/// HTTP methods supported by the Dokan API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A description of one API call.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder
/// pattern.
///
/// # Example
///
/// ```rust
/// use dokan_api::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// // GET request
/// let get_request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/42")
///     .build();
///
/// // POST request with JSON body
/// let post_request = HttpRequest::builder(HttpMethod::Post, "/wp-json/dokan/v1/products/")
///     .body(json!({"name": "Widget", "type": "simple"}))
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The path relative to the base URL.
    pub path: String,
    /// Query parameters as ordered key/value pairs.
    pub query: Option<Vec<(String, String)>>,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Additional headers, applied last (may override defaults).
    pub extra_headers: Option<HashMap<String, String>>,
    /// Optional whole-call deadline, spanning all retry attempts.
    pub deadline: Option<Instant>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    path: String,
    query: Option<Vec<(String, String)>>,
    body: Option<serde_json::Value>,
    extra_headers: Option<HashMap<String, String>>,
    deadline: Option<Instant>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            extra_headers: None,
            deadline: None,
        }
    }

    /// Flattens a parameter struct into query pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Query`] when the struct contains unsupported field
    /// types; the failure occurs before any network I/O.
    pub fn query<T: Serialize>(mut self, params: &T) -> Result<Self, Error> {
        let pairs = to_query_pairs(params)?;
        if !pairs.is_empty() {
            self.query = Some(pairs);
        }
        Ok(self)
    }

    /// Sets pre-encoded query pairs directly.
    #[must_use]
    pub fn query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = Some(pairs);
        self
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes a value as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the value cannot be serialized.
    pub fn json_body<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Sets a whole-call deadline.
    ///
    /// The deadline bounds every attempt and every backoff wait; once it
    /// passes, the call returns
    /// [`Error::DeadlineExceeded`](crate::Error::DeadlineExceeded)
    /// without completing any in-progress wait.
    #[must_use]
    pub const fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            path: self.path,
            query: self.query,
            body: self.body,
            extra_headers: self.extra_headers,
            deadline: self.deadline,
        }
    }
}
