//! HTTP response types for the Dokan API SDK.
//!
//! This module provides the [`HttpResponse`] envelope produced by each
//! HTTP exchange, with accessors for the WordPress pagination headers and
//! typed JSON decoding.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::errors::Error;

/// Header carrying the total number of items in a collection.
pub const TOTAL_HEADER: &str = "x-wp-total";

/// Header carrying the total number of pages in a collection.
pub const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// An HTTP response envelope from the Dokan API.
///
/// Contains the status code, the response headers (lower-cased keys,
/// multiple values per header), and the raw body bytes. The envelope is
/// owned by the caller once returned; the client holds no reference to it.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers; keys are lower-cased, values keep response order.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new response envelope.
    #[must_use]
    pub const fn new(status: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns the first value of the named header, if present.
    ///
    /// Header names are matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the total item count from the `X-WP-Total` header.
    ///
    /// An absent or unparseable header yields 0.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.int_header(TOTAL_HEADER)
    }

    /// Returns the total page count from the `X-WP-TotalPages` header.
    ///
    /// An absent or unparseable header yields 0.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.int_header(TOTAL_PAGES_HEADER)
    }

    /// Returns the `Retry-After` header in whole seconds, if parseable.
    #[must_use]
    pub fn retry_after(&self) -> Option<u64> {
        self.header("retry-after")
            .and_then(|value| value.parse().ok())
    }

    /// Decodes the response body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    fn int_header(&self, name: &str) -> u64 {
        self.header(name)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(entries: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in entries {
            map.entry((*key).to_string())
                .or_default()
                .push((*value).to_string());
        }
        map
    }

    #[test]
    fn test_is_success_for_2xx_only() {
        for status in [200, 201, 204, 299] {
            assert!(HttpResponse::new(status, HashMap::new(), Vec::new()).is_success());
        }
        for status in [199, 301, 400, 404, 429, 500] {
            assert!(!HttpResponse::new(status, HashMap::new(), Vec::new()).is_success());
        }
    }

    #[test]
    fn test_pagination_headers_are_parsed() {
        let response = HttpResponse::new(
            200,
            headers(&[("x-wp-total", "57"), ("x-wp-totalpages", "6")]),
            Vec::new(),
        );
        assert_eq!(response.total_items(), 57);
        assert_eq!(response.total_pages(), 6);
    }

    #[test]
    fn test_absent_pagination_headers_yield_zero() {
        let response = HttpResponse::new(200, HashMap::new(), Vec::new());
        assert_eq!(response.total_items(), 0);
        assert_eq!(response.total_pages(), 0);
    }

    #[test]
    fn test_unparseable_pagination_headers_yield_zero() {
        let response = HttpResponse::new(200, headers(&[("x-wp-total", "lots")]), Vec::new());
        assert_eq!(response.total_items(), 0);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(200, headers(&[("x-wp-total", "3")]), Vec::new());
        assert_eq!(response.header("X-WP-Total"), Some("3"));
    }

    #[test]
    fn test_retry_after_parsing() {
        let response = HttpResponse::new(429, headers(&[("retry-after", "17")]), Vec::new());
        assert_eq!(response.retry_after(), Some(17));

        let response = HttpResponse::new(429, headers(&[("retry-after", "soon")]), Vec::new());
        assert_eq!(response.retry_after(), None);

        let response = HttpResponse::new(429, HashMap::new(), Vec::new());
        assert_eq!(response.retry_after(), None);
    }

    #[test]
    fn test_json_decoding() {
        #[derive(serde::Deserialize)]
        struct Payload {
            id: u64,
            name: String,
        }

        let response = HttpResponse::new(
            200,
            HashMap::new(),
            br#"{"id":42,"name":"Widget"}"#.to_vec(),
        );
        let payload: Payload = response.json().unwrap();
        assert_eq!(payload.id, 42);
        assert_eq!(payload.name, "Widget");
    }

    #[test]
    fn test_json_decoding_failure() {
        let response = HttpResponse::new(200, HashMap::new(), b"not json".to_vec());
        let result: Result<serde_json::Value, _> = response.json();
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
