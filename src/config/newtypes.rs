//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated marketplace base URL.
///
/// This newtype validates that the URL has a scheme and a host, and
/// normalizes it by stripping any trailing slash so request paths can be
/// joined without producing duplicate separators.
///
/// # Accepted Formats
///
/// - `https://marketplace.example.com`
/// - `https://marketplace.example.com/` - trailing slash is stripped
/// - `http://localhost:8080/wordpress` - paths and ports are preserved
///
/// # Example
///
/// ```rust
/// use dokan_api::BaseUrl;
///
/// let url = BaseUrl::new("https://marketplace.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://marketplace.example.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("marketplace.example.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme,
    /// a non-alphabetic scheme, or an empty host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        // Find scheme
        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        // Find host
        let host_start = scheme_end + 3; // Skip "://"
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        let host = &url[host_start..host_end];
        if host.is_empty() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Joins a request path onto the base URL.
    ///
    /// The result has exactly one slash between the base and the path,
    /// regardless of how either side was written.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_validates_format() {
        let url = BaseUrl::new("https://marketplace.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), Some("marketplace.example.com"));

        // With port
        let url = BaseUrl::new("http://localhost:8080").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("localhost"));

        // With path
        let url = BaseUrl::new("https://shop.example.com/wordpress").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), Some("shop.example.com"));
        assert_eq!(url.as_ref(), "https://shop.example.com/wordpress");
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://shop.example.com/").unwrap();
        assert_eq!(url.as_ref(), "https://shop.example.com");

        let url = BaseUrl::new("https://shop.example.com/wp///").unwrap();
        assert_eq!(url.as_ref(), "https://shop.example.com/wp");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        // No scheme
        assert!(BaseUrl::new("marketplace.example.com").is_err());

        // Empty host
        assert!(BaseUrl::new("https://").is_err());

        // Invalid scheme
        assert!(BaseUrl::new("://example.com").is_err());

        // Empty input
        assert!(BaseUrl::new("").is_err());
    }

    #[test]
    fn test_join_normalizes_separators() {
        let url = BaseUrl::new("https://shop.example.com").unwrap();
        assert_eq!(
            url.join("/wp-json/dokan/v1/products/42"),
            "https://shop.example.com/wp-json/dokan/v1/products/42"
        );
        assert_eq!(
            url.join("wp-json/dokan/v1/products/"),
            "https://shop.example.com/wp-json/dokan/v1/products/"
        );
    }

    #[test]
    fn test_display_matches_as_ref() {
        let url = BaseUrl::new("https://shop.example.com").unwrap();
        assert_eq!(url.to_string(), url.as_ref());
    }
}
