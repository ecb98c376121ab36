//! Configuration types for the Dokan API SDK.
//!
//! This module provides the core configuration types used to initialize
//! a client for API communication with a Dokan marketplace.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`DokanConfig`]: The main configuration struct holding all SDK settings
//! - [`DokanConfigBuilder`]: A builder for constructing [`DokanConfig`] instances
//! - [`BaseUrl`]: A validated marketplace base URL newtype
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use dokan_api::{BaseUrl, Credentials, DokanConfig};
//!
//! let config = DokanConfig::builder()
//!     .base_url(BaseUrl::new("https://marketplace.example.com").unwrap())
//!     .credentials(Credentials::basic("shop-manager", "app-password"))
//!     .timeout(Duration::from_secs(10))
//!     .retry_count(5)
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use std::time::Duration;

use crate::auth::Credentials;
use crate::clients::retry::RetryPolicy;
use crate::clients::DEFAULT_RATE_LIMIT_RETRY_AFTER_SECS;
use crate::error::ConfigError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Dokan API SDK.
///
/// This struct holds everything a client needs: the target marketplace,
/// credentials, timeout, retry behavior, and an optional custom transport.
/// All of it is fixed at construction; the client never mutates its
/// configuration.
///
/// # Example
///
/// ```rust
/// use dokan_api::{BaseUrl, Credentials, DokanConfig};
///
/// let config = DokanConfig::builder()
///     .base_url(BaseUrl::new("https://marketplace.example.com").unwrap())
///     .credentials(Credentials::basic("user", "pass"))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url().as_ref(), "https://marketplace.example.com");
/// ```
#[derive(Debug)]
pub struct DokanConfig {
    base_url: BaseUrl,
    credentials: Credentials,
    timeout: Duration,
    retry_policy: RetryPolicy,
    rate_limit_retry_after: u64,
    user_agent_prefix: Option<String>,
    http_client: Option<reqwest::Client>,
}

// Verify DokanConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DokanConfig>();
};

impl DokanConfig {
    /// Creates a new builder for constructing a `DokanConfig`.
    #[must_use]
    pub fn builder() -> DokanConfigBuilder {
        DokanConfigBuilder::new()
    }

    /// Returns the marketplace base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the configured credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the fallback `Retry-After` seconds for 429 responses
    /// that omit the header.
    #[must_use]
    pub const fn rate_limit_retry_after(&self) -> u64 {
        self.rate_limit_retry_after
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Takes ownership of the custom transport, if one was configured.
    pub(crate) fn take_http_client(&mut self) -> Option<reqwest::Client> {
        self.http_client.take()
    }
}

/// Builder for constructing [`DokanConfig`] instances.
///
/// Required fields are `base_url` and `credentials`. All other fields have
/// sensible defaults.
///
/// # Defaults
///
/// - `timeout`: 30 seconds
/// - `retry_policy`: 3 attempts, 1s base delay, 30s cap, x2.0 multiplier
/// - `rate_limit_retry_after`: 60 seconds
/// - `user_agent_prefix`: `None`
/// - `http_client`: `None` (a rustls-backed client is built)
#[derive(Debug, Default)]
pub struct DokanConfigBuilder {
    base_url: Option<BaseUrl>,
    credentials: Option<Credentials>,
    timeout: Option<Duration>,
    retry_policy: Option<RetryPolicy>,
    rate_limit_retry_after: Option<u64>,
    user_agent_prefix: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl DokanConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the marketplace base URL (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the credentials (required).
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the per-request timeout.
    ///
    /// This bounds each individual HTTP exchange; a whole-call deadline
    /// spanning retries can be set per request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the total attempt count, keeping the default backoff.
    #[must_use]
    pub fn retry_count(mut self, max_attempts: u32) -> Self {
        let policy = self.retry_policy.unwrap_or_default();
        self.retry_policy = Some(RetryPolicy {
            max_attempts,
            ..policy
        });
        self
    }

    /// Sets the full retry policy.
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets the fallback `Retry-After` for 429 responses without the header.
    #[must_use]
    pub const fn rate_limit_retry_after(mut self, seconds: u64) -> Self {
        self.rate_limit_retry_after = Some(seconds);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Substitutes a custom transport.
    ///
    /// The supplied client is used as-is, including its own timeout and TLS
    /// settings.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`DokanConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` or
    /// `credentials` are not set.
    pub fn build(self) -> Result<DokanConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;
        let credentials = self.credentials.ok_or(ConfigError::MissingRequiredField {
            field: "credentials",
        })?;

        Ok(DokanConfig {
            base_url,
            credentials,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry_policy: self.retry_policy.unwrap_or_default(),
            rate_limit_retry_after: self
                .rate_limit_retry_after
                .unwrap_or(DEFAULT_RATE_LIMIT_RETRY_AFTER_SECS),
            user_agent_prefix: self.user_agent_prefix,
            http_client: self.http_client,
        })
    }
}
