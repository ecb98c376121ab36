//! HTTP client for Dokan API communication.
//!
//! This module provides the [`HttpClient`] type, the executor every API
//! call flows through. A single [`execute`](HttpClient::execute) performs
//! exactly one HTTP exchange — URL construction, query and body encoding,
//! credential attachment, dispatch, and error classification — while
//! [`request`](HttpClient::request) wraps it in the retry controller.

use std::collections::HashMap;

use crate::clients::errors::{classify_response, Error};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::retry::{self, RetryPolicy};
use crate::config::DokanConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making authenticated requests to the Dokan API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent and `Accept: application/json`
/// - Credential attachment (with transparent bearer-token refresh)
/// - Retry with backoff for transient failures
/// - Classification of failed responses into typed [`Error`] values
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and holds no per-call state, so any number
/// of calls may run concurrently against the same instance.
///
/// # Example
///
/// ```rust,ignore
/// use dokan_api::{BaseUrl, Credentials, DokanConfig};
/// use dokan_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = DokanConfig::builder()
///     .base_url(BaseUrl::new("https://shop.test")?)
///     .credentials(Credentials::basic("user", "pass"))
///     .build()?;
///
/// let client = HttpClient::new(config);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/42").build();
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Everything fixed at construction: base URL, credentials, retry policy.
    config: DokanConfig,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// When the configuration carries a custom transport it is used as-is
    /// (including its timeout settings); otherwise a rustls-backed client
    /// with the configured per-request timeout is built.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(mut config: DokanConfig) -> Self {
        let client = config.take_http_client().unwrap_or_else(|| {
            reqwest::Client::builder()
                .use_rustls_tls()
                .timeout(config.timeout())
                .build()
                .expect("Failed to create HTTP client")
        });

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Dokan API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            client,
            config,
            default_headers,
        }
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url().as_ref()
    }

    /// Returns the retry policy applied by [`request`](Self::request).
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        self.config.retry_policy()
    }

    /// Returns the default headers attached to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request through the full retry pipeline.
    ///
    /// The request's deadline (when set) bounds all attempts and backoff
    /// waits; transient failures are retried per the configured policy.
    ///
    /// # Errors
    ///
    /// Returns the classified [`Error`] of the last attempt, or
    /// [`Error::DeadlineExceeded`] when the deadline fires first.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        retry::run(self.config.retry_policy(), request.deadline, || {
            self.execute(&request)
        })
        .await
    }

    /// Performs exactly one HTTP exchange for the given request.
    ///
    /// This is the retry-free executor: a transport failure is wrapped as
    /// [`Error::Network`] and returned, never retried here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when credential attachment fails (before any
    /// network I/O), [`Error::Network`] on transport failure, and the
    /// classified error for any response with status >= 400.
    pub async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let url = self.config.base_url().join(&request.path);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }

        if let Some(query) = &request.query {
            builder = builder.query(query);
        }

        // Serializing the body also sets Content-Type: application/json.
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        // Caller headers go last so they may override the defaults.
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                builder = builder.header(key, value);
            }
        }

        let builder = self.config.credentials().attach(builder).await?;

        tracing::debug!(method = %request.method, path = %request.path, "dispatching request");

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers = Self::parse_response_headers(response.headers());
        let body = response.bytes().await?.to_vec();

        let envelope = HttpResponse::new(status, headers, body);

        if let Some(error) = classify_response(
            envelope.status,
            &envelope.body,
            envelope.retry_after(),
            self.config.rate_limit_retry_after(),
        ) {
            if let Error::RateLimited { retry_after } = &error {
                tracing::warn!(retry_after, path = %request.path, "rate limited by the API");
            }
            return Err(error);
        }

        Ok(envelope)
    }

    /// Parses response headers into a lower-cased multi-value map.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
