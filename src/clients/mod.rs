//! HTTP client types for Dokan API communication.
//!
//! This module provides the request pipeline every API call flows through:
//! request description, credential attachment, a single-exchange executor,
//! bounded retry with backoff, and error classification.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A description of one API call
//! - [`HttpResponse`]: A response envelope with pagination header access
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`RetryPolicy`]: Retry count and backoff shape
//! - [`Error`]: The closed error taxonomy for every failed call
//!
//! # Example
//!
//! ```rust,ignore
//! use dokan_api::{BaseUrl, Credentials, DokanConfig};
//! use dokan_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let config = DokanConfig::builder()
//!     .base_url(BaseUrl::new("https://shop.test")?)
//!     .credentials(Credentials::basic("user", "pass"))
//!     .build()?;
//! let client = HttpClient::new(config);
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/").build();
//! let response = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! [`HttpClient::request`] retries transient failures — network errors,
//! 429, and 5xx responses — up to the configured attempt count, waiting
//! `base_delay × attempts × multiplier` (capped) between attempts. Client
//! errors other than 429 and authentication failures are returned
//! immediately. [`HttpClient::execute`] performs a single exchange with no
//! retry at all.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod query;
pub mod retry;

pub use errors::{Error, DEFAULT_RATE_LIMIT_RETRY_AFTER_SECS};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, TOTAL_HEADER, TOTAL_PAGES_HEADER};
pub use retry::RetryPolicy;
