//! # Dokan API Rust SDK
//!
//! A Rust SDK for the Dokan Multivendor Marketplace REST API, providing
//! type-safe configuration, pluggable authentication, and an async HTTP
//! pipeline with retry and typed error classification.
//!
//! Dokan is a WordPress plugin that turns a WooCommerce site into a
//! multivendor marketplace. This SDK wraps its REST endpoints for
//! products, orders, and stores under `/wp-json/dokan/v1/`.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`DokanConfig`] and [`DokanConfigBuilder`]
//! - Basic-auth and refreshable bearer-token credentials via [`Credentials`]
//! - An async request pipeline with bounded, backoff-based retry
//! - A closed [`Error`] taxonomy callers can pattern-match on
//! - Typed resource services for products, orders, and stores
//! - Pagination read from the `X-WP-Total` / `X-WP-TotalPages` headers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dokan_api::{BaseUrl, Credentials, DokanClient};
//! use dokan_api::resources::{Product, ProductStatus, ProductType};
//!
//! let client = DokanClient::new(
//!     DokanClient::builder()
//!         .base_url(BaseUrl::new("https://marketplace.example.com")?)
//!         .credentials(Credentials::basic("shop-manager", "app-password"))
//!         .build()?,
//! );
//!
//! // Create a product
//! let product = Product {
//!     name: "Example Product".to_string(),
//!     product_type: ProductType::Simple,
//!     regular_price: "29.99".to_string(),
//!     status: ProductStatus::Publish,
//!     ..Product::default()
//! };
//!
//! let created = client.products().create(&product).await?;
//! println!("Created product with ID: {}", created.id.unwrap());
//! ```
//!
//! ## Listing with Pagination
//!
//! ```rust,ignore
//! use dokan_api::resources::{ListParams, ProductListParams, ProductStatus};
//!
//! let params = ProductListParams {
//!     list: ListParams { page: Some(1), per_page: Some(25), ..ListParams::default() },
//!     status: vec![ProductStatus::Publish],
//!     ..ProductListParams::default()
//! };
//!
//! let page = client.products().list(Some(&params)).await?;
//! println!("{} products across {} pages", page.total_items, page.total_pages);
//! ```
//!
//! ## Bearer Tokens with Refresh
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chrono::{Duration, Utc};
//! use dokan_api::auth::TokenRefreshFn;
//! use dokan_api::Credentials;
//!
//! let refresh: TokenRefreshFn = Arc::new(|refresh_token| {
//!     Box::pin(async move {
//!         // Exchange the refresh token at your token endpoint.
//!         let (token, expires_at) = my_token_endpoint(&refresh_token).await?;
//!         Ok((token, Some(expires_at)))
//!     })
//! });
//!
//! let credentials = Credentials::bearer_with_refresh(
//!     "initial-token",
//!     Some(Utc::now() + Duration::hours(1)),
//!     "refresh-token",
//!     refresh,
//! );
//! ```
//!
//! Tokens inside a 5-minute expiry margin are refreshed transparently
//! before the request is sent; concurrent calls never refresh twice.
//!
//! ## Error Handling
//!
//! Every failure is a variant of the closed [`Error`] type:
//!
//! ```rust,ignore
//! use dokan_api::Error;
//!
//! match client.products().get(42).await {
//!     Ok(product) => println!("{}", product.name),
//!     Err(Error::NotFound { .. }) => println!("gone"),
//!     Err(Error::RateLimited { retry_after }) => println!("wait {retry_after}s"),
//!     Err(other) => return Err(other.into()),
//! }
//! ```
//!
//! Transient failures (network errors, 429, 5xx) are retried automatically
//! with `base_delay × attempts × multiplier` backoff, capped at
//! `max_delay`; other client errors surface immediately.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Config newtypes validate on construction
//! - **Thread-safe**: The client and its services are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **Nothing swallowed**: The pipeline returns every failure as a typed
//!   error value and leaves logging policy to the caller

pub mod auth;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, Credentials};
pub use client::DokanClient;
pub use config::{BaseUrl, DokanConfig, DokanConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP pipeline types
pub use clients::{
    Error, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse, RetryPolicy,
};

// Re-export the resource page type
pub use resources::ListPage;
