//! Authentication for the Dokan API.
//!
//! This module provides the [`Credentials`] type, which attaches an
//! `Authorization` header to outgoing requests. Two variants are supported:
//!
//! - [`Credentials::basic`]: HTTP Basic authentication with a WordPress
//!   username and application password
//! - [`Credentials::bearer`]: a bearer token, optionally with an expiry and
//!   a caller-supplied refresh function
//!
//! # Token Refresh
//!
//! Bearer tokens with an expiry are considered invalid once the current time
//! plus a 5-minute safety margin passes the expiry. When a refresh function
//! is configured, an invalid token is refreshed transparently before the
//! request is sent; the refresh is serialized behind a write lock so
//! concurrent requests never refresh redundantly. Replacing the stored token
//! is the only internal state mutation in the whole request pipeline.
//!
//! # Example
//!
//! ```rust
//! use dokan_api::Credentials;
//!
//! let credentials = Credentials::basic("shop-manager", "app-password");
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

/// Safety margin subtracted from a token's lifetime when checking validity.
///
/// A token expiring within this window is treated as already expired so a
/// request is never sent with a token that could lapse in flight.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 300;

/// Errors produced while attaching or refreshing credentials.
///
/// These errors fail the call before any network I/O occurs and are never
/// retried by the request pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Basic auth requires both a username and a password.
    #[error("username and password are required for basic auth")]
    MissingBasicCredentials,

    /// The bearer token string is empty.
    #[error("bearer token is required")]
    MissingToken,

    /// The token is expired and no refresh could make it valid.
    #[error("bearer token is expired and cannot be refreshed")]
    ExpiredToken,

    /// Refresh was requested but no refresh token is configured.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// Refresh was requested but no refresh function is configured.
    #[error("no refresh function provided")]
    MissingRefreshFunction,

    /// The configured refresh function failed.
    #[error("failed to refresh token: {0}")]
    RefreshFailed(String),

    /// The server rejected the credentials (401 or 403 response).
    #[error("{0}")]
    Denied(String),
}

/// Future returned by a [`TokenRefreshFn`].
pub type TokenRefreshFuture =
    Pin<Box<dyn Future<Output = Result<(String, Option<DateTime<Utc>>), AuthError>> + Send>>;

/// Caller-supplied token refresh function.
///
/// Receives the stored refresh token and returns the new access token with
/// its optional expiry. Typically this calls a token endpoint.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use dokan_api::auth::TokenRefreshFn;
/// use std::sync::Arc;
///
/// let refresh: TokenRefreshFn = Arc::new(|refresh_token: String| {
///     Box::pin(async move {
///         // Exchange `refresh_token` for a new access token here.
///         let _ = refresh_token;
///         Ok(("new-token".to_string(), Some(Utc::now() + Duration::hours(1))))
///     })
/// });
/// ```
pub type TokenRefreshFn = Arc<dyn Fn(String) -> TokenRefreshFuture + Send + Sync>;

/// The stored token and expiry of a bearer credential.
#[derive(Clone, Debug)]
struct BearerState {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl BearerState {
    /// A token is valid when it is non-empty and not inside the expiry margin.
    fn is_valid(&self) -> bool {
        if self.token.is_empty() {
            return false;
        }
        self.expires_at.map_or(true, |expires_at| {
            Utc::now() + Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) < expires_at
        })
    }
}

/// A bearer token credential with optional expiry and refresh capability.
///
/// Construct via [`Credentials::bearer`], [`Credentials::bearer_with_expiry`],
/// or [`Credentials::bearer_with_refresh`].
pub struct BearerCredentials {
    state: RwLock<BearerState>,
    refresh_token: Option<String>,
    refresh_fn: Option<TokenRefreshFn>,
}

impl BearerCredentials {
    fn new(
        token: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
        refresh_token: Option<String>,
        refresh_fn: Option<TokenRefreshFn>,
    ) -> Self {
        Self {
            state: RwLock::new(BearerState {
                token: token.into(),
                expires_at,
            }),
            refresh_token,
            refresh_fn,
        }
    }

    /// Returns a copy of the current token string.
    pub async fn token(&self) -> String {
        self.state.read().await.token.clone()
    }

    /// Returns the current expiry, if one is set.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.expires_at
    }

    async fn is_valid(&self) -> bool {
        self.state.read().await.is_valid()
    }

    /// Attaches `Authorization: Bearer <token>`, refreshing first if needed.
    async fn attach(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, AuthError> {
        {
            let state = self.state.read().await;
            if state.token.is_empty() {
                return Err(AuthError::MissingToken);
            }
            if state.is_valid() {
                return Ok(req.bearer_auth(&state.token));
            }
        }

        // Token is expired (or inside the margin); refresh if we can.
        if self.refresh_fn.is_some() {
            self.ensure_fresh().await?;
        }

        let state = self.state.read().await;
        if !state.is_valid() {
            return Err(AuthError::ExpiredToken);
        }
        Ok(req.bearer_auth(&state.token))
    }

    /// Refreshes the token only if it is still invalid once the write lock
    /// is held. Concurrent callers that lost the race to refresh observe the
    /// winner's token instead of refreshing again.
    async fn ensure_fresh(&self) -> Result<(), AuthError> {
        let refresh_fn = self
            .refresh_fn
            .as_ref()
            .ok_or(AuthError::MissingRefreshFunction)?;
        let refresh_token = self
            .refresh_token
            .clone()
            .ok_or(AuthError::MissingRefreshToken)?;

        let mut state = self.state.write().await;
        if state.is_valid() {
            return Ok(());
        }

        let (token, expires_at) = refresh_fn(refresh_token).await?;
        state.token = token;
        state.expires_at = expires_at;
        Ok(())
    }

    /// Unconditionally refreshes the stored token.
    async fn refresh(&self) -> Result<(), AuthError> {
        let refresh_fn = self
            .refresh_fn
            .as_ref()
            .ok_or(AuthError::MissingRefreshFunction)?;
        let refresh_token = self
            .refresh_token
            .clone()
            .ok_or(AuthError::MissingRefreshToken)?;

        let mut state = self.state.write().await;
        let (token, expires_at) = refresh_fn(refresh_token).await?;
        state.token = token;
        state.expires_at = expires_at;
        Ok(())
    }
}

impl fmt::Debug for BearerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerCredentials(*****)")
    }
}

/// Request credentials for the Dokan API.
///
/// A closed set of authentication variants; every outgoing request passes
/// through [`Credentials::attach`] before it is sent.
///
/// # Thread Safety
///
/// `Credentials` is `Send + Sync` and is shared by all concurrent calls on
/// a client. The bearer variant's token replacement is serialized internally.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use dokan_api::Credentials;
///
/// let basic = Credentials::basic("user", "pass");
/// let bearer = Credentials::bearer_with_expiry("token", Utc::now() + Duration::hours(1));
/// ```
pub enum Credentials {
    /// HTTP Basic authentication.
    Basic {
        /// The WordPress username.
        username: String,
        /// The application password.
        password: String,
    },
    /// Bearer token authentication.
    Bearer(BearerCredentials),
}

// Verify Credentials is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credentials>();
};

impl Credentials {
    /// Creates basic-auth credentials from a username and password.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a bearer credential with no expiry.
    ///
    /// A token without an expiry is always considered valid.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(BearerCredentials::new(token, None, None, None))
    }

    /// Creates a bearer credential with a known expiry.
    #[must_use]
    pub fn bearer_with_expiry(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self::Bearer(BearerCredentials::new(token, Some(expires_at), None, None))
    }

    /// Creates a bearer credential that refreshes itself.
    ///
    /// When the stored token expires, `refresh_fn` is invoked with
    /// `refresh_token` and the returned token/expiry pair replaces the
    /// stored one before the request goes out.
    #[must_use]
    pub fn bearer_with_refresh(
        token: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
        refresh_token: impl Into<String>,
        refresh_fn: TokenRefreshFn,
    ) -> Self {
        Self::Bearer(BearerCredentials::new(
            token,
            expires_at,
            Some(refresh_token.into()),
            Some(refresh_fn),
        ))
    }

    /// Attaches the credentials to an outgoing request.
    ///
    /// For bearer credentials this may trigger a token refresh first.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the credentials are missing, expired and
    /// unrefreshable, or the refresh itself fails. The request is never sent
    /// in any of these cases.
    pub async fn attach(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, AuthError> {
        match self {
            Self::Basic { username, password } => {
                if username.is_empty() || password.is_empty() {
                    return Err(AuthError::MissingBasicCredentials);
                }
                Ok(req.basic_auth(username, Some(password)))
            }
            Self::Bearer(bearer) => bearer.attach(req).await,
        }
    }

    /// Returns `true` when the credentials can be attached without a refresh.
    ///
    /// Basic credentials are valid when both parts are non-empty. Bearer
    /// tokens are valid when non-empty and outside the 5-minute expiry
    /// margin (or have no expiry at all).
    pub async fn is_valid(&self) -> bool {
        match self {
            Self::Basic { username, password } => !username.is_empty() && !password.is_empty(),
            Self::Bearer(bearer) => bearer.is_valid().await,
        }
    }

    /// Refreshes the stored token using the configured refresh function.
    ///
    /// A no-op success for basic credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingRefreshFunction`] or
    /// [`AuthError::MissingRefreshToken`] when refresh is not configured,
    /// and propagates the refresh function's failure otherwise.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        match self {
            Self::Basic { .. } => Ok(()),
            Self::Bearer(bearer) => bearer.refresh().await,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"*****")
                .finish(),
            Self::Bearer(_) => f.write_str("Bearer(*****)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refresh_to(token: &'static str, expires_at: Option<DateTime<Utc>>) -> TokenRefreshFn {
        Arc::new(move |_refresh_token| {
            Box::pin(async move { Ok((token.to_string(), expires_at)) })
        })
    }

    fn failing_refresh() -> TokenRefreshFn {
        Arc::new(|_refresh_token| {
            Box::pin(async { Err(AuthError::RefreshFailed("boom".to_string())) })
        })
    }

    #[tokio::test]
    async fn test_basic_is_valid_requires_both_parts() {
        assert!(Credentials::basic("user", "pass").is_valid().await);
        assert!(!Credentials::basic("", "pass").is_valid().await);
        assert!(!Credentials::basic("user", "").is_valid().await);
    }

    #[tokio::test]
    async fn test_basic_refresh_is_noop() {
        let credentials = Credentials::basic("user", "pass");
        assert!(credentials.refresh().await.is_ok());
    }

    #[tokio::test]
    async fn test_bearer_without_expiry_is_valid() {
        let credentials = Credentials::bearer("token");
        assert!(credentials.is_valid().await);
    }

    #[tokio::test]
    async fn test_bearer_empty_token_is_invalid() {
        let credentials = Credentials::bearer("");
        assert!(!credentials.is_valid().await);
    }

    #[tokio::test]
    async fn test_bearer_validity_respects_expiry_margin() {
        // Expiring in 4 minutes: inside the 5-minute margin, so invalid.
        let soon = Credentials::bearer_with_expiry("token", Utc::now() + Duration::minutes(4));
        assert!(!soon.is_valid().await);

        // Expiring in 6 minutes: outside the margin, so valid.
        let later = Credentials::bearer_with_expiry("token", Utc::now() + Duration::minutes(6));
        assert!(later.is_valid().await);
    }

    #[tokio::test]
    async fn test_refresh_replaces_token_in_place() {
        let expires = Utc::now() + Duration::hours(1);
        let credentials = Credentials::bearer_with_refresh(
            "old-token",
            Some(Utc::now() - Duration::minutes(1)),
            "refresh-token",
            refresh_to("new-token", Some(expires)),
        );

        assert!(!credentials.is_valid().await);
        credentials.refresh().await.unwrap();
        assert!(credentials.is_valid().await);

        let Credentials::Bearer(bearer) = &credentials else {
            panic!("expected bearer credentials");
        };
        assert_eq!(bearer.token().await, "new-token");
        assert_eq!(bearer.expires_at().await, Some(expires));
    }

    #[tokio::test]
    async fn test_refresh_without_function_fails() {
        let credentials = Credentials::bearer("token");
        assert_eq!(
            credentials.refresh().await,
            Err(AuthError::MissingRefreshFunction)
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_propagates() {
        let credentials = Credentials::bearer_with_refresh(
            "token",
            Some(Utc::now() - Duration::minutes(1)),
            "refresh-token",
            failing_refresh(),
        );
        assert_eq!(
            credentials.refresh().await,
            Err(AuthError::RefreshFailed("boom".to_string()))
        );
    }

    #[tokio::test]
    async fn test_attach_fails_for_empty_basic_credentials() {
        let client = reqwest::Client::new();
        let req = client.get("https://shop.test/wp-json/dokan/v1/products");

        let credentials = Credentials::basic("", "");
        assert!(matches!(
            credentials.attach(req).await,
            Err(AuthError::MissingBasicCredentials)
        ));
    }

    #[tokio::test]
    async fn test_attach_fails_for_empty_bearer_token() {
        let client = reqwest::Client::new();
        let req = client.get("https://shop.test/wp-json/dokan/v1/products");

        let credentials = Credentials::bearer("");
        assert!(matches!(
            credentials.attach(req).await,
            Err(AuthError::MissingToken)
        ));
    }

    #[tokio::test]
    async fn test_attach_refreshes_expired_token() {
        let credentials = Credentials::bearer_with_refresh(
            "stale-token",
            Some(Utc::now() - Duration::minutes(1)),
            "refresh-token",
            refresh_to("fresh-token", None),
        );

        let client = reqwest::Client::new();
        let req = client.get("https://shop.test/wp-json/dokan/v1/products");
        let req = credentials.attach(req).await.unwrap();

        let built = req.build().unwrap();
        let authorization = built
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(authorization, "Bearer fresh-token");
    }

    #[tokio::test]
    async fn test_attach_fails_when_expired_and_unrefreshable() {
        let credentials =
            Credentials::bearer_with_expiry("token", Utc::now() - Duration::minutes(1));

        let client = reqwest::Client::new();
        let req = client.get("https://shop.test/wp-json/dokan/v1/products");
        assert!(matches!(
            credentials.attach(req).await,
            Err(AuthError::ExpiredToken)
        ));
    }

    #[tokio::test]
    async fn test_concurrent_attach_refreshes_once() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let calls = Arc::new(AtomicU32::new(0));
        let calls_in_fn = Arc::clone(&calls);
        let refresh_fn: TokenRefreshFn = Arc::new(move |_refresh_token| {
            let calls = Arc::clone(&calls_in_fn);
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok((
                    "fresh-token".to_string(),
                    Some(Utc::now() + Duration::hours(1)),
                ))
            })
        });

        let credentials = Arc::new(Credentials::bearer_with_refresh(
            "stale-token",
            Some(Utc::now() - Duration::minutes(1)),
            "refresh-token",
            refresh_fn,
        ));

        let client = reqwest::Client::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let credentials = Arc::clone(&credentials);
            let req = client.get("https://shop.test/wp-json/dokan/v1/orders");
            handles.push(tokio::spawn(
                async move { credentials.attach(req).await },
            ));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_basic_debug_masks_password() {
        let credentials = Credentials::basic("user", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_credentials_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Credentials>();
    }
}
