//! Error types for SDK configuration.
//!
//! This module contains the error type returned by configuration
//! constructors and the client builder.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use dokan_api::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not-a-url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the SDK.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration values. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is missing a scheme or host.
    #[error("Invalid base URL '{url}'. Please provide a full URL with scheme (e.g., 'https://marketplace.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the client.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
