//! Error types for the Flatfox API client configuration.
//!
//! This module contains the errors raised while building configuration
//! values. Transport errors live in [`crate::clients`] and resource errors in
//! [`crate::rest`].
//!
//! # Example
//!
//! ```rust
//! use flatfox_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Flatfox API token.")]
    EmptyAccessToken,

    /// Server URL is invalid.
    #[error("Invalid server URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://flatfox.ch').")]
    InvalidServerUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
