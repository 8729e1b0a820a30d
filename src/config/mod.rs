//! Configuration types for the Flatfox API client.
//!
//! The main types in this module are:
//!
//! - [`FlatfoxConfig`]: the per-process configuration handed to every operation
//! - [`FlatfoxConfigBuilder`]: a builder for [`FlatfoxConfig`]
//! - [`AccessToken`]: a validated API credential with masked debug output
//! - [`ServerUrl`]: a validated base server URL
//!
//! # Example
//!
//! ```rust
//! use flatfox_api::{AccessToken, FlatfoxConfig, ServerUrl};
//!
//! let config = FlatfoxConfig::builder()
//!     .server(ServerUrl::new("https://flatfox.ch").unwrap())
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .build();
//!
//! assert_eq!(config.api_base(), "https://flatfox.ch/api/v1/");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ServerUrl};

/// Path appended to the server URL for every API call.
pub const API_BASE_PATH: &str = "/api/v1/";

/// Configuration for the Flatfox API client.
///
/// Holds the base server URL and an optional default credential. Every
/// operation receives the configuration explicitly; a credential given per
/// call or stored on a resource takes precedence over the default.
///
/// `FlatfoxConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, Default)]
pub struct FlatfoxConfig {
    server: ServerUrl,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
}

impl FlatfoxConfig {
    /// Creates a new builder for constructing a `FlatfoxConfig`.
    #[must_use]
    pub fn builder() -> FlatfoxConfigBuilder {
        FlatfoxConfigBuilder::new()
    }

    /// Returns the base server URL.
    #[must_use]
    pub const fn server(&self) -> &ServerUrl {
        &self.server
    }

    /// Returns the default credential, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the absolute API base, e.g. `https://flatfox.ch/api/v1/`.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}{API_BASE_PATH}", self.server)
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FlatfoxConfig>();
};

/// Builder for constructing [`FlatfoxConfig`] instances.
///
/// # Defaults
///
/// - `server`: `https://flatfox.ch`
/// - `access_token`: `None` (requests are sent unauthenticated)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct FlatfoxConfigBuilder {
    server: Option<ServerUrl>,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
}

impl FlatfoxConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base server URL, e.g. a staging environment.
    #[must_use]
    pub fn server(mut self, server: ServerUrl) -> Self {
        self.server = Some(server);
        self
    }

    /// Sets the default credential used when no per-call credential is given.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`FlatfoxConfig`].
    #[must_use]
    pub fn build(self) -> FlatfoxConfig {
        FlatfoxConfig {
            server: self.server.unwrap_or_default(),
            access_token: self.access_token,
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}
