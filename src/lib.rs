//! # Flatfox API Rust Client
//!
//! A Rust client for the Flatfox REST API, providing type-safe configuration,
//! an async HTTP transport, and a small object model over the API's
//! resources.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`FlatfoxConfig`] and [`FlatfoxConfigBuilder`]
//! - Validated newtypes for the access token and server URL
//! - An async HTTP transport with HTTP Basic authentication and JSON or
//!   multipart encoding, chosen per request
//! - Dynamic resource objects with ordered fields and attribute-style access
//! - Typed resource kinds ([`Flat`](rest::resources::Flat),
//!   [`FlatImage`](rest::resources::FlatImage)) with list, create, save,
//!   retrieve and existence checks
//!
//! ## Quick Start
//!
//! ```rust
//! use flatfox_api::{AccessToken, FlatfoxConfig, ServerUrl};
//!
//! let config = FlatfoxConfig::builder()
//!     .server(ServerUrl::new("https://flatfox.ch").unwrap())
//!     .access_token(AccessToken::new("your-api-token").unwrap())
//!     .build();
//!
//! assert_eq!(config.api_base(), "https://flatfox.ch/api/v1/");
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use flatfox_api::rest::{ApiResource, Creatable, Fields, FileUpload, Updatable};
//! use flatfox_api::rest::resources::{Flat, FlatImage};
//!
//! // Fetch a flat by id, or by your own reference
//! let mut flat = Flat::retrieve(&config, None, Fields::with_id(42)).await?;
//! let other = Flat::retrieve(&config, None, Fields::with_external_id("ref-17")).await?;
//!
//! // Change and save it
//! flat.insert("rent_gross", 2450);
//! flat.save(&config).await?;
//!
//! // Upload an image (sent as multipart/form-data)
//! let image = FlatImage::create(
//!     &config,
//!     None,
//!     Fields::new()
//!         .with("flat", 42)
//!         .with("image", FileUpload::from_path("kitchen.jpg").await?),
//! )
//! .await?;
//! ```
//!
//! ## Making Raw API Requests
//!
//! ```rust,ignore
//! use flatfox_api::clients::{HttpClient, HttpMethod};
//!
//! let client = HttpClient::new(&config, None)?;
//! let json = client.request(HttpMethod::Get, "my-flat", None).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **One round trip per operation**: No retries, no background work
//!
//! ## Logging
//!
//! Every request is logged at `info` level through [`tracing`]; install a
//! subscriber in your application to see them.

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, FlatfoxConfig, FlatfoxConfigBuilder, ServerUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, InvalidResponseError,
};

// Re-export resource types
pub use rest::{ApiObject, ApiResource, FieldValue, Fields, ResourceError};
