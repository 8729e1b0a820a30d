//! HTTP client types for Flatfox API communication.
//!
//! This module is the transport layer: it builds one authenticated request,
//! sends it, and interprets the response. It knows nothing about resource
//! semantics.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async transport requestor
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a raw response and its interpretation
//! - [`HttpMethod`]: the HTTP verbs used by the API (GET, POST, PUT)
//! - [`DataType`]: JSON or multipart request bodies
//! - [`HttpError`]: the error taxonomy for failed calls
//!
//! # Example
//!
//! ```rust,ignore
//! use flatfox_api::{AccessToken, FlatfoxConfig};
//! use flatfox_api::clients::{HttpClient, HttpMethod};
//!
//! let config = FlatfoxConfig::builder()
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .build();
//!
//! let client = HttpClient::new(&config, None)?;
//! let flat = client.request(HttpMethod::Get, "my-flat/42", None).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError, InvalidResponseError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
