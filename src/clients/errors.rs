//! HTTP-level error types for the Flatfox API client.
//!
//! The client maps HTTP failures onto a small taxonomy:
//!
//! - [`InvalidResponseError`]: the response body is not valid JSON
//! - [`HttpError::InvalidRequest`]: HTTP 400 (validation) or 404 (not found)
//! - [`HttpError::Permission`]: HTTP 403
//! - [`HttpError::Response`]: any other non-2xx status
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//! - [`HttpError::Network`]: connection or TLS failure
//!
//! Every status-bearing error carries the decoded JSON error body and the
//! status code for caller inspection.
//!
//! # Example
//!
//! ```rust,ignore
//! use flatfox_api::clients::HttpError;
//!
//! match client.request(HttpMethod::Get, "my-flat/42", None).await {
//!     Ok(json) => println!("Flat: {json}"),
//!     Err(HttpError::InvalidRequest(e)) if e.code == 404 => println!("gone: {}", e.message),
//!     Err(HttpError::Permission(e)) => println!("forbidden: {}", e.message),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// An error response from the API: a non-2xx status with a JSON body.
///
/// # Example
///
/// ```rust
/// use flatfox_api::clients::HttpResponseError;
/// use serde_json::json;
///
/// let error = HttpResponseError {
///     code: 400,
///     message: r#"{"field":["required"]}"#.to_string(),
///     json_body: json!({"field": ["required"]}),
/// };
///
/// assert_eq!(error.to_string(), r#"{"field":["required"]} (400)"#);
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message} ({code})")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human readable message extracted from the body.
    pub message: String,
    /// The decoded JSON error body.
    pub json_body: Value,
}

/// Error returned when a response body cannot be parsed as JSON.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid response: {body} (HTTP response code was {code})")]
pub struct InvalidResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub body: String,
}

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// Form fields or a JSON body were provided without a body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// File parts were attached to a request that is not multipart.
    #[error("File parts require a multipart body.")]
    FilesRequireMultipart,

    /// A file payload is nested inside a list or resource field.
    #[error("Field '{field}' contains a nested file; files must be top-level fields.")]
    NestedFile {
        /// The top-level field holding the file.
        field: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The response body was not valid JSON.
    #[error(transparent)]
    InvalidResponse(#[from] InvalidResponseError),

    /// The request was rejected as invalid (HTTP 400) or not found (HTTP 404).
    #[error("Invalid request: {0}")]
    InvalidRequest(HttpResponseError),

    /// The credential is not allowed to perform the request (HTTP 403).
    #[error("Permission denied: {0}")]
    Permission(HttpResponseError),

    /// Any other non-2xx response.
    #[error("API error: {0}")]
    Response(HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidHttpRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Classifies a non-2xx response with a parsed JSON body.
    ///
    /// - 400 -> `InvalidRequest`, message is the body rendered as JSON
    /// - 404 -> `InvalidRequest`, message is the body's `detail` when present
    /// - 403 -> `Permission`, message is the body's `detail` when present
    /// - other -> `Response`, message is the body rendered as JSON
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatfox_api::clients::HttpError;
    /// use serde_json::json;
    ///
    /// let error = HttpError::from_status(404, json!({"detail": "not found"}));
    /// assert!(matches!(&error, HttpError::InvalidRequest(e) if e.message == "not found"));
    /// ```
    #[must_use]
    pub fn from_status(code: u16, json_body: Value) -> Self {
        let message = match code {
            403 | 404 => detail_or_body(&json_body),
            _ => json_body.to_string(),
        };
        let error = HttpResponseError {
            code,
            message,
            json_body,
        };

        match code {
            400 | 404 => Self::InvalidRequest(error),
            403 => Self::Permission(error),
            _ => Self::Response(error),
        }
    }

    /// Returns the HTTP status code, when the error came from a response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::InvalidResponse(e) => Some(e.code),
            Self::InvalidRequest(e) | Self::Permission(e) | Self::Response(e) => Some(e.code),
            Self::InvalidHttpRequest(_) | Self::Network(_) => None,
        }
    }

    /// Returns the decoded JSON error body, when the response carried one.
    #[must_use]
    pub const fn json_body(&self) -> Option<&Value> {
        match self {
            Self::InvalidRequest(e) | Self::Permission(e) | Self::Response(e) => Some(&e.json_body),
            _ => None,
        }
    }
}

fn detail_or_body(json_body: &Value) -> String {
    match json_body.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(detail) => detail.to_string(),
        None => json_body.to_string(),
    }
}
