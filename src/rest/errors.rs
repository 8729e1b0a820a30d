//! Resource-level error types.
//!
//! [`ResourceError`] extends the transport's [`HttpError`] with the failures
//! a resource operation can raise locally:
//!
//! - [`ResourceError::MissingId`]: addressing an object with neither `id` nor
//!   `external_id`
//! - [`ResourceError::MissingAttribute`]: attribute-style read of an absent
//!   field
//! - [`ResourceError::UnexpectedResponse`]: a single-resource operation got
//!   JSON that is not a mapping
//!
//! # Example
//!
//! ```rust,ignore
//! use flatfox_api::rest::{ApiResource, Fields, ResourceError};
//! use flatfox_api::rest::resources::Flat;
//!
//! match Flat::retrieve(&config, None, Fields::with_id(42)).await {
//!     Ok(flat) => println!("Flat: {:?}", flat.get("street")),
//!     Err(ResourceError::Http(e)) if e.status_code() == Some(404) => println!("gone"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::clients::HttpError;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The object has neither `id` nor `external_id` set.
    ///
    /// Raised before any network access.
    #[error("Cannot get instance url of object {resource}: no id is set.")]
    MissingId {
        /// The kind of the resource (e.g., "Flat").
        resource: &'static str,
    },

    /// An attribute-style read named a field that is not present.
    #[error("{name}")]
    MissingAttribute {
        /// The missing attribute name.
        name: String,
    },

    /// A single-resource operation received JSON that is not a mapping.
    #[error("Unexpected response for {resource}::{operation}: expected an object")]
    UnexpectedResponse {
        /// The kind of the resource.
        resource: &'static str,
        /// The operation being performed (e.g., "refresh", "save").
        operation: &'static str,
    },

    /// A transport-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the HTTP status code, when the error came from a response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status_code(),
            _ => None,
        }
    }

    /// Returns the decoded JSON error body, when the response carried one.
    #[must_use]
    pub const fn json_body(&self) -> Option<&Value> {
        match self {
            Self::Http(e) => e.json_body(),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
