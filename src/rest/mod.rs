//! REST resource layer for the Flatfox API.
//!
//! This module turns the transport in [`clients`](crate::clients) into an
//! object model:
//!
//! - **[`ApiObject`]** and **[`Fields`]**: a dynamic, ordered field mapping
//!   with index-style and attribute-style access
//! - **[`FieldValue`]**: the values a field can hold, including nested
//!   resources, dates and file payloads
//! - **[`serialize_object`]** / **[`deserialize_object`]**: conversion
//!   between fields and wire values
//! - **[`ApiResource`]**, **[`Listable`]**, **[`Creatable`]**,
//!   **[`Updatable`]**: the operations a resource kind supports
//! - **[`ResourceError`]**: resource-level errors
//! - **[`resources`]**: the concrete kinds, [`Flat`](resources::Flat) and
//!   [`FlatImage`](resources::FlatImage)
//!
//! # Example
//!
//! ```rust,ignore
//! use flatfox_api::{AccessToken, FlatfoxConfig};
//! use flatfox_api::rest::{ApiResource, Fields, Listable, Updatable};
//! use flatfox_api::rest::resources::Flat;
//!
//! let config = FlatfoxConfig::builder()
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .build();
//!
//! // List the account's flats
//! let flats = Flat::list(&config, None, Fields::new()).await?.into_resources();
//!
//! // Fetch one by its external reference and update it
//! let mut flat = Flat::retrieve(&config, None, Fields::with_external_id("ref-17")).await?;
//! flat.set_attr("description", "Freshly renovated");
//! flat.save(&config).await?;
//!
//! // Check existence without failing
//! if !Flat::exists(&config, Fields::with_id(999)).await {
//!     println!("gone");
//! }
//! ```

mod errors;
pub(crate) mod object;
mod resource;
mod serialize;
mod value;

pub mod resources;

// Public exports
pub use errors::ResourceError;
pub use object::{ApiObject, Fields};
pub use resource::{format_id, ApiResource, Creatable, Listable, Updatable};
pub use serialize::{
    deserialize_object, fields_to_query, serialize_object, Decoded, SerializedParams,
};
pub use value::{FieldValue, FileUpload};
