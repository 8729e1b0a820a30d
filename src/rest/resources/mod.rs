//! Concrete Flatfox resource kinds.
//!
//! Each kind is a typed wrapper around an [`ApiObject`](crate::rest::ApiObject)
//! that picks its capabilities by implementing the traits from
//! [`rest`](crate::rest):
//!
//! | Kind          | URL segment  | Capabilities                      |
//! |---------------|--------------|-----------------------------------|
//! | [`Flat`]      | `my-flat`    | list, create, save, retrieve      |
//! | [`FlatImage`] | `flat-image` | create (multipart upload)         |
//!
//! # Example
//!
//! ```rust,ignore
//! use flatfox_api::rest::{ApiResource, Creatable, Fields, FileUpload, Listable};
//! use flatfox_api::rest::resources::{Flat, FlatImage};
//!
//! let flats = Flat::list(&config, None, Fields::new()).await?.into_resources();
//!
//! let image = FlatImage::create(
//!     &config,
//!     None,
//!     Fields::new()
//!         .with("flat", 42)
//!         .with("image", FileUpload::from_path("living-room.jpg").await?),
//! )
//! .await?;
//! ```

mod flat;
mod flat_image;

pub use flat::Flat;
pub use flat_image::FlatImage;
