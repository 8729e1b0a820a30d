//! `FlatImage` resource implementation.
//!
//! Images are uploaded by creating a `FlatImage` with a
//! [`FileUpload`](crate::rest::FileUpload) field, which sends the request as
//! `multipart/form-data`. Images also appear nested in [`Flat`] responses.
//!
//! [`Flat`]: crate::rest::resources::Flat

use std::ops::{Deref, DerefMut};

use crate::rest::{ApiObject, ApiResource, Creatable};

/// An image attached to a flat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatImage(ApiObject);

impl ApiResource for FlatImage {
    const NAME: &'static str = "FlatImage";

    fn class_url() -> String {
        "flat-image".to_string()
    }

    fn from_object(object: ApiObject) -> Self {
        Self(object)
    }

    fn as_object(&self) -> &ApiObject {
        &self.0
    }

    fn as_object_mut(&mut self) -> &mut ApiObject {
        &mut self.0
    }

    fn into_object(self) -> ApiObject {
        self.0
    }
}

impl Creatable for FlatImage {}

impl Deref for FlatImage {
    type Target = ApiObject;

    fn deref(&self) -> &ApiObject {
        &self.0
    }
}

impl DerefMut for FlatImage {
    fn deref_mut(&mut self) -> &mut ApiObject {
        &mut self.0
    }
}
