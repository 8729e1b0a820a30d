//! `Flat` resource implementation.
//!
//! Flats are the listings of the authenticated account, served under
//! `my-flat/`. A flat response embeds its images, which are decoded into
//! [`FlatImage`] resources and kept in the `images` field.
//!
//! # Example
//!
//! ```rust,ignore
//! use flatfox_api::rest::{ApiResource, Fields, Updatable};
//! use flatfox_api::rest::resources::Flat;
//!
//! let mut flat = Flat::retrieve(&config, None, Fields::with_external_id("ref-17")).await?;
//! for image in flat.images() {
//!     println!("image {:?}", image.get("url"));
//! }
//!
//! flat.insert("rent_net", 2150);
//! flat.save(&config).await?;
//! ```

use std::ops::{Deref, DerefMut};

use serde_json::{Map, Value};

use crate::config::AccessToken;
use crate::rest::resources::FlatImage;
use crate::rest::{
    deserialize_object, ApiObject, ApiResource, Creatable, FieldValue, Fields, Listable,
    Updatable,
};

const IMAGES: &str = "images";

/// A flat listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Flat(ApiObject);

impl Flat {
    /// Returns the images attached to this flat.
    ///
    /// Images decoded from a response are returned as-is; raw image mappings
    /// (e.g., from a `create` response) are decoded with this flat's
    /// credential. Anything that is not an image mapping is skipped.
    #[must_use]
    pub fn images(&self) -> Vec<FlatImage> {
        let access_token = self.0.access_token();
        match self.0.get(IMAGES) {
            Some(FieldValue::List(items)) => items
                .iter()
                .filter_map(|item| match item {
                    FieldValue::Object(object) => Some(FlatImage::from_object(object.clone())),
                    FieldValue::Json(value) => image_from_json(value, access_token),
                    _ => None,
                })
                .collect(),
            Some(FieldValue::Json(Value::Array(items))) => items
                .iter()
                .filter_map(|value| image_from_json(value, access_token))
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn image_from_json(value: &Value, access_token: Option<&AccessToken>) -> Option<FlatImage> {
    match value {
        Value::Object(map) => Some(FlatImage::init_from_response(
            map.clone(),
            access_token.cloned(),
        )),
        _ => None,
    }
}

impl ApiResource for Flat {
    const NAME: &'static str = "Flat";

    fn class_url() -> String {
        "my-flat".to_string()
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

    /// Decodes the embedded `images` (default: none) as [`FlatImage`]s and
    /// attaches them after the remaining fields.
    fn init_from_response(map: Map<String, Value>, access_token: Option<AccessToken>) -> Self {
        let mut fields = Fields::from_json_map(map);
        let images = match fields.remove(IMAGES) {
            Some(FieldValue::Json(value)) => value,
            _ => Value::Array(Vec::new()),
        };
        let images = deserialize_object::<FlatImage>(images, access_token.as_ref());

        let mut object = ApiObject::from_fields(fields, access_token);
        object.insert(IMAGES, images);
        Self(object)
    }
}

impl Listable for Flat {}
impl Creatable for Flat {}
impl Updatable for Flat {}

impl Deref for Flat {
    type Target = ApiObject;

    fn deref(&self) -> &ApiObject {
        &self.0
    }
}

impl DerefMut for Flat {
    fn deref_mut(&mut self) -> &mut ApiObject {
        &mut self.0
    }
}
