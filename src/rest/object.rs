//! The dynamic resource object.
//!
//! [`Fields`] is the ordered field mapping of a resource. [`ApiObject`] wraps
//! it with the credential the resource was fetched with and a bag of internal
//! attributes, and offers two access surfaces over the same mapping:
//!
//! - index-style: [`Fields::get`], [`Fields::insert`], `object["name"]`
//! - attribute-style: [`ApiObject::attr`] and [`ApiObject::set_attr`], where
//!   an absent name is a [`ResourceError::MissingAttribute`]
//!
//! # Example
//!
//! ```rust
//! use flatfox_api::rest::{ApiObject, Fields, ResourceError};
//!
//! let mut flat = ApiObject::from_fields(Fields::new().with("id", 42).with("rooms", 3.5), None);
//!
//! assert_eq!(flat["id"].as_i64(), Some(42));
//! assert_eq!(flat.attr("rooms").unwrap().as_json().unwrap(), 3.5);
//!
//! flat.set_attr("street", "Bahnhofstrasse 1");
//! assert_eq!(flat.get("street").and_then(|v| v.as_str()), Some("Bahnhofstrasse 1"));
//!
//! assert!(matches!(flat.attr("city"), Err(ResourceError::MissingAttribute { name }) if name == "city"));
//! ```

use std::borrow::Cow;
use std::ops::{Deref, DerefMut, Index};

use serde_json::{Map, Value};

use crate::clients::{HttpClient, HttpError, HttpMethod};
use crate::config::{AccessToken, FlatfoxConfig};
use crate::rest::{FieldValue, ResourceError};

/// Prefix marking internal attributes that never become fields on the wire.
pub const INTERNAL_PREFIX: char = '_';

/// The declared non-field attribute holding the credential.
const ACCESS_TOKEN_ATTR: &str = "access_token";

/// An ordered mapping from field name to [`FieldValue`].
///
/// Insertion order is preserved; inserting an existing name replaces its
/// value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields(Vec<(String, FieldValue)>);

impl Fields {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a mapping holding only an `id`.
    #[must_use]
    pub fn with_id(id: impl Into<FieldValue>) -> Self {
        Self::new().with("id", id)
    }

    /// Creates a mapping holding only an `external_id`.
    #[must_use]
    pub fn with_external_id(external_id: impl Into<FieldValue>) -> Self {
        Self::new().with("external_id", external_id)
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Converts a JSON object into fields, keeping its order.
    #[must_use]
    pub fn from_json_map(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .map(|(key, value)| (key, FieldValue::Json(value)))
                .collect(),
        )
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if a value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Removes the value under `key`, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    /// Removes every field.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serializes every field to its JSON primitive, including `id`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_primitive()))
                .collect(),
        )
    }
}

impl Index<&str> for Fields {
    type Output = FieldValue;

    /// # Panics
    ///
    /// Panics if no field is stored under `key`; use [`Fields::get`] or
    /// [`ApiObject::attr`] for a fallible lookup.
    fn index(&self, key: &str) -> &FieldValue {
        self.get(key)
            .unwrap_or_else(|| panic!("no field named '{key}'"))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, FieldValue);
    type IntoIter = std::vec::IntoIter<(String, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A resource as a dynamic object: ordered fields plus out-of-band state.
///
/// The credential is not a field: it never appears in the field mapping and
/// is never encoded into a request body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiObject {
    fields: Fields,
    access_token: Option<AccessToken>,
    internal: Fields,
}

impl ApiObject {
    /// Creates an empty object bound to an optional credential.
    #[must_use]
    pub const fn new(access_token: Option<AccessToken>) -> Self {
        Self {
            fields: Fields::new(),
            access_token,
            internal: Fields::new(),
        }
    }

    /// Creates an object holding `id`, if `id` is set.
    #[must_use]
    pub fn with_id(id: impl Into<FieldValue>, access_token: Option<AccessToken>) -> Self {
        let mut object = Self::new(access_token);
        let id = id.into();
        if id.is_set() {
            object.fields.insert("id", id);
        }
        object
    }

    /// Creates an object from an existing field mapping.
    #[must_use]
    pub const fn from_fields(fields: Fields, access_token: Option<AccessToken>) -> Self {
        Self {
            fields,
            access_token,
            internal: Fields::new(),
        }
    }

    /// Returns the field mapping.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Consumes the object, returning its field mapping.
    #[must_use]
    pub fn into_fields(self) -> Fields {
        self.fields
    }

    /// Returns the stored credential, if any.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Replaces the stored credential.
    pub fn set_access_token(&mut self, access_token: Option<AccessToken>) {
        self.access_token = access_token;
    }

    /// Attribute-style read.
    ///
    /// Internal (`_`-prefixed) names resolve only against internal
    /// attributes and `access_token` reads the credential back as a string
    /// (`null` when unset). Every other name resolves against the field
    /// mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingAttribute`] naming the missing key.
    pub fn attr(&self, name: &str) -> Result<Cow<'_, FieldValue>, ResourceError> {
        if name == ACCESS_TOKEN_ATTR {
            let token = self
                .access_token
                .as_ref()
                .map_or(Value::Null, |token| Value::String(token.as_ref().to_string()));
            return Ok(Cow::Owned(FieldValue::Json(token)));
        }

        let found = if name.starts_with(INTERNAL_PREFIX) {
            self.internal.get(name)
        } else {
            self.fields.get(name)
        };
        found
            .map(Cow::Borrowed)
            .ok_or_else(|| ResourceError::MissingAttribute {
                name: name.to_string(),
            })
    }

    /// Attribute-style write.
    ///
    /// `_`-prefixed names are stored as internal attributes and
    /// `access_token` replaces the credential (a value that is not a
    /// non-empty string clears it). Every other name is stored as a field.
    pub fn set_attr(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        if name.starts_with(INTERNAL_PREFIX) {
            self.internal.insert(name, value);
        } else if name == ACCESS_TOKEN_ATTR {
            self.access_token = value.as_str().and_then(|token| AccessToken::new(token).ok());
        } else {
            self.fields.insert(name, value);
        }
    }

    /// Replaces the entire field mapping with the fields of `values`.
    ///
    /// Fields are cleared before repopulating, so no stale field survives.
    /// The credential becomes `access_token` if given, else the credential
    /// stored on `values`, else none.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatfox_api::rest::{ApiObject, Fields};
    ///
    /// let mut object = ApiObject::from_fields(Fields::new().with("a", 1).with("b", 2), None);
    /// object.refresh_from_data(Fields::new().with("a", 9).into(), None);
    ///
    /// assert_eq!(object.fields(), &Fields::new().with("a", 9));
    /// ```
    pub fn refresh_from_data(&mut self, values: Self, access_token: Option<AccessToken>) {
        self.access_token = access_token.or(values.access_token);
        self.fields.clear();
        for (key, value) in values.fields {
            self.fields.insert(key, value);
        }
    }

    /// Sends a request with this object's credential.
    ///
    /// A fresh [`HttpClient`] is built for the call; the configuration's
    /// default credential applies when the object has none.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] raised by the transport.
    pub async fn request(
        &self,
        config: &FlatfoxConfig,
        method: HttpMethod,
        path: &str,
        data: Option<&Fields>,
    ) -> Result<Value, HttpError> {
        let client = HttpClient::new(config, self.access_token.as_ref())?;
        client.request(method, path, data).await
    }

    /// Alias of the `id` field, stable across resource kinds.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingAttribute`] if no `id` is stored.
    pub fn flatfox_id(&self) -> Result<&FieldValue, ResourceError> {
        self.fields
            .get("id")
            .ok_or_else(|| ResourceError::MissingAttribute {
                name: "id".to_string(),
            })
    }

    /// Serializes the full field mapping to JSON, including `id`.
    #[must_use]
    pub fn serialize(&self) -> Value {
        self.fields.to_json()
    }
}

impl From<Fields> for ApiObject {
    fn from(fields: Fields) -> Self {
        Self::from_fields(fields, None)
    }
}

impl Deref for ApiObject {
    type Target = Fields;

    fn deref(&self) -> &Fields {
        &self.fields
    }
}

impl DerefMut for ApiObject {
    fn deref_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }
}
