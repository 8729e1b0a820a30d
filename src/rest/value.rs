//! Field values stored in a resource.
//!
//! A field holds one of:
//!
//! - a JSON value (scalars, and nested structures the server returned as-is)
//! - a date or a datetime, sent as ISO-8601 strings
//! - a nested resource
//! - a list of values
//! - a file payload, sent as a multipart file part

use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde_json::Value;

use crate::rest::ApiObject;

/// A value stored under a field name of a resource.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// A JSON value.
    Json(Value),
    /// A calendar date, encoded as `YYYY-MM-DD`.
    Date(NaiveDate),
    /// A point in time, encoded as RFC 3339 with its own UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// A nested resource.
    Object(ApiObject),
    /// An ordered list of values, e.g. decoded sub-resources.
    List(Vec<FieldValue>),
    /// A binary payload uploaded as a file part.
    File(FileUpload),
}

impl FieldValue {
    /// Returns `true` when the value counts as set for addressing purposes.
    ///
    /// JSON `null` and the empty string are unset; everything else is set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Json(Value::Null) => false,
            Self::Json(Value::String(s)) => !s.is_empty(),
            _ => true,
        }
    }

    /// Returns the JSON value, if this is a JSON field.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the string, if this is a JSON string field.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    /// Returns the integer, if this is a JSON integer field.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_json().and_then(Value::as_i64)
    }

    /// Returns the nested resource, if this is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ApiObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the file payload, if this is one.
    #[must_use]
    pub const fn as_file(&self) -> Option<&FileUpload> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    /// Returns `true` if a file payload appears anywhere in the value.
    #[must_use]
    pub fn contains_file(&self) -> bool {
        match self {
            Self::File(_) => true,
            Self::List(items) => items.iter().any(Self::contains_file),
            Self::Object(object) => object.iter().any(|(_, value)| value.contains_file()),
            _ => false,
        }
    }

    /// Serializes the value to a JSON primitive.
    ///
    /// Nested resources serialize to their full field mapping and dates to
    /// ISO-8601 strings. Files have no primitive form and serialize to
    /// `null`; [`serialize_object`](crate::rest::serialize_object) routes
    /// top-level files to the file parameters and rejects nested ones, so a
    /// request never carries such a `null`.
    #[must_use]
    pub fn to_primitive(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Date(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            Self::DateTime(datetime) => Value::String(datetime.to_rfc3339()),
            Self::Object(object) => object.serialize(),
            Self::List(items) => Value::Array(items.iter().map(Self::to_primitive).collect()),
            Self::File(_) => Value::Null,
        }
    }

    /// Renders the value as a URL path segment before percent-encoding.
    ///
    /// Strings are used verbatim; other values use their JSON form.
    pub(crate) fn to_segment(&self) -> String {
        match self.to_primitive() {
            Value::String(s) => s,
            other => other.to_string(),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Json(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Json(Value::String(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Json(Value::Bool(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value.into())
    }
}

impl From<ApiObject> for FieldValue {
    fn from(value: ApiObject) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        Self::List(value)
    }
}

impl From<FileUpload> for FieldValue {
    fn from(value: FileUpload) -> Self {
        Self::File(value)
    }
}

/// A binary payload to be uploaded as a multipart file part.
///
/// # Example
///
/// ```rust
/// use flatfox_api::rest::FileUpload;
///
/// let file = FileUpload::new("kitchen.jpg", b"...".to_vec()).with_mime_type("image/jpeg");
/// assert_eq!(file.file_name(), "kitchen.jpg");
/// assert_eq!(file.mime_type(), Some("image/jpeg"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    file_name: String,
    mime_type: Option<String>,
    content: Vec<u8>,
}

impl FileUpload {
    /// Creates a file payload from in-memory content.
    #[must_use]
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            content: content.into(),
        }
    }

    /// Reads a file from disk; the file name part is taken from the path.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, content))
    }

    /// Sets the MIME type sent with the file part.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Returns the file name sent with the file part.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the MIME type, if set.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Returns the file content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Converts the payload into a multipart part.
    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part, reqwest::Error> {
        let part = reqwest::multipart::Part::bytes(self.content).file_name(self.file_name);
        match self.mime_type {
            Some(mime_type) => part.mime_str(&mime_type),
            None => Ok(part),
        }
    }
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.content.len())
            .finish()
    }
}
