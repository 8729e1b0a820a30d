//! Conversion between resource fields and wire values.
//!
//! Encoding ([`serialize_object`]) splits a field mapping into the scalar
//! parameters of a request body and its file parameters. Decoding
//! ([`deserialize_object`]) turns a JSON response into typed resources,
//! recursing into sequences.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::clients::InvalidHttpRequestError;
use crate::config::AccessToken;
use crate::rest::object::INTERNAL_PREFIX;
use crate::rest::{ApiResource, FieldValue, Fields, FileUpload};

/// A field mapping split into body parameters and file parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SerializedParams {
    /// Scalar parameters, in field order.
    pub params: Map<String, Value>,
    /// File parameters, in field order.
    pub files: Vec<(String, FileUpload)>,
}

/// Encodes a field mapping into request parameters.
///
/// - `id` and `_`-prefixed names are skipped
/// - nested resources become their full JSON mapping
/// - lists become arrays of the encoding of each item
/// - dates and datetimes become ISO-8601 strings
/// - file payloads are routed to [`SerializedParams::files`]
/// - JSON values pass through verbatim
///
/// # Errors
///
/// Returns [`InvalidHttpRequestError::NestedFile`] if a file payload sits
/// inside a list or a nested resource, since only top-level fields can
/// become file parts.
///
/// # Example
///
/// ```rust
/// use flatfox_api::rest::{serialize_object, Fields, FileUpload};
/// use serde_json::json;
///
/// let fields = Fields::new()
///     .with("id", 42)
///     .with("street", "Bahnhofstrasse 1")
///     .with("plan", FileUpload::new("plan.pdf", b"%PDF".to_vec()));
///
/// let serialized = serialize_object(&fields).unwrap();
/// assert_eq!(serde_json::Value::Object(serialized.params), json!({"street": "Bahnhofstrasse 1"}));
/// assert_eq!(serialized.files[0].0, "plan");
/// ```
pub fn serialize_object(fields: &Fields) -> Result<SerializedParams, InvalidHttpRequestError> {
    let mut serialized = SerializedParams::default();

    for (key, value) in fields.iter() {
        if key == "id" || key.starts_with(INTERNAL_PREFIX) {
            continue;
        }
        match value {
            FieldValue::File(file) => serialized.files.push((key.to_string(), file.clone())),
            other if other.contains_file() => {
                return Err(InvalidHttpRequestError::NestedFile {
                    field: key.to_string(),
                });
            }
            other => {
                serialized.params.insert(key.to_string(), other.to_primitive());
            }
        }
    }

    Ok(serialized)
}

/// Flattens a field mapping into URL query parameters.
///
/// Nulls are dropped, arrays are comma-joined and objects are sent as JSON
/// text. Internal names never reach the query.
///
/// # Errors
///
/// Returns [`InvalidHttpRequestError::FilesRequireMultipart`] if any field
/// holds a file, and the errors of [`serialize_object`].
pub fn fields_to_query(
    fields: &Fields,
) -> Result<HashMap<String, String>, InvalidHttpRequestError> {
    let serialized = serialize_object(fields)?;
    if !serialized.files.is_empty() {
        return Err(InvalidHttpRequestError::FilesRequireMultipart);
    }

    let mut query = HashMap::new();

    for (key, val) in serialized.params {
        match val {
            Value::Null => {}
            Value::String(s) => {
                query.insert(key, s);
            }
            Value::Number(n) => {
                query.insert(key, n.to_string());
            }
            Value::Bool(b) => {
                query.insert(key, b.to_string());
            }
            Value::Array(arr) => {
                let values: Vec<String> = arr
                    .iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        Value::Bool(b) => Some(b.to_string()),
                        _ => None,
                    })
                    .collect();
                if !values.is_empty() {
                    query.insert(key, values.join(","));
                }
            }
            Value::Object(_) => {
                query.insert(key, val.to_string());
            }
        }
    }

    Ok(query)
}

/// The result of decoding a response value against a resource type.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded<T> {
    /// A mapping, decoded into the resource type.
    Resource(T),
    /// A sequence, each element decoded independently, in order.
    List(Vec<Decoded<T>>),
    /// Anything else, passed through unchanged.
    Value(Value),
}

impl<T> Decoded<T> {
    /// Returns the resource, if the decoded value was a mapping.
    #[must_use]
    pub fn into_resource(self) -> Option<T> {
        match self {
            Self::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Returns the decoded items, if the decoded value was a sequence.
    #[must_use]
    pub fn into_list(self) -> Option<Vec<Self>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Collects every decoded resource, flattening nested sequences.
    ///
    /// Values that were neither mappings nor sequences are dropped.
    #[must_use]
    pub fn into_resources(self) -> Vec<T> {
        match self {
            Self::Resource(resource) => vec![resource],
            Self::List(items) => items.into_iter().flat_map(Self::into_resources).collect(),
            Self::Value(_) => Vec::new(),
        }
    }
}

impl<T: ApiResource> From<Decoded<T>> for FieldValue {
    fn from(decoded: Decoded<T>) -> Self {
        match decoded {
            Decoded::Resource(resource) => Self::Object(resource.into_object()),
            Decoded::List(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Decoded::Value(value) => Self::Json(value),
        }
    }
}

/// Decodes a response value against the resource type `T`.
///
/// Mappings go through [`ApiResource::init_from_response`], so concrete
/// types decode their nested fields; every decoded resource is bound to
/// `access_token`.
///
/// # Example
///
/// ```rust
/// use flatfox_api::rest::{deserialize_object, Decoded};
/// use flatfox_api::rest::resources::FlatImage;
/// use serde_json::json;
///
/// let decoded = deserialize_object::<FlatImage>(json!([{"id": 1}, 7]), None);
/// let Decoded::List(items) = decoded else { panic!("expected a list") };
/// assert!(matches!(items[0], Decoded::Resource(_)));
/// assert_eq!(items[1], Decoded::Value(json!(7)));
/// ```
#[must_use]
pub fn deserialize_object<T: ApiResource>(
    value: Value,
    access_token: Option<&AccessToken>,
) -> Decoded<T> {
    match value {
        Value::Array(items) => {
            tracing::debug!("Decoding {} {} items", items.len(), T::NAME);
            Decoded::List(
                items
                    .into_iter()
                    .map(|item| deserialize_object(item, access_token))
                    .collect(),
            )
        }
        Value::Object(map) => Decoded::Resource(T::init_from_response(map, access_token.cloned())),
        other => Decoded::Value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::resources::FlatImage;
    use crate::rest::ApiObject;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_serialize_skips_id_and_internal_names() {
        let fields = Fields::new()
            .with("id", 1)
            .with("_cache", "x")
            .with("rooms", 3.5);

        let serialized = serialize_object(&fields).unwrap();
        assert_eq!(Value::Object(serialized.params), json!({"rooms": 3.5}));
        assert!(serialized.files.is_empty());
    }

    #[test]
    fn test_serialize_nested_resource_as_full_mapping() {
        let image = ApiObject::from_fields(Fields::new().with("id", 5).with("caption", "Bath"), None);
        let fields = Fields::new().with("cover", image);

        let serialized = serialize_object(&fields).unwrap();
        assert_eq!(
            serialized.params.get("cover"),
            Some(&json!({"id": 5, "caption": "Bath"}))
        );
    }

    #[test]
    fn test_serialize_lists_and_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let fields = Fields::new()
            .with("moving_date", date)
            .with("tags", FieldValue::List(vec!["a".into(), 2.into()]));

        let serialized = serialize_object(&fields).unwrap();
        assert_eq!(serialized.params.get("moving_date"), Some(&json!("2024-04-01")));
        assert_eq!(serialized.params.get("tags"), Some(&json!(["a", 2])));
    }

    #[test]
    fn test_serialize_routes_files_apart_from_params() {
        let fields = Fields::new()
            .with("caption", "Kitchen")
            .with("image", FileUpload::new("kitchen.jpg", b"JPEG".to_vec()));

        let serialized = serialize_object(&fields).unwrap();
        assert_eq!(serialized.params.len(), 1);
        assert!(!serialized.params.contains_key("image"));
        assert_eq!(serialized.files[0].0, "image");
        assert_eq!(serialized.files[0].1.content(), b"JPEG");
    }

    #[test]
    fn test_serialize_preserves_field_order() {
        let fields = Fields::new().with("z", 1).with("a", 2).with("m", 3);
        let serialized = serialize_object(&fields).unwrap();
        assert_eq!(
            serialized.params.keys().collect::<Vec<_>>(),
            vec!["z", "a", "m"]
        );
    }

    #[test]
    fn test_fields_to_query_flattens_values() {
        let fields = Fields::new()
            .with("id", 3)
            .with("city", "Zurich")
            .with("rooms", 4)
            .with("furnished", false)
            .with("ignored", Value::Null)
            .with("ids", json!([1, 2, 3]))
            .with("filter", json!({"a": 1}));

        let query = fields_to_query(&fields).unwrap();
        assert_eq!(query.get("city"), Some(&"Zurich".to_string()));
        assert_eq!(query.get("rooms"), Some(&"4".to_string()));
        assert_eq!(query.get("furnished"), Some(&"false".to_string()));
        assert_eq!(query.get("ids"), Some(&"1,2,3".to_string()));
        assert_eq!(query.get("filter"), Some(&r#"{"a":1}"#.to_string()));
        assert!(!query.contains_key("ignored"));
        assert!(!query.contains_key("id"));
    }

    #[test]
    fn test_serialize_rejects_file_nested_in_list() {
        let fields = Fields::new().with(
            "attachments",
            FieldValue::List(vec![
                "cover".into(),
                FileUpload::new("plan.pdf", b"%PDF".to_vec()).into(),
            ]),
        );

        let error = serialize_object(&fields).unwrap_err();
        assert_eq!(
            error,
            InvalidHttpRequestError::NestedFile {
                field: "attachments".to_string()
            }
        );
    }

    #[test]
    fn test_serialize_rejects_file_nested_in_resource() {
        let image = ApiObject::from_fields(
            Fields::new().with("image", FileUpload::new("bath.jpg", b"JPEG".to_vec())),
            None,
        );
        let fields = Fields::new().with("caption", "Bath").with("cover", image);

        let error = serialize_object(&fields).unwrap_err();
        assert!(error.to_string().contains("'cover'"));
    }

    #[test]
    fn test_fields_to_query_rejects_files() {
        let fields = Fields::new()
            .with("city", "Bern")
            .with("image", FileUpload::new("kitchen.jpg", b"JPEG".to_vec()));

        assert_eq!(
            fields_to_query(&fields).unwrap_err(),
            InvalidHttpRequestError::FilesRequireMultipart
        );
    }

    #[test]
    fn test_serialize_round_trips_through_from_json_map() {
        let fields = Fields::new()
            .with("id", 12)
            .with("_etag", "abc")
            .with("street", "Bahnhofstrasse 1")
            .with("rooms", 3.5)
            .with("floor", 2)
            .with("furnished", true)
            .with("description", Value::Null)
            .with("tags", json!(["quiet", "sunny"]));

        let decoded = Fields::from_json_map(serialize_object(&fields).unwrap().params);

        let expected: Fields = fields
            .iter()
            .filter(|(key, _)| *key != "id" && !key.starts_with('_'))
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        assert_eq!(decoded, expected);
        assert!(!decoded.contains_key("id"));
        assert!(!decoded.contains_key("_etag"));
    }

    #[test]
    fn test_deserialize_mapping_binds_credential() {
        let token = AccessToken::new("tok").unwrap();
        let decoded = deserialize_object::<FlatImage>(json!({"id": 9}), Some(&token));

        let image = decoded.into_resource().unwrap();
        assert_eq!(image.get("id").and_then(FieldValue::as_i64), Some(9));
        assert_eq!(image.access_token(), Some(&token));
    }

    #[test]
    fn test_deserialize_scalar_passes_through() {
        let decoded = deserialize_object::<FlatImage>(json!("ok"), None);
        assert_eq!(decoded, Decoded::Value(json!("ok")));
    }

    #[test]
    fn test_deserialize_nested_lists_keep_order() {
        let decoded =
            deserialize_object::<FlatImage>(json!([{"id": 1}, [{"id": 2}], {"id": 3}]), None);
        let ids: Vec<i64> = decoded
            .into_resources()
            .iter()
            .filter_map(|image| image.get("id").and_then(FieldValue::as_i64))
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_decoded_into_field_value() {
        let decoded = deserialize_object::<FlatImage>(json!([{"id": 1}, null]), None);
        let value = FieldValue::from(decoded);

        let items = value.as_list().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].as_object().is_some());
        assert_eq!(items[1], FieldValue::Json(Value::Null));
    }
}
