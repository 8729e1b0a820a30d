//! Resource traits for Flatfox API objects.
//!
//! [`ApiResource`] gives every resource kind addressing, `retrieve`,
//! `refresh` and `exists`. The remaining operations are opt-in capability
//! traits:
//!
//! - [`Listable`]: `list` over the class URL
//! - [`Creatable`]: `create` by POST to the class URL
//! - [`Updatable`]: `save` by PUT to the instance URL
//!
//! # Implementing a Resource
//!
//! A resource kind is a wrapper struct around an [`ApiObject`]:
//!
//! ```rust
//! use flatfox_api::rest::{ApiObject, ApiResource, Creatable};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! pub struct Document(ApiObject);
//!
//! impl ApiResource for Document {
//!     const NAME: &'static str = "Document";
//!
//!     fn from_object(object: ApiObject) -> Self {
//!         Self(object)
//!     }
//!     fn as_object(&self) -> &ApiObject {
//!         &self.0
//!     }
//!     fn as_object_mut(&mut self) -> &mut ApiObject {
//!         &mut self.0
//!     }
//!     fn into_object(self) -> ApiObject {
//!         self.0
//!     }
//! }
//!
//! impl Creatable for Document {}
//!
//! assert_eq!(Document::class_url(), "document");
//! ```

use serde_json::{Map, Value};

use crate::clients::{HttpClient, HttpError, HttpMethod};
use crate::config::{AccessToken, FlatfoxConfig};
use crate::rest::{
    deserialize_object, fields_to_query, ApiObject, Decoded, FieldValue, Fields, ResourceError,
};

/// A Flatfox API resource kind.
///
/// Implementors only provide the name and the conversions to and from the
/// underlying [`ApiObject`]; every operation has a default implementation.
#[allow(async_fn_in_trait)]
pub trait ApiResource: Sized + Send + Sync {
    /// The kind name (e.g., "Flat"), used in errors and for the default URL
    /// segment.
    const NAME: &'static str;

    /// Wraps an object as this resource kind.
    fn from_object(object: ApiObject) -> Self;

    /// Returns the underlying object.
    fn as_object(&self) -> &ApiObject;

    /// Returns the underlying object mutably.
    fn as_object_mut(&mut self) -> &mut ApiObject;

    /// Unwraps the underlying object.
    fn into_object(self) -> ApiObject;

    /// The percent-encoded lower-case kind name.
    #[must_use]
    fn class_name() -> String {
        urlencoding::encode(&Self::NAME.to_lowercase()).into_owned()
    }

    /// The collection URL segment of this kind.
    ///
    /// Defaults to [`class_name`](Self::class_name); concrete kinds whose
    /// endpoint differs override it.
    #[must_use]
    fn class_url() -> String {
        Self::class_name()
    }

    /// Builds an instance from a decoded response mapping.
    ///
    /// The default stores every entry as a JSON field. Kinds with nested
    /// resources override this to decode those fields first.
    #[must_use]
    fn init_from_response(map: Map<String, Value>, access_token: Option<AccessToken>) -> Self {
        Self::from_object(ApiObject::from_fields(Fields::from_json_map(map), access_token))
    }

    /// Returns the instance URL, `<class_url>/<segment>`.
    ///
    /// The segment is `id` when set, else `ext-<external_id>`, and is
    /// percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] when neither is set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatfox_api::rest::{ApiObject, ApiResource, Fields};
    /// use flatfox_api::rest::resources::Flat;
    ///
    /// let flat = Flat::from_object(Fields::with_external_id("a b").into());
    /// assert_eq!(flat.instance_url().unwrap(), "my-flat/ext-a%20b");
    ///
    /// let flat = Flat::from_object(ApiObject::new(None));
    /// assert!(flat.instance_url().is_err());
    /// ```
    fn instance_url(&self) -> Result<String, ResourceError> {
        let object = self.as_object();
        let segment = format_id(object.get("id"), object.get("external_id")).ok_or(
            ResourceError::MissingId {
                resource: Self::NAME,
            },
        )?;
        Ok(format!("{}/{segment}", Self::class_url()))
    }

    /// Fetches a resource by its identifying fields (`id` or `external_id`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if `fields` identify nothing,
    /// and any error raised by [`refresh`](Self::refresh).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let flat = Flat::retrieve(&config, None, Fields::with_id(42)).await?;
    /// let flat = Flat::retrieve(&config, None, Fields::with_external_id("abc")).await?;
    /// ```
    async fn retrieve(
        config: &FlatfoxConfig,
        access_token: Option<AccessToken>,
        fields: Fields,
    ) -> Result<Self, ResourceError> {
        let mut resource = Self::from_object(ApiObject::from_fields(fields, access_token));
        resource.refresh(config).await?;
        Ok(resource)
    }

    /// Replaces this resource's fields with the server's current state.
    ///
    /// The object keeps its own credential. On error the fields are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] without network access if the
    /// object cannot be addressed, [`ResourceError::Http`] for transport
    /// failures and [`ResourceError::UnexpectedResponse`] if the server did
    /// not answer with an object.
    async fn refresh(&mut self, config: &FlatfoxConfig) -> Result<&mut Self, ResourceError> {
        let url = self.instance_url()?;
        let response = self
            .as_object()
            .request(config, HttpMethod::Get, &url, None)
            .await?;

        let access_token = self.as_object().access_token().cloned();
        let refreshed = decode_single::<Self>(response, access_token.clone(), "refresh")?;
        self.as_object_mut()
            .refresh_from_data(refreshed.into_object(), access_token);
        Ok(self)
    }

    /// Returns `true` if the resource identified by `fields` can be fetched
    /// with the configuration's default credential.
    ///
    /// Every [`ResourceError`] kind maps to `false`.
    async fn exists(config: &FlatfoxConfig, fields: Fields) -> bool {
        match Self::retrieve(config, None, fields).await {
            Ok(_) => true,
            Err(
                ResourceError::MissingId { .. }
                | ResourceError::MissingAttribute { .. }
                | ResourceError::UnexpectedResponse { .. }
                | ResourceError::Http(_),
            ) => false,
        }
    }
}

/// A resource kind whose collection can be listed.
#[allow(async_fn_in_trait)]
pub trait Listable: ApiResource {
    /// Lists resources, filtered by `query` sent as URL parameters.
    ///
    /// The response is decoded as-is: a sequence yields [`Decoded::List`],
    /// a lone mapping yields [`Decoded::Resource`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for transport failures, and for
    /// filters holding a file, which a query string cannot carry.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let flats = Flat::list(&config, None, Fields::new().with("status", "act"))
    ///     .await?
    ///     .into_resources();
    /// ```
    async fn list(
        config: &FlatfoxConfig,
        access_token: Option<AccessToken>,
        query: Fields,
    ) -> Result<Decoded<Self>, ResourceError> {
        let query = fields_to_query(&query).map_err(HttpError::from)?;
        let client = HttpClient::new(config, access_token.as_ref())?;
        let response = client
            .request_with_query(&Self::class_url(), query)
            .await?;
        Ok(deserialize_object(response, access_token.as_ref()))
    }
}

/// A resource kind that can be created.
#[allow(async_fn_in_trait)]
pub trait Creatable: ApiResource {
    /// Creates a resource by POSTing `fields` to the class URL.
    ///
    /// The instance is built directly from the response fields, bound to
    /// `access_token`. Any file field switches the request to multipart.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for transport failures (a rejected
    /// payload is an `InvalidRequest` carrying the server's error body) and
    /// [`ResourceError::UnexpectedResponse`] if the server did not answer
    /// with an object.
    async fn create(
        config: &FlatfoxConfig,
        access_token: Option<AccessToken>,
        fields: Fields,
    ) -> Result<Self, ResourceError> {
        let client = HttpClient::new(config, access_token.as_ref())?;
        let response = client
            .request(HttpMethod::Post, &Self::class_url(), Some(&fields))
            .await?;

        match response {
            Value::Object(map) => Ok(Self::from_object(ApiObject::from_fields(
                Fields::from_json_map(map),
                access_token,
            ))),
            _ => Err(ResourceError::UnexpectedResponse {
                resource: Self::NAME,
                operation: "create",
            }),
        }
    }
}

/// A resource kind that can be updated in place.
#[allow(async_fn_in_trait)]
pub trait Updatable: ApiResource {
    /// PUTs this resource's fields to its instance URL, then replaces them
    /// with the server's answer.
    ///
    /// # Errors
    ///
    /// Same as [`ApiResource::refresh`].
    async fn save(&mut self, config: &FlatfoxConfig) -> Result<&mut Self, ResourceError> {
        let url = self.instance_url()?;
        let response = self
            .as_object()
            .request(config, HttpMethod::Put, &url, Some(self.as_object().fields()))
            .await?;

        let access_token = self.as_object().access_token().cloned();
        let saved = decode_single::<Self>(response, access_token.clone(), "save")?;
        self.as_object_mut()
            .refresh_from_data(saved.into_object(), access_token);
        Ok(self)
    }
}

/// Formats the percent-encoded instance URL segment.
///
/// A set `id` is used verbatim, otherwise a set `external_id` becomes
/// `ext-<external_id>`. Returns `None` when neither is set.
///
/// # Example
///
/// ```rust
/// use flatfox_api::rest::{format_id, FieldValue};
///
/// assert_eq!(format_id(Some(&FieldValue::from(42)), None).as_deref(), Some("42"));
/// assert_eq!(format_id(None, Some(&FieldValue::from("a b"))).as_deref(), Some("ext-a%20b"));
/// assert_eq!(format_id(Some(&FieldValue::from("")), None), None);
/// ```
#[must_use]
pub fn format_id(id: Option<&FieldValue>, external_id: Option<&FieldValue>) -> Option<String> {
    let segment = if let Some(id) = id.filter(|id| id.is_set()) {
        id.to_segment()
    } else {
        format!("ext-{}", external_id.filter(|id| id.is_set())?.to_segment())
    };
    Some(urlencoding::encode(&segment).into_owned())
}

/// Decodes the answer of a single-resource operation.
fn decode_single<T: ApiResource>(
    value: Value,
    access_token: Option<AccessToken>,
    operation: &'static str,
) -> Result<T, ResourceError> {
    match value {
        Value::Object(map) => Ok(T::init_from_response(map, access_token)),
        _ => Err(ResourceError::UnexpectedResponse {
            resource: T::NAME,
            operation,
        }),
    }
}
