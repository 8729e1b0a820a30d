//! HTTP request types for the Flatfox API client.
//!
//! This module provides the [`HttpRequest`] type, its builder, and
//! [`HttpRequest::from_fields`], which picks between a JSON and a multipart
//! body depending on whether the encoded fields contain files.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;
use crate::rest::{serialize_object, Fields, FileUpload, SerializedParams};

/// HTTP methods used by the Flatfox API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving and listing resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
}

impl HttpMethod {
    /// Returns the upper-case method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON content type (`application/json`).
    Json,
    /// Multipart form data (`multipart/form-data`), used for file uploads.
    Multipart,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    ///
    /// For multipart bodies the transport adds the boundary parameter itself.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Multipart => "multipart/form-data",
        }
    }
}

/// An HTTP request to be sent to the Flatfox API.
///
/// For [`DataType::Json`] the `body` is sent as the JSON document. For
/// [`DataType::Multipart`] the members of the `body` object become text form
/// fields and `files` become file parts.
///
/// # Example
///
/// ```rust
/// use flatfox_api::clients::{DataType, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "my-flat")
///     .body(json!({"street": "Bahnhofstrasse 1"}))
///     .body_type(DataType::Json)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.http_method, HttpMethod::Post);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the API base) for this request.
    pub path: String,
    /// The scalar parameters of the body, if any.
    pub body: Option<Value>,
    /// The content type of the body.
    pub body_type: Option<DataType>,
    /// File parts of a multipart body.
    pub files: Vec<(String, FileUpload)>,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Builds a request whose body is the encoding of `data`.
    ///
    /// The fields are split by [`serialize_object`]. Without file parameters
    /// the scalar parameters are sent as JSON; with any file parameter the
    /// whole request becomes multipart. A request is never split across both
    /// encodings.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] for a POST or PUT
    /// without data and [`InvalidHttpRequestError::NestedFile`] if a file is
    /// nested inside another field.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatfox_api::clients::{DataType, HttpMethod, HttpRequest};
    /// use flatfox_api::rest::{Fields, FileUpload};
    ///
    /// let fields = Fields::new()
    ///     .with("caption", "Kitchen")
    ///     .with("image", FileUpload::new("kitchen.jpg", b"...".to_vec()));
    ///
    /// let request = HttpRequest::from_fields(HttpMethod::Post, "flat-image", Some(&fields)).unwrap();
    /// assert_eq!(request.body_type, Some(DataType::Multipart));
    /// assert_eq!(request.files.len(), 1);
    /// ```
    pub fn from_fields(
        method: HttpMethod,
        path: impl Into<String>,
        data: Option<&Fields>,
    ) -> Result<Self, InvalidHttpRequestError> {
        let mut builder = Self::builder(method, path);

        if let Some(fields) = data {
            let SerializedParams { params, files } = serialize_object(fields)?;
            let body_type = if files.is_empty() {
                DataType::Json
            } else {
                DataType::Multipart
            };
            tracing::debug!(
                "Encoding {} scalar and {} file parameters as {}",
                params.len(),
                files.len(),
                body_type.as_content_type()
            );
            builder = builder
                .body(Value::Object(params))
                .body_type(body_type)
                .files(files);
        }

        builder.build()
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `body` is `Some` but `body_type` is `None`
    /// - `files` is non-empty but `body_type` is not [`DataType::Multipart`]
    /// - `http_method` is `Post` or `Put` but `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }

        if !self.files.is_empty() && self.body_type != Some(DataType::Multipart) {
            return Err(InvalidHttpRequestError::FilesRequireMultipart);
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<Value>,
    body_type: Option<DataType>,
    files: Vec<(String, FileUpload)>,
    query: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            body_type: None,
            files: Vec::new(),
            query: None,
        }
    }

    /// Sets the request body.
    ///
    /// When setting a body, you must also set the body type via [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the request body.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Sets all file parts at once.
    #[must_use]
    pub fn files(mut self, files: Vec<(String, FileUpload)>) -> Self {
        self.files = files;
        self
    }

    /// Adds a single file part.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.files.push((name.into(), file));
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            body_type: self.body_type,
            files: self.files,
            query: self.query,
        };
        request.verify()?;
        Ok(request)
    }
}
