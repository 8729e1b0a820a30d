//! HTTP client for Flatfox API communication.
//!
//! This module provides the [`HttpClient`] type, the transport requestor that
//! every resource operation goes through. It knows nothing about resource
//! semantics: it builds one HTTP request, sends it, and interprets the
//! response.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{AccessToken, FlatfoxConfig};
use crate::rest::Fields;

/// Client version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Flatfox API.
///
/// The client handles:
/// - Absolute URL construction (`<server>/api/v1/<path>/`)
/// - Credential resolution and HTTP Basic authentication
/// - JSON or multipart encoding of the request body
/// - Response parsing and error classification
///
/// Each request is a single round trip; there is no retry logic.
///
/// # Example
///
/// ```rust,ignore
/// use flatfox_api::{FlatfoxConfig, AccessToken};
/// use flatfox_api::clients::{HttpClient, HttpMethod};
///
/// let config = FlatfoxConfig::builder()
///     .access_token(AccessToken::new("my-token").unwrap())
///     .build();
///
/// let client = HttpClient::new(&config, None)?;
/// let flats = client.request(HttpMethod::Get, "my-flat", None).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Absolute API base (e.g., `https://flatfox.ch/api/v1/`).
    api_base: String,
    /// The effective credential for every request made by this client.
    access_token: Option<AccessToken>,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// The explicit `access_token` wins over the configuration's default
    /// credential. When both are absent requests are sent without
    /// authentication and the server decides how to answer.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(
        config: &FlatfoxConfig,
        access_token: Option<&AccessToken>,
    ) -> Result<Self, HttpError> {
        let access_token = access_token.or_else(|| config.access_token()).cloned();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Flatfox API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            api_base: config.api_base(),
            access_token,
            default_headers,
        })
    }

    /// Returns the absolute API base for this client.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the credential this client authenticates with, if any.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds the absolute URL for a path.
    ///
    /// The backing API requires a trailing `/`, which is appended whenever
    /// the path does not already end with one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatfox_api::FlatfoxConfig;
    /// use flatfox_api::clients::HttpClient;
    ///
    /// let client = HttpClient::new(&FlatfoxConfig::default(), None).unwrap();
    /// assert_eq!(client.full_url("my-flat/42"), "https://flatfox.ch/api/v1/my-flat/42/");
    /// assert_eq!(client.full_url("my-flat/"), "https://flatfox.ch/api/v1/my-flat/");
    /// ```
    #[must_use]
    pub fn full_url(&self, path: &str) -> String {
        let mut url = format!("{}{path}", self.api_base);
        if !url.ends_with('/') {
            url.push('/');
        }
        url
    }

    /// Sends a request built from `data` and returns the JSON response.
    ///
    /// `data` is encoded with
    /// [`serialize_object`](crate::rest::serialize_object); the presence of
    /// any file parameter switches the request to multipart.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request is invalid, the network call
    /// fails, the body is not JSON, or the status is not 2xx.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        data: Option<&Fields>,
    ) -> Result<Value, HttpError> {
        let request = HttpRequest::from_fields(method, path, data)?;
        self.send(request).await?.into_json()
    }

    /// Sends a GET request with URL query parameters and returns the JSON
    /// response.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn request_with_query(
        &self,
        path: &str,
        query: HashMap<String, String>,
    ) -> Result<Value, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, path);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let request = builder.build()?;
        self.send(request).await?.into_json()
    }

    /// Sends an HTTP request and returns the raw response.
    ///
    /// Logs the method and full URL of every call.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidHttpRequest`] if validation fails and
    /// [`HttpError::Network`] if the round trip fails.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.full_url(&request.path);
        tracing::info!("Flatfox Api: {} {}", request.http_method, url);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(token) = &self.access_token {
            req_builder = req_builder.basic_auth(token.as_ref(), Some(""));
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        match request.body_type {
            Some(DataType::Json) => {
                let body = request.body.unwrap_or(Value::Null);
                req_builder = req_builder
                    .header("Content-Type", DataType::Json.as_content_type())
                    .body(body.to_string());
            }
            Some(DataType::Multipart) => {
                req_builder = req_builder.multipart(build_form(request.body, request.files)?);
            }
            None => {}
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }
}

/// Builds a multipart form: scalar parameters as text fields, files as parts.
fn build_form(
    body: Option<Value>,
    files: Vec<(String, crate::rest::FileUpload)>,
) -> Result<reqwest::multipart::Form, HttpError> {
    let mut form = reqwest::multipart::Form::new();

    if let Some(Value::Object(params)) = body {
        for (key, value) in params {
            form = form.text(key, form_text(value));
        }
    }

    for (key, file) in files {
        form = form.part(key, file.into_part()?);
    }

    Ok(form)
}

/// Renders a scalar parameter as a form field value.
fn form_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parses response headers into a `HashMap` with lower-cased names.
fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
