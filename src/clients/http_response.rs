//! HTTP response types for the Flatfox API client.
//!
//! This module provides the [`HttpResponse`] type and the interpretation step
//! that turns a raw response into a JSON value or a classified error.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, InvalidResponseError};

/// A raw HTTP response from the Flatfox API.
///
/// The body is kept as text so that a response that is not valid JSON can be
/// reported verbatim.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lower-cased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Interprets the response as the result of an API call.
    ///
    /// The body is parsed as JSON first; a body that cannot be parsed is an
    /// [`HttpError::InvalidResponse`] regardless of the status code. A parsed
    /// body with a status outside 200-299 is classified by
    /// [`HttpError::from_status`]. Otherwise the parsed JSON is returned.
    ///
    /// # Errors
    ///
    /// Returns the classified [`HttpError`] as described above.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatfox_api::clients::{HttpError, HttpResponse};
    /// use std::collections::HashMap;
    ///
    /// let ok = HttpResponse::new(200, HashMap::new(), r#"{"id": 1}"#);
    /// assert_eq!(ok.into_json().unwrap()["id"], 1);
    ///
    /// let broken = HttpResponse::new(502, HashMap::new(), "<html>Bad Gateway</html>");
    /// assert!(matches!(broken.into_json(), Err(HttpError::InvalidResponse(_))));
    /// ```
    pub fn into_json(self) -> Result<serde_json::Value, HttpError> {
        let json: serde_json::Value = match serde_json::from_str(&self.body) {
            Ok(json) => json,
            Err(_) => {
                return Err(HttpError::InvalidResponse(InvalidResponseError {
                    code: self.code,
                    body: self.body,
                }))
            }
        };

        if !self.is_ok() {
            return Err(HttpError::from_status(self.code, json));
        }

        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(code: u16, body: &str) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body)
    }

    #[test]
    fn test_is_ok_covers_2xx_range_only() {
        assert!(response(200, "{}").is_ok());
        assert!(response(201, "{}").is_ok());
        assert!(response(299, "{}").is_ok());
        assert!(!response(199, "{}").is_ok());
        assert!(!response(300, "{}").is_ok());
        assert!(!response(404, "{}").is_ok());
    }

    #[test]
    fn test_into_json_returns_parsed_body_on_success() {
        let value = response(200, r#"[{"id": 1}, {"id": 2}]"#).into_json().unwrap();
        assert_eq!(value, json!([{"id": 1}, {"id": 2}]));
    }

    #[test]
    fn test_into_json_accepts_bare_scalars() {
        assert_eq!(response(200, "42").into_json().unwrap(), json!(42));
    }

    #[test]
    fn test_invalid_json_is_an_invalid_response_even_on_success() {
        let error = response(200, "not json").into_json().unwrap_err();
        match error {
            HttpError::InvalidResponse(e) => {
                assert_eq!(e.code, 200);
                assert_eq!(e.body, "not json");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_is_an_invalid_response() {
        let error = response(204, "").into_json().unwrap_err();
        assert!(matches!(error, HttpError::InvalidResponse(_)));
        assert_eq!(error.status_code(), Some(204));
    }

    #[test]
    fn test_error_status_is_classified() {
        let error = response(404, r#"{"detail": "not found"}"#)
            .into_json()
            .unwrap_err();
        assert!(matches!(error, HttpError::InvalidRequest(_)));
        assert_eq!(error.status_code(), Some(404));
    }
}
