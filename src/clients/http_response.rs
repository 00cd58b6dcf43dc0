//! HTTP response types for the account API client.
//!
//! This module provides the [`HttpResponse`] type for accessing response
//! data and the [`ApiErrorBody`] shape every error response shares.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::clients::errors::HttpResponseError;
use crate::validation::FieldErrors;

/// The error body returned by the API: `{message, errors?}`.
///
/// # Example
///
/// ```rust
/// use account_api::clients::ApiErrorBody;
///
/// let body: ApiErrorBody = serde_json::from_str(
///     r#"{"message":"The given data was invalid.","errors":{"email":["Taken."]}}"#,
/// ).unwrap();
///
/// assert_eq!(body.message.as_deref(), Some("The given data was invalid."));
/// assert_eq!(body.errors.unwrap().first("email"), Some("Taken."));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Field-scoped validation messages.
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

/// An HTTP response from the account API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` for a 401 response.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.code == 401
    }

    /// Returns the `message` field of the body, if present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(serde_json::Value::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }

    /// Builds the error for a non-2xx response from its `{message, errors}` body.
    ///
    /// Falls back to a generic message when the body carries none.
    #[must_use]
    pub fn to_error(&self) -> HttpResponseError {
        let parsed: ApiErrorBody = self.json().unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", self.code));

        HttpResponseError {
            code: self.code,
            message,
            errors: parsed.errors.filter(|errors| !errors.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 401, 404, 422, 500] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!response.is_ok());
        }
    }

    #[test]
    fn test_to_error_uses_message_and_errors() {
        let response = HttpResponse::new(
            422,
            HashMap::new(),
            json!({
                "message": "The given data was invalid.",
                "errors": {"email": ["The email has already been taken."]}
            }),
        );

        let error = response.to_error();
        assert_eq!(error.code, 422);
        assert_eq!(error.message, "The given data was invalid.");
        assert_eq!(
            error.errors.unwrap().first("email"),
            Some("The email has already been taken.")
        );
    }

    #[test]
    fn test_to_error_falls_back_to_generic_message() {
        let response = HttpResponse::new(500, HashMap::new(), json!({"raw_body": "<html>"}));
        let error = response.to_error();
        assert_eq!(error.message, "Request failed with status 500");
        assert!(error.errors.is_none());
    }

    #[test]
    fn test_json_deserializes_body() {
        #[derive(Deserialize)]
        struct Refresh {
            token: String,
        }

        let response = HttpResponse::new(200, HashMap::new(), json!({"token": "T2"}));
        let refresh: Refresh = response.json().unwrap();
        assert_eq!(refresh.token, "T2");
        assert!(response.message().is_none());
    }

    #[test]
    fn test_request_id_extraction() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123".to_string()]);

        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.request_id(), Some("abc-123"));
    }
}
