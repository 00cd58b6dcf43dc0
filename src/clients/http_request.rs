//! HTTP request types for the account API client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the API.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the account API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for actions and uploads.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A file attached to a multipart upload.
///
/// The bytes are kept so the request can be resent after a token refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultipartFile {
    /// Form field name (e.g., `avatar`).
    pub field: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type of the file.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl MultipartFile {
    /// Creates a file part.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// The body of an HTTP request.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// JSON body (`application/json`).
    Json(serde_json::Value),
    /// Multipart form upload (`multipart/form-data`).
    Multipart(Vec<MultipartFile>),
}

/// An HTTP request to be sent to the API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use account_api::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "/api/user/profile")
///     .build()
///     .unwrap();
///
/// let put_request = HttpRequest::builder(HttpMethod::Put, "/api/user/profile")
///     .json(json!({"name": "Ada", "title": "Engineer"}))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the base URL) for this request.
    pub path: String,
    /// The request body, if any.
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `path` does not start with `/`
    /// - `http_method` is `Put` but `body` is `None`
    /// - `http_method` is `Get` or `Delete` and `body` is `Some`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.path.starts_with('/') {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: self.path.clone(),
            });
        }

        match self.http_method {
            HttpMethod::Put if self.body.is_none() => Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            }),
            HttpMethod::Get | HttpMethod::Delete if self.body.is_some() => {
                Err(InvalidHttpRequestError::UnexpectedBody {
                    method: self.http_method.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<RequestBody>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
        }
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(RequestBody::Json(body.into()));
        self
    }

    /// Adds a file to a multipart body, replacing any JSON body.
    #[must_use]
    pub fn file(mut self, file: MultipartFile) -> Self {
        match &mut self.body {
            Some(RequestBody::Multipart(files)) => files.push(file),
            _ => self.body = Some(RequestBody::Multipart(vec![file])),
        }
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
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_post_without_body_is_allowed() {
        let request = HttpRequest::builder(HttpMethod::Post, "/api/auth/refresh")
            .build()
            .unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn test_put_requires_body() {
        let result = HttpRequest::builder(HttpMethod::Put, "/api/user/profile").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "put"
        ));
    }

    #[test]
    fn test_get_rejects_body() {
        let result = HttpRequest::builder(HttpMethod::Get, "/api/user/profile")
            .json(json!({"x": 1}))
            .build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::UnexpectedBody { .. })
        ));
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Get, "api/user/profile").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_multipart_files_accumulate() {
        let request = HttpRequest::builder(HttpMethod::Post, "/api/user/update-avatar")
            .file(MultipartFile::new("avatar", "a.png", "image/png", vec![1, 2]))
            .file(MultipartFile::new("extra", "b.png", "image/png", vec![3]))
            .build()
            .unwrap();

        match request.body {
            Some(RequestBody::Multipart(files)) => {
                assert_eq!(files.len(), 2);
                assert_eq!(files[0].field, "avatar");
            }
            other => panic!("Expected multipart body, got {other:?}"),
        }
    }
}
