//! HTTP-specific error types for the account API client.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx responses, with the API's `message` and
//!   optional field `errors`
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors,
//!   including [`HttpError::SessionExpired`] after a failed token refresh
//!
//! # Example
//!
//! ```rust,ignore
//! use account_api::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::SessionExpired { redirect_to, .. }) => {
//!         navigate(&redirect_to);
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use crate::validation::FieldErrors;
use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// `message` is the API's `message` field when present. `errors` holds the
/// field-scoped validation messages sent with 422 responses.
///
/// # Example
///
/// ```rust
/// use account_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Not Found".to_string(),
///     errors: None,
/// };
///
/// assert_eq!(error.to_string(), "Not Found");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The user-facing error message.
    pub message: String,
    /// Field-scoped validation errors, if the API sent any.
    pub errors: Option<FieldErrors>,
}

impl HttpResponseError {
    /// Returns `true` for a 401 response.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.code == 401
    }

    /// Returns `true` for a 422 response.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        self.code == 422
    }
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET or DELETE request carries a body.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that forbids a body.
        method: String,
    },

    /// The request path does not start with `/`.
    #[error("Invalid request path '{path}'. Paths must start with '/'.")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 401 could not be recovered by refreshing the token. The session has
    /// been cleared and the user must sign in again at `redirect_to`.
    #[error("Session expired; sign in again at {redirect_to}")]
    SessionExpired {
        /// The login entry point.
        redirect_to: String,
        /// The original 401 rejection.
        rejection: HttpResponseError,
    },
}

impl HttpError {
    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) | Self::SessionExpired { rejection: e, .. } => Some(e.code),
            _ => None,
        }
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
    assert_send_sync::<HttpResponseError>();
};
