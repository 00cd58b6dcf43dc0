//! HTTP client types for account API communication.
//!
//! This module provides the request layer every account operation goes
//! through. It attaches the session's bearer token, parses `{message,
//! errors}` error bodies, and recovers once from an expired token.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`RequestBody`]: JSON or multipart request bodies
//! - [`Attempt`]: Original send or post-refresh resend
//!
//! # Example
//!
//! ```rust,ignore
//! use account_api::{ClientConfig, HttpClient, HttpMethod, HttpRequest, SessionStore};
//!
//! let store = SessionStore::new(config.session_max_age());
//! let client = HttpClient::new(&config, store.clone())?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/api/user/profile")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Refresh Behavior
//!
//! - **401 on the original send**: `POST /api/auth/refresh`, rotate the
//!   stored token, resend once
//! - **401 on the resend**: returned as [`HttpError::Response`]
//! - **Refresh failure**: the session is expired and
//!   [`HttpError::SessionExpired`] names the login path
//! - **Any other status**: returned immediately, no retry

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{Attempt, HttpClient, REFRESH_PATH, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, MultipartFile, RequestBody};
pub use http_response::{ApiErrorBody, HttpResponse};
