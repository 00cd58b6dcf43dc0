//! HTTP client for the account API.
//!
//! This module provides the [`HttpClient`] type. Every request reads the
//! bearer token from the injected [`SessionStore`], and a 401 triggers one
//! token refresh followed by a single resend.

use std::collections::HashMap;

use serde::Deserialize;

use crate::auth::SessionStore;
use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiBaseUrl, ClientConfig};

/// Client version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Endpoint that exchanges the current token for a fresh one.
pub const REFRESH_PATH: &str = "/api/auth/refresh";

/// Which send of a logical request is in flight.
///
/// A request starts as [`Attempt::Original`]. A 401 on the original send
/// allows exactly one refresh and one resend as [`Attempt::Retried`]; a 401
/// on the retried send is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attempt {
    /// The first send.
    Original,
    /// The resend after a token refresh.
    Retried,
}

impl Attempt {
    /// Returns the attempt that follows a refresh, or `None` once the
    /// refresh has been spent.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Original => Some(Self::Retried),
            Self::Retried => None,
        }
    }
}

#[derive(Deserialize)]
struct RefreshResponse {
    token: String,
}

/// HTTP client for making authenticated requests to the account API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent and Accept
/// - `Authorization: Bearer` from the session store, omitted when signed out
/// - One-shot token refresh on 401
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use account_api::{ClientConfig, HttpClient, HttpMethod, HttpRequest, SessionStore};
///
/// let store = SessionStore::new(config.session_max_age());
/// let client = HttpClient::new(&config, store.clone())?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/api/user/profile")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `http://localhost:8000`).
    base_url: ApiBaseUrl,
    /// Where to send the user when the session cannot be recovered.
    login_path: String,
    /// Source of the bearer token.
    session: SessionStore,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client reading credentials from `session`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Account API Client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            login_path: config.login_path().to_string(),
            session,
            default_headers,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_ref()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the session store this client reads from.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Sends a request, recovering once from an expired token.
    ///
    /// 1. The current bearer token, if any, is attached.
    /// 2. A non-401 response is returned as-is (2xx) or as
    ///    [`HttpError::Response`].
    /// 3. A 401 on the original send triggers [`refresh_token`](Self::refresh_token);
    ///    on success the request is resent once with the new token and that
    ///    result is returned without further interception.
    /// 4. If the refresh fails, the session is expired and
    ///    [`HttpError::SessionExpired`] carries the original rejection.
    /// 5. A 401 on the resend is returned as [`HttpError::Response`].
    ///
    /// Concurrent requests that hit a 401 each refresh on their own.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - The token could not be refreshed (`SessionExpired`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut bearer = self.session.bearer_token();
        let mut attempt = Attempt::Original;
        loop {
            let response = self.send(&request, bearer.as_deref()).await?;

            if response.is_ok() {
                return Ok(response);
            }
            let rejection = response.to_error();
            if !response.is_unauthorized() {
                return Err(HttpError::Response(rejection));
            }

            let Some(next) = attempt.next() else {
                tracing::debug!(path = %request.path, "Refreshed token was rejected");
                return Err(HttpError::Response(rejection));
            };

            match self.refresh_token().await {
                Ok(token) => {
                    bearer = Some(token);
                    attempt = next;
                }
                Err(error) => {
                    tracing::warn!(
                        path = %request.path,
                        %error,
                        "Token refresh failed"
                    );
                    self.session.expire(self.login_path.clone());
                    return Err(HttpError::SessionExpired {
                        redirect_to: self.login_path.clone(),
                        rejection,
                    });
                }
            }
        }
    }

    /// Exchanges the current token for a new one and stores it.
    ///
    /// The refresh call is sent once with the current bearer token and is
    /// never itself refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Response`] for a non-2xx answer or an empty
    /// token, [`HttpError::Decode`] if the body has no `token`, and
    /// [`HttpError::Network`] on transport failure.
    pub async fn refresh_token(&self) -> Result<String, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, REFRESH_PATH).build()?;
        let bearer = self.session.bearer_token();
        let response = self.send(&request, bearer.as_deref()).await?;

        if !response.is_ok() {
            return Err(HttpError::Response(response.to_error()));
        }

        let RefreshResponse { token } = response.json()?;
        if token.is_empty() {
            return Err(HttpError::Response(HttpResponseError {
                code: response.code,
                message: "Refresh returned an empty token".to_string(),
                errors: None,
            }));
        }

        if let Err(error) = self.session.rotate_token(token.clone()) {
            tracing::debug!(%error, "Refreshed token not stored");
        } else {
            tracing::info!("Access token refreshed");
        }
        Ok(token)
    }

    /// Performs a single send with the given bearer token.
    async fn send(
        &self,
        request: &HttpRequest,
        bearer: Option<&str>,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.base_url.join(&request.path);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(token) = bearer.filter(|token| !token.is_empty()) {
            req_builder = req_builder.bearer_auth(token);
        }

        match &request.body {
            Some(RequestBody::Json(body)) => {
                req_builder = req_builder.json(body);
            }
            Some(RequestBody::Multipart(files)) => {
                let mut form = reqwest::multipart::Form::new();
                for file in files {
                    let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                        .file_name(file.file_name.clone())
                        .mime_str(&file.mime_type)?;
                    form = form.part(file.field.clone(), part);
                }
                req_builder = req_builder.multipart(form);
            }
            None => {}
        }

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            authenticated = bearer.is_some(),
            "Sending request"
        );

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();

        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text).unwrap_or_else(|_| {
                // For 5xx errors, return raw body as string value
                if code >= 500 {
                    serde_json::json!({ "raw_body": body_text })
                } else {
                    serde_json::json!({})
                }
            })
        };

        let response = HttpResponse::new(code, res_headers, body);
        tracing::debug!(
            code,
            request_id = response.request_id().unwrap_or("-"),
            "Received response"
        );
        Ok(response)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credential;
    use crate::config::SessionSecret;

    fn create_test_config() -> ClientConfig {
        ClientConfig::builder()
            .session_secret(SessionSecret::new("test-secret").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_attempt_allows_exactly_one_retry() {
        assert_eq!(Attempt::Original.next(), Some(Attempt::Retried));
        assert_eq!(Attempt::Retried.next(), None);
    }

    #[test]
    fn test_client_construction_with_default_config() {
        let client = HttpClient::new(&create_test_config(), SessionStore::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config(), SessionStore::default()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Account API Client v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ClientConfig::builder()
            .session_secret(SessionSecret::new("test-secret").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config, SessionStore::default()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config(), SessionStore::default()).unwrap();
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_token_is_not_a_default_header() {
        let store = SessionStore::default();
        store.establish(Credential::new(1, "T1")).unwrap();
        let client = HttpClient::new(&create_test_config(), store).unwrap();

        assert!(client
            .default_headers()
            .keys()
            .all(|key| !key.eq_ignore_ascii_case("authorization")));
        assert_eq!(client.session().bearer_token().as_deref(), Some("T1"));
    }
}
