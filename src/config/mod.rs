//! Configuration types for the account API client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: The configuration struct holding all client settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ApiBaseUrl`]: A validated API base URL
//! - [`SessionSecret`]: The session signing secret with masked debug output
//!
//! # Example
//!
//! ```rust
//! use account_api::{ClientConfig, ApiBaseUrl, SessionSecret};
//!
//! let config = ClientConfig::builder()
//!     .base_url(ApiBaseUrl::new("https://api.example.com").unwrap())
//!     .session_secret(SessionSecret::new("my-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.login_path(), "/login");
//! ```

mod newtypes;

pub use newtypes::{ApiBaseUrl, SessionSecret};

use crate::error::ConfigError;
use chrono::{Duration, Utc};

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "ACCOUNT_API_URL";

/// Environment variable holding the session signing secret.
pub const SESSION_SECRET_ENV: &str = "ACCOUNT_SESSION_SECRET";

/// Default maximum session age in days.
pub const DEFAULT_SESSION_MAX_AGE_DAYS: i64 = 30;

/// Default login entry point for expired sessions.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Configuration for the account API client.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: ApiBaseUrl,
    session_secret: SessionSecret,
    session_max_age: Duration,
    login_path: String,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Builds a configuration from `ACCOUNT_API_URL` and `ACCOUNT_SESSION_SECRET`.
    ///
    /// The base URL falls back to `http://localhost:8000` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the session secret is
    /// not set, or a validation error for malformed values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(ApiBaseUrl::new(url)?);
        }
        if let Ok(secret) = std::env::var(SESSION_SECRET_ENV) {
            builder = builder.session_secret(SessionSecret::new(secret)?);
        }
        builder.build()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &ApiBaseUrl {
        &self.base_url
    }

    /// Returns the session signing secret.
    #[must_use]
    pub const fn session_secret(&self) -> &SessionSecret {
        &self.session_secret
    }

    /// Returns the maximum age of a session.
    #[must_use]
    pub const fn session_max_age(&self) -> Duration {
        self.session_max_age
    }

    /// Returns the login entry point used when a session expires.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// The only required field is `session_secret`.
///
/// # Defaults
///
/// - `base_url`: `http://localhost:8000`
/// - `session_max_age`: 30 days
/// - `login_path`: `/login`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<ApiBaseUrl>,
    session_secret: Option<SessionSecret>,
    session_max_age: Option<Duration>,
    login_path: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: ApiBaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the session signing secret (required).
    #[must_use]
    pub fn session_secret(mut self, secret: SessionSecret) -> Self {
        self.session_secret = Some(secret);
        self
    }

    /// Sets the maximum session age.
    #[must_use]
    pub const fn session_max_age(mut self, max_age: Duration) -> Self {
        self.session_max_age = Some(max_age);
        self
    }

    /// Sets the login entry point returned with expired sessions.
    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `session_secret` is
    /// not set, [`ConfigError::InvalidMaxAge`] for a max age that is not
    /// positive or overflows the calendar, and
    /// [`ConfigError::InvalidLoginPath`] for a login path without a leading `/`.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let session_secret = self
            .session_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "session_secret",
            })?;

        let session_max_age = self
            .session_max_age
            .unwrap_or_else(|| Duration::days(DEFAULT_SESSION_MAX_AGE_DAYS));
        if session_max_age <= Duration::zero()
            || Utc::now().checked_add_signed(session_max_age).is_none()
        {
            return Err(ConfigError::InvalidMaxAge {
                seconds: session_max_age.num_seconds(),
            });
        }

        let login_path = self
            .login_path
            .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string());
        if !login_path.starts_with('/') {
            return Err(ConfigError::InvalidLoginPath { path: login_path });
        }

        Ok(ClientConfig {
            base_url: self.base_url.unwrap_or_default(),
            session_secret,
            session_max_age,
            login_path,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
