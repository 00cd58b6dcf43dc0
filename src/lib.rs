//! # Account API Rust Client
//!
//! A Rust client for an account API, providing registration, credential
//! login, session-bound profile and avatar management, password reset, and
//! the settings navigation model.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - A shared, observable [`SessionStore`] with a 30-day expiry horizon
//! - A signed session token for carrying the credential between page loads
//! - An async [`HttpClient`] that attaches the bearer token and recovers once
//!   from an expired token
//! - Typed account operations and workflows via [`api`]
//! - Client-side form validation via [`validation`]
//! - Route protection via [`RouteGuard`]
//!
//! ## Quick Start
//!
//! ```rust
//! use account_api::{ApiBaseUrl, ClientConfig, SessionSecret};
//!
//! let config = ClientConfig::builder()
//!     .base_url(ApiBaseUrl::new("https://api.example.com").unwrap())
//!     .session_secret(SessionSecret::new("session-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.login_path(), "/login");
//! ```
//!
//! ## Signing In
//!
//! ```rust,ignore
//! use account_api::{ClientConfig, HttpClient, SessionStore};
//! use account_api::api::{sign_in, LoginCredentials};
//!
//! let config = ClientConfig::from_env()?;
//! let store = SessionStore::new(config.session_max_age());
//! let client = HttpClient::new(&config, store.clone())?;
//!
//! let credential = sign_in(&client, &LoginCredentials::new("a@b.com", "secret1")).await?;
//! assert_eq!(store.bearer_token().as_deref(), Some(credential.access_token.as_str()));
//! ```
//!
//! ## Session Events
//!
//! The presentation layer subscribes to the store and reacts to sign-in,
//! profile changes, and forced sign-out:
//!
//! ```rust,ignore
//! use account_api::{SessionEvent, ExpiryReason};
//!
//! let mut events = store.subscribe();
//! while let Ok(event) = events.recv().await {
//!     if let SessionEvent::Expired(ExpiryReason::RefreshFailed { redirect_to }) = event {
//!         navigate(&redirect_to);
//!     }
//! }
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use account_api::clients::{HttpRequest, HttpMethod};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/api/user/profile")
//!     .build()
//!     .unwrap();
//!
//! // A 401 triggers one refresh and one resend before the error surfaces
//! let response = client.request(request).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: The session store is injected into the client
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Tokens stay secret**: `Debug` output and logs never include tokens

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod settings;
pub mod validation;

// Re-export public types at crate root for convenience
pub use auth::{
    Access, AuthError, Credential, CredentialPatch, ExpiryReason, ResetLink, RouteGuard,
    SessionClaims, SessionError, SessionEvent, SessionStore,
};
pub use config::{ApiBaseUrl, ClientConfig, ClientConfigBuilder, SessionSecret};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    Attempt, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError,
};

// Re-export validation types
pub use validation::{FieldErrors, Validate};
