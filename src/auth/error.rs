//! Error types for authentication and session handling.
//!
//! # Error Types
//!
//! - [`SessionError`]: Misuse of the session store or an unreadable session token
//! - [`AuthError`]: Failures of the sign-in, registration, profile and
//!   password-reset workflows
//!
//! # Example
//!
//! ```rust
//! use account_api::auth::{AuthError, SessionError};
//!
//! let error = AuthError::MissingCredentials;
//! assert_eq!(error.to_string(), "Email and password are required");
//!
//! let error: AuthError = SessionError::MissingAccessToken.into();
//! assert!(error.to_string().contains("access token"));
//! ```

use crate::clients::HttpError;
use crate::validation::FieldErrors;
use thiserror::Error;

/// Errors raised by the [`SessionStore`](crate::auth::SessionStore) and
/// session token codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A credential without an access token cannot be established.
    #[error("Credential has no access token")]
    MissingAccessToken,

    /// The operation requires an active session.
    #[error("No active session")]
    NotAuthenticated,

    /// The session token could not be verified or decoded.
    #[error("Invalid session token: {reason}")]
    InvalidToken {
        /// Why the token was rejected.
        reason: String,
    },

    /// The session token could not be signed.
    #[error("Failed to sign session token: {reason}")]
    Signing {
        /// The underlying signing failure.
        reason: String,
    },
}

/// Errors that can occur in the account workflows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password was left empty.
    #[error("Email and password are required")]
    MissingCredentials,

    /// The login endpoint answered but did not produce a usable user and token.
    #[error("Login failed: {message}")]
    LoginRejected {
        /// The server message, or a generic description.
        message: String,
    },

    /// Input failed local validation before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// A password reset link is missing its token or email.
    #[error("Invalid password reset link: {reason}")]
    InvalidResetLink {
        /// What is missing from the link.
        reason: String,
    },

    /// The avatar file exceeds the upload limit.
    #[error("Avatar file is {size} bytes; files must be smaller than {limit} bytes")]
    AvatarTooLarge {
        /// Size of the rejected file.
        size: usize,
        /// Upload limit in bytes.
        limit: usize,
    },

    /// Session store failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Wrapped HTTP client error.
    #[error(transparent)]
    HttpError(#[from] HttpError),
}

impl AuthError {
    /// Returns the field errors attached to this failure, if any.
    ///
    /// Local validation failures and 422 responses from the API both carry
    /// field-scoped messages.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::HttpError(HttpError::Response(response)) => response.errors.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if the failure requires the user to sign in again.
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::HttpError(HttpError::SessionExpired { .. }))
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionError>();
    assert_send_sync::<AuthError>();
};
