//! Signed session token carrying the credential between page loads.
//!
//! The session token is an HS256 JWT signed with the configured
//! [`SessionSecret`]. Its claims hold the credential fields plus the bearer
//! token, and `iat`/`exp` bound the session to the configured maximum age.
//!
//! Two mappings run in opposite directions:
//!
//! - [`SessionClaims::from_credential`]: after sign-in, serialize the user
//!   and access token into claims
//! - [`SessionClaims::into_credential`]: on each session read, materialize a
//!   [`Credential`] from verified claims
//!
//! # Example
//!
//! ```rust
//! use account_api::{Credential, SessionSecret};
//! use account_api::auth::SessionClaims;
//! use chrono::{Duration, Utc};
//!
//! let secret = SessionSecret::new("secret").unwrap();
//! let credential = Credential::new(1, "T1").with_name("A");
//!
//! let claims = SessionClaims::from_credential(&credential, Utc::now(), Duration::days(30));
//! let token = claims.encode(&secret).unwrap();
//!
//! let restored = SessionClaims::decode(&token, &secret).unwrap();
//! assert_eq!(restored.into_credential(), Some(credential));
//! ```

use crate::auth::credential::Credential;
use crate::auth::error::SessionError;
use crate::auth::session::horizon;
use crate::config::SessionSecret;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Leeway for time-based claims validation, in seconds.
const LEEWAY_SECS: u64 = 10;

/// Claims stored in the signed session token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID.
    pub id: u64,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Public profile slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Bearer token for the API.
    #[serde(
        rename = "accessToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_token: Option<String>,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl SessionClaims {
    /// Builds claims for a freshly authenticated credential.
    #[must_use]
    pub fn from_credential(
        credential: &Credential,
        issued_at: DateTime<Utc>,
        max_age: Duration,
    ) -> Self {
        Self {
            id: credential.user_id,
            name: credential.name.clone(),
            email: credential.email.clone(),
            avatar: credential.avatar.clone(),
            phone: credential.phone.clone(),
            slug: credential.slug.clone(),
            title: credential.title.clone(),
            access_token: Some(credential.access_token.clone()).filter(|t| !t.is_empty()),
            iat: issued_at.timestamp(),
            exp: horizon(issued_at, max_age).map_or(i64::MAX, |end| end.timestamp()),
        }
    }

    /// Materializes a credential from the claims.
    ///
    /// Returns `None` when the claims carry no access token, since such a
    /// credential must never be attached to requests.
    #[must_use]
    pub fn into_credential(self) -> Option<Credential> {
        let access_token = self.access_token.filter(|t| !t.is_empty())?;
        Some(Credential {
            user_id: self.id,
            name: self.name,
            email: self.email,
            avatar: self.avatar,
            phone: self.phone,
            title: self.title,
            slug: self.slug,
            access_token,
        })
    }

    /// Returns when the session was established.
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.iat, 0).single().unwrap_or_else(Utc::now)
    }

    /// Signs the claims into a session token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Signing`] if encoding fails.
    pub fn encode(&self, secret: &SessionSecret) -> Result<String, SessionError> {
        let key = EncodingKey::from_secret(secret.as_ref().as_bytes());
        encode(&Header::new(Algorithm::HS256), self, &key).map_err(|e| SessionError::Signing {
            reason: e.to_string(),
        })
    }

    /// Verifies a session token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidToken`] if the signature is wrong, the
    /// token has expired, or the payload is malformed.
    pub fn decode(token: &str, secret: &SessionSecret) -> Result<Self, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;
        validation.validate_aud = false;

        let key = DecodingKey::from_secret(secret.as_ref().as_bytes());
        let token_data =
            decode::<Self>(token, &key, &validation).map_err(|e| SessionError::InvalidToken {
                reason: e.to_string(),
            })?;

        Ok(token_data.claims)
    }
}

// Verify SessionClaims is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionClaims>();
};
