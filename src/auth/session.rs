//! The session store: single source of truth for the current credential.
//!
//! [`SessionStore`] is a cheaply cloneable handle around a shared slot. The
//! request client reads the bearer token from it before every call, the
//! refresh path rotates the token in place, and account workflows establish,
//! patch, or clear it. Every change is broadcast as a [`SessionEvent`] so the
//! presentation layer can re-render auth-dependent views.
//!
//! # Example
//!
//! ```rust
//! use account_api::{Credential, CredentialPatch, SessionStore};
//!
//! let store = SessionStore::default();
//! assert!(store.get().is_none());
//!
//! store.establish(Credential::new(1, "T1")).unwrap();
//! store.set(&CredentialPatch::default().with_phone(Some("555".to_string())));
//!
//! let credential = store.get().unwrap();
//! assert_eq!(credential.access_token, "T1");
//! assert_eq!(credential.phone.as_deref(), Some("555"));
//!
//! store.clear();
//! assert!(store.get().is_none());
//! ```

use crate::auth::credential::{Credential, CredentialPatch};
use crate::auth::error::SessionError;
use crate::auth::session_token::SessionClaims;
use crate::config::{SessionSecret, DEFAULT_SESSION_MAX_AGE_DAYS};
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Capacity of the session event channel.
const EVENT_CAPACITY: usize = 16;

/// Why a session ended without an explicit sign-out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpiryReason {
    /// The session outlived its maximum age.
    MaxAge,
    /// A 401 could not be recovered by refreshing the token. The user must
    /// be sent to `redirect_to` to sign in again.
    RefreshFailed {
        /// The login entry point.
        redirect_to: String,
    },
}

/// A change to the session, observable through [`SessionStore::subscribe`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new credential replaced the session.
    Established {
        /// The signed-in user.
        user_id: u64,
    },
    /// Profile fields of the current credential changed.
    Updated,
    /// The bearer token was replaced by a refreshed one.
    TokenRotated,
    /// The user signed out.
    SignedOut,
    /// The session ended on its own.
    Expired(ExpiryReason),
}

#[derive(Debug)]
struct ActiveSession {
    credential: Credential,
    established_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Inner {
    slot: RwLock<Option<ActiveSession>>,
    max_age: Duration,
    events: broadcast::Sender<SessionEvent>,
}

/// Shared handle to the current [`Credential`].
///
/// Clones share the same slot. Mutations are last-writer-wins.
///
/// # Thread Safety
///
/// `SessionStore` is `Send + Sync`.
#[derive(Clone, Debug)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

// Verify SessionStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionStore>();
    assert_send_sync::<SessionEvent>();
};

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::days(DEFAULT_SESSION_MAX_AGE_DAYS))
    }
}

impl SessionStore {
    /// Creates an empty store whose sessions expire after `max_age`.
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                slot: RwLock::new(None),
                max_age,
                events,
            }),
        }
    }

    /// Returns the maximum session age.
    #[must_use]
    pub fn max_age(&self) -> Duration {
        self.inner.max_age
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Returns the current credential, or `None` if unauthenticated.
    ///
    /// A session past its maximum age is discarded here and reported as
    /// [`ExpiryReason::MaxAge`].
    #[must_use]
    pub fn get(&self) -> Option<Credential> {
        {
            let slot = self.inner.slot.read().unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                None => return None,
                Some(active) if !self.is_past_horizon(active) => {
                    return Some(active.credential.clone());
                }
                Some(_) => {}
            }
        }

        let mut slot = self.inner.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|active| self.is_past_horizon(active)) {
            *slot = None;
            drop(slot);
            tracing::info!("Session reached its maximum age and was discarded");
            self.emit(SessionEvent::Expired(ExpiryReason::MaxAge));
            return None;
        }
        slot.as_ref().map(|active| active.credential.clone())
    }

    /// Returns the bearer token of a valid current credential.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.get()
            .and_then(|credential| credential.bearer_token().map(String::from))
    }

    /// Returns `true` if a credential is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Returns when the current session expires.
    ///
    /// `None` when unauthenticated, or when the maximum age is too large for
    /// the session to ever expire.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let slot = self.inner.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .and_then(|active| horizon(active.established_at, self.inner.max_age))
    }

    /// Replaces the session with `credential` and starts the expiry horizon.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingAccessToken`] if the credential has no token.
    pub fn establish(&self, credential: Credential) -> Result<(), SessionError> {
        self.establish_at(credential, Utc::now())
    }

    fn establish_at(
        &self,
        credential: Credential,
        established_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if !credential.is_valid() {
            return Err(SessionError::MissingAccessToken);
        }

        let user_id = credential.user_id;
        {
            let mut slot = self.inner.slot.write().unwrap_or_else(PoisonError::into_inner);
            *slot = Some(ActiveSession {
                credential,
                established_at,
            });
        }

        tracing::info!(user_id, "Session established");
        self.emit(SessionEvent::Established { user_id });
        Ok(())
    }

    /// Merges `patch` into the current credential without touching the token.
    ///
    /// Returns `false` when there is no session to update.
    pub fn set(&self, patch: &CredentialPatch) -> bool {
        let updated = {
            let mut slot = self.inner.slot.write().unwrap_or_else(PoisonError::into_inner);
            slot.as_mut().map_or(false, |active| {
                active.credential.apply(patch);
                true
            })
        };

        if updated {
            self.emit(SessionEvent::Updated);
        }
        updated
    }

    /// Replaces the bearer token of the current credential.
    ///
    /// The expiry horizon is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingAccessToken`] for an empty token and
    /// [`SessionError::NotAuthenticated`] when there is no session.
    pub fn rotate_token(&self, access_token: impl Into<String>) -> Result<(), SessionError> {
        let access_token = access_token.into();
        if access_token.is_empty() {
            return Err(SessionError::MissingAccessToken);
        }

        {
            let mut slot = self.inner.slot.write().unwrap_or_else(PoisonError::into_inner);
            let active = slot.as_mut().ok_or(SessionError::NotAuthenticated)?;
            active.credential.access_token = access_token;
        }

        self.emit(SessionEvent::TokenRotated);
        Ok(())
    }

    /// Removes the credential (sign-out).
    pub fn clear(&self) {
        if self.take().is_some() {
            tracing::info!("Session cleared");
            self.emit(SessionEvent::SignedOut);
        }
    }

    /// Discards the session after an unrecoverable 401 and tells subscribers
    /// to send the user to `redirect_to`.
    ///
    /// Without a session there is nothing to expire and no event is sent.
    pub fn expire(&self, redirect_to: impl Into<String>) {
        if self.take().is_some() {
            let redirect_to = redirect_to.into();
            tracing::warn!(%redirect_to, "Session expired; re-authentication required");
            self.emit(SessionEvent::Expired(ExpiryReason::RefreshFailed { redirect_to }));
        }
    }

    /// Serializes the current session into a signed session token.
    ///
    /// Returns `Ok(None)` when unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Signing`] if the token cannot be signed.
    pub fn persist(&self, secret: &SessionSecret) -> Result<Option<String>, SessionError> {
        let claims = {
            let slot = self.inner.slot.read().unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some(active) if !self.is_past_horizon(active) => SessionClaims::from_credential(
                    &active.credential,
                    active.established_at,
                    self.inner.max_age,
                ),
                _ => return Ok(None),
            }
        };
        claims.encode(secret).map(Some)
    }

    /// Restores the session from a signed session token.
    ///
    /// The expiry horizon continues from the token's issue time.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidToken`] if verification fails and
    /// [`SessionError::MissingAccessToken`] if the token carries no bearer token.
    pub fn restore(&self, token: &str, secret: &SessionSecret) -> Result<Credential, SessionError> {
        let claims = SessionClaims::decode(token, secret)?;
        let established_at = claims.issued_at();
        let credential = claims
            .into_credential()
            .ok_or(SessionError::MissingAccessToken)?;

        if horizon(established_at, self.inner.max_age).is_some_and(|end| end < Utc::now()) {
            return Err(SessionError::InvalidToken {
                reason: "session is older than the maximum age".to_string(),
            });
        }

        self.establish_at(credential.clone(), established_at)?;
        Ok(credential)
    }

    fn take(&self) -> Option<ActiveSession> {
        self.inner
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn is_past_horizon(&self, active: &ActiveSession) -> bool {
        horizon(active.established_at, self.inner.max_age).is_some_and(|end| Utc::now() >= end)
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }
}

/// End of a session established at `established_at`, or `None` if it lies
/// beyond the representable range and the session never expires.
pub(crate) fn horizon(established_at: DateTime<Utc>, max_age: Duration) -> Option<DateTime<Utc>> {
    established_at.checked_add_signed(max_age)
}
