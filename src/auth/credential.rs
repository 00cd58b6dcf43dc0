//! The in-memory credential of the signed-in user.
//!
//! A [`Credential`] pairs the user's profile fields with the bearer token
//! that authenticates API calls. [`CredentialPatch`] describes a partial
//! update applied after profile edits or avatar uploads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The authenticated user plus their bearer token.
///
/// A credential is only usable when [`access_token`](Self::access_token) is
/// non-empty; see [`Credential::is_valid`].
///
/// # Security
///
/// The `Debug` implementation masks the access token.
///
/// # Example
///
/// ```rust
/// use account_api::Credential;
///
/// let credential = Credential::new(1, "T1")
///     .with_name("A")
///     .with_email("a@b.com");
///
/// assert!(credential.is_valid());
/// assert_eq!(credential.bearer_token(), Some("T1"));
/// assert!(!format!("{credential:?}").contains("T1"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The user's numeric ID.
    pub user_id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Avatar file name, resolved against the API's storage by the caller.
    pub avatar: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Job title.
    pub title: Option<String>,
    /// Public profile slug.
    pub slug: Option<String>,
    /// The bearer token used for API calls.
    pub access_token: String,
}

impl Credential {
    /// Creates a credential with only the identity and token set.
    #[must_use]
    pub fn new(user_id: u64, access_token: impl Into<String>) -> Self {
        Self {
            user_id,
            name: None,
            email: None,
            avatar: None,
            phone: None,
            title: None,
            slug: None,
            access_token: access_token.into(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the job title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns `true` if the credential carries a non-empty access token.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Returns the bearer token, or `None` if the credential is invalid.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        if self.is_valid() {
            Some(&self.access_token)
        } else {
            None
        }
    }

    /// Merges a patch into this credential. The access token is never touched.
    pub fn apply(&mut self, patch: &CredentialPatch) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(email) = &patch.email {
            self.email = Some(email.clone());
        }
        if let Some(avatar) = &patch.avatar {
            self.avatar.clone_from(avatar);
        }
        if let Some(phone) = &patch.phone {
            self.phone.clone_from(phone);
        }
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(slug) = &patch.slug {
            self.slug.clone_from(slug);
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("user_id", &self.user_id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("avatar", &self.avatar)
            .field("phone", &self.phone)
            .field("title", &self.title)
            .field("slug", &self.slug)
            .field("access_token", &"*****")
            .finish()
    }
}

/// A partial update to a [`Credential`].
///
/// Outer `None` leaves a field unchanged. For the nullable profile fields,
/// `Some(None)` clears the value.
///
/// # Example
///
/// ```rust
/// use account_api::{Credential, CredentialPatch};
///
/// let mut credential = Credential::new(1, "T1").with_phone("111");
/// credential.apply(&CredentialPatch::default().with_phone(Some("555".to_string())));
///
/// assert_eq!(credential.phone.as_deref(), Some("555"));
/// assert_eq!(credential.access_token, "T1");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialPatch {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New avatar file name, or `Some(None)` to clear.
    pub avatar: Option<Option<String>>,
    /// New phone number, or `Some(None)` to clear.
    pub phone: Option<Option<String>>,
    /// New job title, or `Some(None)` to clear.
    pub title: Option<Option<String>>,
    /// New slug, or `Some(None)` to clear.
    pub slug: Option<Option<String>>,
}

impl CredentialPatch {
    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets or clears the avatar.
    #[must_use]
    pub fn with_avatar(mut self, avatar: Option<String>) -> Self {
        self.avatar = Some(avatar);
        self
    }

    /// Sets or clears the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Sets or clears the job title.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = Some(title);
        self
    }

    /// Returns `true` if applying this patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.phone.is_none()
            && self.title.is_none()
            && self.slug.is_none()
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credential>();
    assert_send_sync::<CredentialPatch>();
};
