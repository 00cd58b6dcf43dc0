//! Request and response payloads for the account API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{Credential, CredentialPatch};

/// A user as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Job title.
    #[serde(default)]
    pub title: Option<String>,
    /// Avatar file name.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Public profile slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Saved address.
    #[serde(default)]
    pub address: Option<Address>,
    /// When the account was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the account was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Builds the session credential for this user.
    #[must_use]
    pub fn into_credential(self, access_token: impl Into<String>) -> Credential {
        Credential {
            user_id: self.id,
            name: Some(self.name),
            email: Some(self.email),
            avatar: self.avatar,
            phone: self.phone,
            title: self.title,
            slug: self.slug,
            access_token: access_token.into(),
        }
    }

    /// The patch applied to the session after a profile update.
    #[must_use]
    pub fn profile_patch(&self) -> CredentialPatch {
        CredentialPatch::default()
            .with_name(self.name.clone())
            .with_phone(self.phone.clone())
            .with_title(self.title.clone())
    }
}

/// A user's saved address.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Address ID.
    pub id: u64,
    /// Label for the address.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Map provider place identifier.
    pub place_id: String,
}

/// Email and password submitted to the login endpoint.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginCredentials {
    /// Creates login credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"*****")
            .finish()
    }
}

/// `POST /api/auth/login` response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    /// The authenticated user.
    #[serde(default)]
    pub user: Option<User>,
    /// Bearer token for the API.
    #[serde(default)]
    pub token: Option<String>,
}

/// `POST /api/auth/register` response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RegisterResponse {
    /// The new user.
    #[serde(default)]
    pub user: Option<User>,
    /// Bearer token for the API.
    #[serde(default)]
    pub token: Option<String>,
    /// Welcome message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response carrying only a message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /api/user/profile` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfileResponse {
    /// The signed-in user.
    pub user: User,
}

/// `PUT /api/user/profile` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UpdateProfileResponse {
    /// The updated user.
    pub user: User,
    /// Confirmation message.
    #[serde(default)]
    pub message: Option<String>,
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<User>();
    assert_send_sync::<LoginResponse>();
};
