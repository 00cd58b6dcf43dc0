//! Profile and avatar of the signed-in user.
//!
//! Both update workflows write the accepted change back into the session so
//! the credential stays in step with the server.

use serde_json::json;

use crate::api::types::{MessageResponse, ProfileResponse, UpdateProfileResponse, User};
use crate::auth::{AuthError, CredentialPatch};
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, MultipartFile};
use crate::validation::{ProfileForm, Validate};

/// `GET` and `PUT /api/user/profile`.
pub const PROFILE_PATH: &str = "/api/user/profile";
/// `POST /api/user/update-avatar`.
pub const AVATAR_PATH: &str = "/api/user/update-avatar";

/// Largest accepted avatar file, 4 MiB.
pub const MAX_AVATAR_BYTES: usize = 4 * 1024 * 1024;

/// An image selected for upload as the user's avatar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarFile {
    /// Original file name.
    pub file_name: String,
    /// MIME type (e.g., `image/png`).
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl AvatarFile {
    /// Creates an avatar file.
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Fetches the signed-in user's profile.
///
/// # Errors
///
/// Returns [`HttpError`] if the request fails or the body has no `user`.
pub async fn get_profile(client: &HttpClient) -> Result<User, HttpError> {
    let request = HttpRequest::builder(HttpMethod::Get, PROFILE_PATH).build()?;
    let response = client.request(request).await?;
    let ProfileResponse { user } = response.json()?;
    Ok(user)
}

/// Saves name, phone and title, then copies the accepted values into the
/// session.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] if the form fails local validation,
/// otherwise the wrapped [`HttpError`]. The session is only updated after a
/// successful response.
pub async fn update_profile(
    client: &HttpClient,
    form: &ProfileForm,
) -> Result<UpdateProfileResponse, AuthError> {
    form.validate().map_err(AuthError::Validation)?;

    let request = HttpRequest::builder(HttpMethod::Put, PROFILE_PATH)
        .json(json!({
            "name": form.name,
            "phone": form.phone,
            "title": form.title,
        }))
        .build()
        .map_err(HttpError::from)?;

    let response = client.request(request).await?;
    let updated: UpdateProfileResponse = response.json().map_err(HttpError::from)?;

    if !client.session().set(&updated.user.profile_patch()) {
        tracing::debug!("Profile saved without an active session");
    }
    Ok(updated)
}

/// Uploads a new avatar, then records its file name in the session.
///
/// # Errors
///
/// Returns [`AuthError::AvatarTooLarge`] without sending anything if the
/// file exceeds [`MAX_AVATAR_BYTES`], otherwise the wrapped [`HttpError`].
pub async fn update_avatar(
    client: &HttpClient,
    file: AvatarFile,
) -> Result<MessageResponse, AuthError> {
    let size = file.bytes.len();
    if size > MAX_AVATAR_BYTES {
        return Err(AuthError::AvatarTooLarge {
            size,
            limit: MAX_AVATAR_BYTES,
        });
    }

    let AvatarFile {
        file_name,
        mime_type,
        bytes,
    } = file;

    let request = HttpRequest::builder(HttpMethod::Post, AVATAR_PATH)
        .file(MultipartFile::new("avatar", file_name.clone(), mime_type, bytes))
        .build()
        .map_err(HttpError::from)?;

    let response = client.request(request).await?;
    let message: MessageResponse = response.json().map_err(HttpError::from)?;

    client
        .session()
        .set(&CredentialPatch::default().with_avatar(Some(file_name)));
    Ok(message)
}
