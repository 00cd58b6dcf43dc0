//! Password reset links.
//!
//! The reset email points at `/reset-password?token=...&email=...`. Both
//! parameters are required to submit a new password.

use crate::auth::error::AuthError;

/// The token and email extracted from a password reset link.
///
/// # Example
///
/// ```rust
/// use account_api::auth::ResetLink;
///
/// let link = ResetLink::from_url(
///     "https://app.example.com/reset-password?token=abc123&email=a%40b.com",
/// ).unwrap();
///
/// assert_eq!(link.token, "abc123");
/// assert_eq!(link.email, "a@b.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetLink {
    /// The reset token issued by the API.
    pub token: String,
    /// The account email the token belongs to.
    pub email: String,
}

impl ResetLink {
    /// Parses a reset link URL (absolute or path-only).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidResetLink`] if `token` or `email` is
    /// missing or empty.
    pub fn from_url(url: &str) -> Result<Self, AuthError> {
        let query = url
            .split_once('?')
            .map(|(_, query)| query.split('#').next().unwrap_or_default())
            .unwrap_or_default();

        let mut token = None;
        let mut email = None;
        for pair in query.split('&') {
            let mut parts = pair.splitn(2, '=');
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            let value = decode_component(value);
            match key {
                "token" => token = Some(value),
                "email" => email = Some(value),
                _ => {}
            }
        }

        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::InvalidResetLink {
                reason: "missing token".to_string(),
            })?;
        let email = email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AuthError::InvalidResetLink {
                reason: "missing email".to_string(),
            })?;

        Ok(Self { token, email })
    }
}

fn decode_component(value: &str) -> String {
    let value = value.replace('+', " ");
    urlencoding::decode(&value).map_or(value.clone(), |decoded| decoded.into_owned())
}
