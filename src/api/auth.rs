//! Sign-in, registration and password reset.
//!
//! The endpoint wrappers ([`login`], [`register`], [`refresh`],
//! [`request_password_reset`], [`reset_password`]) are thin typed calls.
//! The workflows ([`authorize`], [`sign_in`], [`register_and_sign_in`],
//! [`sign_out`]) combine them with the client's [`SessionStore`](crate::SessionStore).

use serde_json::json;

use crate::api::types::{LoginCredentials, LoginResponse, MessageResponse, RegisterResponse};
use crate::auth::{AuthError, Credential, ResetLink};
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::validation::{ForgotPasswordForm, PasswordResetForm, RegisterForm, Validate};

/// `POST /api/auth/login`.
pub const LOGIN_PATH: &str = "/api/auth/login";
/// `POST /api/auth/register`.
pub const REGISTER_PATH: &str = "/api/auth/register";
/// `POST /api/auth/password/email`.
pub const PASSWORD_EMAIL_PATH: &str = "/api/auth/password/email";
/// `POST /api/auth/password/reset`.
pub const PASSWORD_RESET_PATH: &str = "/api/auth/password/reset";

const LOGIN_FAILED: &str = "Login failed";

/// Posts credentials to the login endpoint.
///
/// # Errors
///
/// Returns [`HttpError`] if the request fails or the body cannot be decoded.
pub async fn login(
    client: &HttpClient,
    credentials: &LoginCredentials,
) -> Result<LoginResponse, HttpError> {
    let request = HttpRequest::builder(HttpMethod::Post, LOGIN_PATH)
        .json(json!({
            "email": credentials.email,
            "password": credentials.password,
        }))
        .build()?;

    let response = client.request(request).await?;
    Ok(response.json()?)
}

/// Creates an account.
///
/// # Errors
///
/// Returns [`HttpError`] if the request fails or the body cannot be decoded.
/// A 422 carries the per-field messages in
/// [`HttpResponseError::errors`](crate::clients::HttpResponseError).
pub async fn register(
    client: &HttpClient,
    form: &RegisterForm,
) -> Result<RegisterResponse, HttpError> {
    let request = HttpRequest::builder(HttpMethod::Post, REGISTER_PATH)
        .json(json!({
            "name": form.name,
            "email": form.email,
            "password": form.password,
            "password_confirmation": form.password_confirmation,
        }))
        .build()?;

    let response = client.request(request).await?;
    Ok(response.json()?)
}

/// Exchanges the current token for a new one and stores it.
///
/// # Errors
///
/// See [`HttpClient::refresh_token`].
pub async fn refresh(client: &HttpClient) -> Result<String, HttpError> {
    client.refresh_token().await
}

/// Asks the API to email a password reset link.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] for a malformed email, otherwise the
/// wrapped [`HttpError`].
pub async fn request_password_reset(
    client: &HttpClient,
    form: &ForgotPasswordForm,
) -> Result<MessageResponse, AuthError> {
    form.validate().map_err(AuthError::Validation)?;

    let request = HttpRequest::builder(HttpMethod::Post, PASSWORD_EMAIL_PATH)
        .json(json!({ "email": form.email }))
        .build()
        .map_err(HttpError::from)?;

    let response = client.request(request).await?;
    Ok(response.json().map_err(HttpError::from)?)
}

/// Sets a new password using the token and email from a reset link.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] if the passwords are too short or do
/// not match, otherwise the wrapped [`HttpError`].
pub async fn reset_password(
    client: &HttpClient,
    link: &ResetLink,
    form: &PasswordResetForm,
) -> Result<MessageResponse, AuthError> {
    form.validate().map_err(AuthError::Validation)?;

    let request = HttpRequest::builder(HttpMethod::Post, PASSWORD_RESET_PATH)
        .json(json!({
            "token": link.token,
            "email": link.email,
            "password": form.password,
            "password_confirmation": form.password_confirmation,
        }))
        .build()
        .map_err(HttpError::from)?;

    let response = client.request(request).await?;
    Ok(response.json().map_err(HttpError::from)?)
}

/// Verifies credentials against the API and returns the resulting credential.
///
/// The session store is not touched; see [`sign_in`].
///
/// # Errors
///
/// - [`AuthError::MissingCredentials`] if email or password is empty
/// - [`AuthError::LoginRejected`] with the server's message if the API
///   refuses the login or omits the user or token
/// - [`AuthError::HttpError`] for transport and decoding failures
pub async fn authorize(
    client: &HttpClient,
    credentials: &LoginCredentials,
) -> Result<Credential, AuthError> {
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let response = login(client, credentials).await.map_err(|error| match error {
        HttpError::Response(rejection) | HttpError::SessionExpired { rejection, .. } => {
            AuthError::LoginRejected {
                message: rejection.message,
            }
        }
        other => AuthError::HttpError(other),
    })?;

    match response {
        LoginResponse {
            user: Some(user),
            token: Some(token),
        } if !token.is_empty() => Ok(user.into_credential(token)),
        _ => Err(AuthError::LoginRejected {
            message: LOGIN_FAILED.to_string(),
        }),
    }
}

/// Logs in and establishes the session.
///
/// # Errors
///
/// Returns the [`authorize`] errors, or [`AuthError::Session`] if the
/// credential cannot be stored.
pub async fn sign_in(
    client: &HttpClient,
    credentials: &LoginCredentials,
) -> Result<Credential, AuthError> {
    let credential = authorize(client, credentials).await?;
    client.session().establish(credential.clone())?;
    tracing::info!(user_id = credential.user_id, "Signed in");
    Ok(credential)
}

/// Result of a successful registration followed by sign-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// The established credential.
    pub credential: Credential,
    /// The server's welcome message.
    pub message: Option<String>,
}

/// Registers an account, then signs in with the same email and password.
///
/// # Errors
///
/// - [`AuthError::Validation`] if the form fails local validation
/// - [`AuthError::HttpError`] if registration is refused (422 field errors
///   are available through [`AuthError::field_errors`])
/// - Any [`sign_in`] error if the follow-up login fails
pub async fn register_and_sign_in(
    client: &HttpClient,
    form: &RegisterForm,
) -> Result<Registration, AuthError> {
    form.validate().map_err(AuthError::Validation)?;

    let registered = register(client, form).await?;
    tracing::debug!("Account registered");

    let credentials = LoginCredentials::new(form.email.clone(), form.password.clone());
    let credential = sign_in(client, &credentials).await?;

    Ok(Registration {
        credential,
        message: registered.message,
    })
}

/// Ends the session.
pub fn sign_out(client: &HttpClient) {
    client.session().clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, SessionSecret};
    use crate::SessionStore;

    fn client() -> HttpClient {
        let config = ClientConfig::builder()
            .session_secret(SessionSecret::new("secret").unwrap())
            .build()
            .unwrap();
        HttpClient::new(&config, SessionStore::default()).unwrap()
    }

    #[tokio::test]
    async fn test_authorize_requires_email_and_password() {
        let client = client();

        let result = authorize(&client, &LoginCredentials::new("", "secret1")).await;
        assert!(matches!(result, Err(AuthError::MissingCredentials)));

        let result = authorize(&client, &LoginCredentials::new("a@b.com", "")).await;
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_register_validates_before_sending() {
        let form = RegisterForm {
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            password_confirmation: "other".to_string(),
        };

        let error = register_and_sign_in(&client(), &form).await.unwrap_err();
        assert!(error
            .field_errors()
            .unwrap()
            .first("password_confirmation")
            .is_some());
    }

    #[test]
    fn test_sign_out_clears_session() {
        let client = client();
        client
            .session()
            .establish(Credential::new(1, "T1"))
            .unwrap();

        sign_out(&client);
        assert!(client.session().get().is_none());
    }
}
