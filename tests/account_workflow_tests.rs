//! Integration tests for the account workflows.
//!
//! These tests cover sign-in, registration, profile and avatar updates,
//! password reset, and session persistence against a mock API.

use account_api::api::{
    get_profile, register_and_sign_in, request_password_reset, reset_password, sign_in, sign_out,
    update_avatar, update_profile, AvatarFile, LoginCredentials, MAX_AVATAR_BYTES,
};
use account_api::validation::{ForgotPasswordForm, PasswordResetForm, ProfileForm, RegisterForm};
use account_api::{
    Access, ApiBaseUrl, AuthError, ClientConfig, HttpClient, ResetLink, RouteGuard,
    SessionEvent, SessionSecret, SessionStore,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .base_url(ApiBaseUrl::new(server.uri()).unwrap())
        .session_secret(SessionSecret::new("test-secret").unwrap())
        .build()
        .unwrap()
}

fn create_client(server: &MockServer) -> (HttpClient, SessionStore) {
    let store = SessionStore::default();
    let client = HttpClient::new(&create_config(server), store.clone()).unwrap();
    (client, store)
}

fn user_json(phone: Option<&str>) -> serde_json::Value {
    json!({
        "id": 1,
        "name": "A",
        "email": "a@b.com",
        "phone": phone,
        "title": "Engineer",
        "avatar": null,
        "slug": "a"
    })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "user": user_json(None),
                "token": "T1"
            })),
        )
        .mount(server)
        .await;
}

fn credentials() -> LoginCredentials {
    LoginCredentials::new("a@b.com", "secret1")
}

// ============================================================================
// Sign-in
// ============================================================================

#[tokio::test]
async fn test_sign_in_establishes_session_and_authenticates_requests() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/user/profile"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": user_json(None)})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = create_client(&server);
    let mut events = store.subscribe();

    let credential = sign_in(&client, &credentials()).await.unwrap();
    assert_eq!(credential.access_token, "T1");
    assert_eq!(credential.user_id, 1);
    assert_eq!(credential.slug.as_deref(), Some("a"));

    let stored = store.get().unwrap();
    assert_eq!(stored.access_token, "T1");
    assert_eq!(stored.email.as_deref(), Some("a@b.com"));
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::Established { user_id: 1 }
    );

    let user = get_profile(&client).await.unwrap();
    assert_eq!(user.name, "A");
}

#[tokio::test]
async fn test_rejected_login_reports_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let (client, store) = create_client(&server);
    let error = sign_in(&client, &credentials()).await.unwrap_err();

    assert!(matches!(
        error,
        AuthError::LoginRejected { ref message } if message == "Invalid credentials"
    ));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_wrong_password_without_session_emits_no_event() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthenticated."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = create_client(&server);
    let mut events = store.subscribe();
    let error = sign_in(&client, &credentials()).await.unwrap_err();

    assert!(matches!(
        error,
        AuthError::LoginRejected { ref message } if message == "Invalid credentials"
    ));
    assert!(events.try_recv().is_err());
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_login_without_token_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": user_json(None)})))
        .mount(&server)
        .await;

    let (client, store) = create_client(&server);
    let error = sign_in(&client, &credentials()).await.unwrap_err();

    assert!(matches!(error, AuthError::LoginRejected { .. }));
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_sign_out_clears_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let (client, store) = create_client(&server);
    assert_ok!(sign_in(&client, &credentials()).await);

    sign_out(&client);
    assert!(store.get().is_none());

    let guard = RouteGuard::new(store, "/login");
    assert_eq!(
        guard.check("/dashboard"),
        Access::Redirect("/login?callbackUrl=%2Fdashboard".to_string())
    );
}

// ============================================================================
// Registration
// ============================================================================

fn register_form() -> RegisterForm {
    RegisterForm {
        name: "Ada".to_string(),
        email: "a@b.com".to_string(),
        password: "secret1".to_string(),
        password_confirmation: "secret1".to_string(),
    }
}

#[tokio::test]
async fn test_register_then_sign_in() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "name": "Ada",
            "email": "a@b.com",
            "password": "secret1",
            "password_confirmation": "secret1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "user": user_json(None),
            "token": "REG",
            "message": "Welcome!"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = create_client(&server);
    let registration = register_and_sign_in(&client, &register_form()).await.unwrap();

    assert_eq!(registration.message.as_deref(), Some("Welcome!"));
    // The session uses the login token, not the registration one
    assert_eq!(store.bearer_token().as_deref(), Some("T1"));
}

#[tokio::test]
async fn test_register_exposes_server_field_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The email has already been taken.",
            "errors": {"email": ["The email has already been taken."]}
        })))
        .mount(&server)
        .await;

    let (client, store) = create_client(&server);
    let error = register_and_sign_in(&client, &register_form())
        .await
        .unwrap_err();

    assert_eq!(
        error.field_errors().unwrap().first("email"),
        Some("The email has already been taken.")
    );
    assert!(!store.is_authenticated());
}

// ============================================================================
// Profile and avatar
// ============================================================================

#[tokio::test]
async fn test_update_profile_patches_session_and_keeps_token() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/user/profile"))
        .and(header("Authorization", "Bearer T1"))
        .and(body_json(json!({"name": "Ada", "phone": "555", "title": "Engineer"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json(Some("555")),
            "message": "Profile updated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = create_client(&server);
    sign_in(&client, &credentials()).await.unwrap();
    let mut events = store.subscribe();

    let form = ProfileForm {
        name: "Ada".to_string(),
        phone: Some("555".to_string()),
        title: "Engineer".to_string(),
    };
    let updated = update_profile(&client, &form).await.unwrap();
    assert_eq!(updated.message.as_deref(), Some("Profile updated"));

    // The session takes the values the server accepted
    let credential = store.get().unwrap();
    assert_eq!(credential.name.as_deref(), Some("A"));
    assert_eq!(credential.phone.as_deref(), Some("555"));
    assert_eq!(credential.access_token, "T1");
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Updated);
}

#[tokio::test]
async fn test_invalid_profile_is_not_sent() {
    let server = MockServer::start().await;

    Mock::given(path("/api/user/profile"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _store) = create_client(&server);
    let form = ProfileForm {
        name: "Ada".to_string(),
        phone: Some("call me".to_string()),
        title: "Engineer".to_string(),
    };

    let error = update_profile(&client, &form).await.unwrap_err();
    assert_eq!(
        error.field_errors().unwrap().first("phone"),
        Some("Invalid phone number format")
    );
}

#[tokio::test]
async fn test_update_avatar_records_file_name() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/user/update-avatar"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Avatar updated"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = create_client(&server);
    sign_in(&client, &credentials()).await.unwrap();

    let file = AvatarFile::new("me.png", "image/png", vec![0; 64]);
    let response = update_avatar(&client, file).await.unwrap();

    assert_eq!(response.message.as_deref(), Some("Avatar updated"));
    let credential = store.get().unwrap();
    assert_eq!(credential.avatar.as_deref(), Some("me.png"));
    assert_eq!(credential.access_token, "T1");
}

#[tokio::test]
async fn test_avatar_at_size_limit_is_uploaded() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/user/update-avatar"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = create_client(&server);
    sign_in(&client, &credentials()).await.unwrap();

    let file = AvatarFile::new("limit.png", "image/png", vec![7; MAX_AVATAR_BYTES]);
    assert_ok!(update_avatar(&client, file).await);

    let requests = server.received_requests().await.unwrap();
    let upload = requests
        .iter()
        .find(|r| r.url.path() == "/api/user/update-avatar")
        .unwrap();
    assert!(upload.body.len() > MAX_AVATAR_BYTES);
    assert_eq!(store.get().unwrap().avatar.as_deref(), Some("limit.png"));
}

#[tokio::test]
async fn test_oversized_avatar_never_reaches_the_api() {
    let server = MockServer::start().await;

    Mock::given(path("/api/user/update-avatar"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _store) = create_client(&server);
    let file = AvatarFile::new("big.png", "image/png", vec![0; MAX_AVATAR_BYTES + 1]);

    let error = assert_err!(update_avatar(&client, file).await);
    assert!(matches!(error, AuthError::AvatarTooLarge { .. }));
}

// ============================================================================
// Password reset
// ============================================================================

#[tokio::test]
async fn test_request_password_reset() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/password/email"))
        .and(body_json(json!({"email": "a@b.com"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Reset link sent"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = create_client(&server);
    let form = ForgotPasswordForm {
        email: "a@b.com".to_string(),
    };

    let response = request_password_reset(&client, &form).await.unwrap();
    assert_eq!(response.message.as_deref(), Some("Reset link sent"));
}

#[tokio::test]
async fn test_reset_password_sends_link_token_and_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/password/reset"))
        .and(body_json(json!({
            "token": "abc123",
            "email": "a@b.com",
            "password": "newpass",
            "password_confirmation": "newpass"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = create_client(&server);
    let link = ResetLink::from_url("/reset-password?token=abc123&email=a%40b.com").unwrap();
    let form = PasswordResetForm {
        password: "newpass".to_string(),
        password_confirmation: "newpass".to_string(),
    };

    let response = reset_password(&client, &link, &form).await.unwrap();
    assert!(response.message.is_none());
}

#[test]
fn test_reset_link_without_email_is_invalid() {
    let result = ResetLink::from_url("/reset-password?token=abc123");
    assert!(matches!(result, Err(AuthError::InvalidResetLink { .. })));
}

// ============================================================================
// Session persistence
// ============================================================================

#[tokio::test]
async fn test_session_token_survives_reload() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let config = create_config(&server);
    let store = SessionStore::new(config.session_max_age());
    let client = HttpClient::new(&config, store.clone()).unwrap();
    sign_in(&client, &credentials()).await.unwrap();

    let token = store
        .persist(config.session_secret())
        .unwrap()
        .expect("signed-in store yields a session token");

    // A fresh store, as after a page load
    let reloaded = SessionStore::new(config.session_max_age());
    let credential = reloaded.restore(&token, config.session_secret()).unwrap();

    assert_eq!(credential.access_token, "T1");
    assert_eq!(reloaded.get(), store.get());
}
