use bookswipe::auth::SessionAdapter;
use bookswipe::backend::BackendClient;
use bookswipe::config::IdentityConfig;
use bookswipe::domain::{AuthError, IdentityProvider};
use bookswipe::models::FederatedCredential;
use bookswipe::modules::integrations::IdentityClient;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";

// Helper to build an adapter whose backend and identity provider both live on the mock server
fn adapter_for(server: &MockServer, with_identity: bool) -> SessionAdapter {
    let timeout = Duration::from_secs(5);
    let backend = BackendClient::new(&server.uri(), timeout).expect("valid base url");

    let identity = IdentityConfig {
        api_key: with_identity.then(|| API_KEY.to_string()),
        auth_domain: Some("bookswipe.example.com".to_string()),
        project_id: Some("bookswipe-test".to_string()),
        endpoint: server.uri(),
    };
    let identity = IdentityClient::from_config(&identity, timeout).expect("identity client");

    SessionAdapter::new(identity, backend)
}

fn provider_error(code: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(serde_json::json!({
        "error": { "code": 400, "message": code, "errors": [] }
    }))
}

#[tokio::test]
async fn test_demo_sign_in() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/demo-login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_id": "demo_user",
            "token": "demo_token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = adapter_for(&server, false)
        .sign_in_as_demo_user()
        .await
        .expect("demo session");

    assert_eq!(session.user_id, "demo_user");
    assert_eq!(session.token, "demo_token");
    assert_eq!(session.display_name, "Demo User");
    assert!(session.photo_url.is_none());
}

#[tokio::test]
async fn test_demo_sign_in_failure_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/demo-login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = adapter_for(&server, false)
        .sign_in_as_demo_user()
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Demo login failed. Is the backend running?");
}

#[tokio::test]
async fn test_password_sign_in_uses_email_as_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts:signInWithPassword"))
        .and(query_param("key", API_KEY))
        .and(body_partial_json(serde_json::json!({
            "email": "reader@example.com",
            "password": "correct horse",
            "returnSecureToken": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "uid-123",
            "idToken": "id-token-abc",
            "email": "reader@example.com",
            "displayName": "Reader",
            "refreshToken": "refresh",
            "expiresIn": "3600"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = adapter_for(&server, true)
        .sign_in_with_password("reader@example.com", "correct horse")
        .await
        .expect("session");

    assert_eq!(session.user_id, "uid-123");
    assert_eq!(session.token, "id-token-abc");
    assert_eq!(session.display_name, "reader@example.com");
}

#[tokio::test]
async fn test_provider_errors_become_readable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts:signInWithPassword"))
        .respond_with(provider_error("INVALID_LOGIN_CREDENTIALS"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/accounts:signUp"))
        .respond_with(provider_error("EMAIL_EXISTS"))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server, true);

    let err = adapter
        .sign_in_with_password("reader@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AuthError::InvalidCredentials("Invalid email or password.".to_string())
    );

    let err = adapter
        .sign_up_with_password("reader@example.com", "whatever1")
        .await
        .unwrap_err();
    assert_eq!(err.message(), "An account already exists for this email.");
}

#[tokio::test]
async fn test_federated_sign_in_carries_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts:signInWithIdp"))
        .and(query_param("key", API_KEY))
        .and(body_partial_json(serde_json::json!({
            "postBody": "id_token=google-id-token&providerId=google.com",
            "requestUri": "https://bookswipe.example.com/__/auth/handler"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "uid-g",
            "idToken": "id-token-g",
            "email": "ada@example.com",
            "displayName": "Ada Lovelace",
            "photoUrl": "https://photos.example.com/ada.png",
            "providerId": "google.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = adapter_for(&server, true)
        .sign_in_with_federated_provider(&FederatedCredential::google("google-id-token"))
        .await
        .expect("session");

    assert_eq!(session.display_name, "Ada Lovelace");
    assert_eq!(
        session.photo_url.as_deref(),
        Some("https://photos.example.com/ada.png")
    );
}

#[tokio::test]
async fn test_unconfigured_provider_only_allows_demo() {
    let server = MockServer::start().await;
    let adapter = adapter_for(&server, false);

    let err = adapter
        .sign_in_with_password("reader@example.com", "secret")
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::NotConfigured);

    let err = adapter
        .sign_in_with_federated_provider(&FederatedCredential::google("t"))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::NotConfigured);

    let requests = server.received_requests().await.expect("request recording");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_unreachable_provider_messages() {
    let timeout = Duration::from_secs(2);
    let backend = BackendClient::new("http://127.0.0.1:1", timeout).expect("valid base url");
    let identity = IdentityConfig {
        api_key: Some(API_KEY.to_string()),
        auth_domain: None,
        project_id: None,
        endpoint: "http://127.0.0.1:1".to_string(),
    };
    let identity = IdentityClient::from_config(&identity, timeout).expect("identity client");
    let adapter = SessionAdapter::new(identity, backend);

    let err = adapter
        .sign_in_with_federated_provider(&FederatedCredential::google("google-id-token"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Google Login failed. Try again.");

    let err = adapter
        .sign_in_with_password("reader@example.com", "secret")
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Could not reach the sign-in service. Try again.");
}
