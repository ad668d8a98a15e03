//! Session and refresh-and-retry behavior against the in-memory backend.

mod common;

use std::sync::Arc;

use emr_client::session::SessionStatus;
use emr_client::{ApiError, ApiRequest, LoginOutcome, MemoryStorage, Method, ResourceKind, SessionStorage};

use common::{client, signed_in, FakeBackend, PASSWORD};

#[tokio::test]
async fn test_login_authenticates_and_sends_bearer() {
    let backend = FakeBackend::new();
    let storage = Arc::new(MemoryStorage::new());
    let client = client(&backend, &storage);
    assert_eq!(client.session().status(), SessionStatus::Anonymous);

    let outcome = client
        .session()
        .login("dr.budi@rs-sehat.id", PASSWORD)
        .await
        .expect("login should reach the server");
    assert_eq!(outcome, LoginOutcome::Authenticated);
    assert!(client.session().is_authenticated());
    assert_eq!(client.session().user().map(|u| u.full_name()), Some("Budi Santoso".to_string()));

    // Login itself goes out without a bearer
    assert_eq!(backend.calls()[0].bearer, None);

    client.send(ApiRequest::get("/pasien")).await.expect("list patients");
    assert_eq!(backend.last_call().bearer.as_deref(), Some("access-1"));

    let persisted = storage.load().expect("session persisted");
    assert_eq!(persisted.refresh_token.as_deref(), Some("refresh-1"));
    assert!(persisted.is_authenticated);
}

#[tokio::test]
async fn test_rejected_login_stays_anonymous() {
    let backend = FakeBackend::new();
    let storage = Arc::new(MemoryStorage::new());
    let client = client(&backend, &storage);

    let outcome = client.session().login("dr.budi@rs-sehat.id", "salah-sandi").await.expect("reached server");
    assert_eq!(
        outcome,
        LoginOutcome::Rejected { message: "Email atau kata sandi salah".to_string() }
    );
    assert!(!client.session().is_authenticated());
    assert!(storage.raw().is_none());
    // 401 from an auth endpoint never triggers a refresh
    assert_eq!(backend.refresh_calls(), 0);
}

#[tokio::test]
async fn test_rejected_login_without_message_uses_fallback() {
    let backend = FakeBackend::new();
    let storage = Arc::new(MemoryStorage::new());
    let client = client(&backend, &storage);

    let outcome = client.session().login("server@rs-sehat.id", "apa-saja").await.expect("reached server");
    assert_eq!(outcome, LoginOutcome::Rejected { message: "Login failed".to_string() });
}

#[tokio::test]
async fn test_401_refreshes_once_and_retries() {
    let backend = FakeBackend::new();
    let (client, storage) = signed_in(&backend, Some("refresh-1"));
    backend.expire_token();

    let body = client.send(ApiRequest::get("/pasien")).await.expect("retried request succeeds");
    assert_eq!(body["total"], 21);

    assert_eq!(backend.refresh_calls(), 1);
    assert_eq!(backend.count(Method::Get, "/pasien"), 2);
    assert_eq!(backend.last_call().bearer.as_deref(), Some("access-2"));
    assert_eq!(client.session().access_token().as_deref(), Some("access-2"));

    // Refresh response carried no refresh token, so the old one is kept
    let persisted = storage.load().expect("still persisted");
    assert_eq!(persisted.access_token.as_deref(), Some("access-2"));
    assert_eq!(persisted.refresh_token.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_failed_refresh_logs_out_and_propagates_rejection() {
    let backend = FakeBackend::new();
    let (client, storage) = signed_in(&backend, Some("refresh-1"));
    backend.expire_token();
    backend.fail_refresh();

    let err = client.send(ApiRequest::get("/pasien")).await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized { message: Some("Token tidak valid".to_string()) });

    assert_eq!(backend.refresh_calls(), 1);
    assert_eq!(backend.count(Method::Get, "/pasien"), 1);
    assert_eq!(backend.count(Method::Post, "/otentikasi/keluar"), 1);
    assert_eq!(client.session().status(), SessionStatus::Anonymous);
    assert!(storage.raw().is_none());
}

#[tokio::test]
async fn test_retry_happens_at_most_once() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));
    backend.expire_token();
    backend.reject_after_refresh();

    let err = client.send(ApiRequest::get("/pasien")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(backend.refresh_calls(), 1);
    assert_eq!(backend.count(Method::Get, "/pasien"), 2);
    // The refresh itself succeeded, so the session survives
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_401_without_refresh_token_signs_out_and_propagates() {
    let backend = FakeBackend::new();
    let (client, storage) = signed_in(&backend, None);
    backend.expire_token();

    let err = client.send(ApiRequest::get("/pasien")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(backend.refresh_calls(), 0);
    assert_eq!(backend.count(Method::Get, "/pasien"), 1);
    assert_eq!(backend.count(Method::Post, "/otentikasi/keluar"), 1);
    assert_eq!(client.session().status(), SessionStatus::Anonymous);
    assert!(storage.raw().is_none());

    // Later calls go out without a bearer and are not retried
    let err = client.send(ApiRequest::get("/pasien")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(backend.last_call().bearer, None);
    assert_eq!(backend.count(Method::Post, "/otentikasi/keluar"), 1);
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));
    backend.expire_token();

    let (a, b, c) = tokio::join!(
        client.send(ApiRequest::get("/pasien")),
        client.send(ApiRequest::get("/pasien").query("page", 2)),
        client.send(ApiRequest::get("/pasien/p-1")),
    );
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(backend.refresh_calls(), 1);

    // Every retry used the single refreshed token
    let retried: Vec<_> = backend
        .calls()
        .into_iter()
        .filter(|call| call.bearer.as_deref() == Some("access-2"))
        .collect();
    assert_eq!(retried.len(), 3);
}

#[tokio::test]
async fn test_logout_clears_even_when_server_unreachable() {
    let backend = FakeBackend::new();
    let (client, storage) = signed_in(&backend, Some("refresh-1"));
    backend.go_offline_for_logout();

    client.session().logout().await;

    assert!(!client.session().is_authenticated());
    assert!(client.session().user().is_none());
    assert!(storage.raw().is_none());
    assert_eq!(backend.count(Method::Post, "/otentikasi/keluar"), 1);
}

#[tokio::test]
async fn test_refresh_without_token_logs_out_without_calling_server() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, None);

    assert!(!client.session().refresh_access_token().await);
    assert_eq!(backend.refresh_calls(), 0);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_subscribers_see_every_transition() {
    let backend = FakeBackend::new();
    let storage = Arc::new(MemoryStorage::new());
    let client = client(&backend, &storage);
    let mut rx = client.session().subscribe();

    client.session().login("dr.budi@rs-sehat.id", PASSWORD).await.expect("login");
    assert!(rx.has_changed().expect("sender alive"));
    assert!(rx.borrow_and_update().is_authenticated);

    client.session().logout().await;
    assert!(rx.has_changed().expect("sender alive"));
    assert!(!rx.borrow_and_update().is_authenticated);
}

#[tokio::test]
async fn test_permission_predicates_follow_session() {
    let backend = FakeBackend::new();
    let (client, _storage) = signed_in(&backend, Some("refresh-1"));
    let session = client.session();

    assert!(session.has_role("doctor"));
    assert!(!session.is_admin());
    assert!(session.has_permission("view_patients"));
    assert!(session.can_create(ResourceKind::Encounter));
    assert!(session.can_delete(ResourceKind::Encounter));
    assert!(!session.can_delete(ResourceKind::Patient));

    session.logout().await;
    assert!(!session.has_permission("view_patients"));
}

#[tokio::test]
async fn test_unreadable_record_is_not_restored() {
    let backend = FakeBackend::new();
    let storage = Arc::new(MemoryStorage::with_raw(r#"{"token": 42"#));
    let client = client(&backend, &storage);
    assert!(!client.session().restore());
    assert!(!client.session().is_authenticated());
}
