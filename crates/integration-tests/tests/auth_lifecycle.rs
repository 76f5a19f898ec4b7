//! Login, stored-session restore, expiry and route guards.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Duration;
use secrecy::ExposeSecret;
use void_core::{Email, Registration, Role};
use void_integration_tests::FakeBackend;
use void_storefront::api::ApiError;
use void_storefront::middleware::{GuardDecision, Requirement};
use void_storefront::models::{AuthStatus, Credentials};
use void_storefront::services::{AuthError, NotificationLevel};
use void_storefront::storage::{LocalStorage, MemoryStorage, keys};

#[tokio::test]
async fn test_expired_stored_token_is_cleared() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    let expired = backend.issue_token("ana@void.store", -Duration::hours(2));
    let storage: Arc<dyn LocalStorage> =
        Arc::new(MemoryStorage::with_entries([(keys::AUTH_TOKEN, expired)]));

    let storefront = backend.storefront(storage.clone());
    assert_eq!(storefront.auth().status(), AuthStatus::Unknown);

    assert_eq!(storefront.auth().check_auth().await, AuthStatus::Anonymous);
    assert!(storage.get(keys::AUTH_TOKEN).await.unwrap().is_none());
    assert!(storefront.auth().active_session().await.is_none());
}

#[tokio::test]
async fn test_valid_stored_token_restores_session() {
    let backend = FakeBackend::start().await.unwrap();
    let user_id = backend.add_user("ana@void.store", "secreto123", Role::User);
    let token = backend.issue_token("ana@void.store", Duration::hours(1));
    let storage: Arc<dyn LocalStorage> =
        Arc::new(MemoryStorage::with_entries([(keys::AUTH_TOKEN, token)]));

    let storefront = backend.init_storefront(storage).await;

    assert_eq!(storefront.auth().status(), AuthStatus::Authenticated);
    let session = storefront.auth().active_session().await.unwrap();
    assert_eq!(session.user_id(), &user_id);
    assert_eq!(session.profile.email.as_str(), "ana@void.store");
}

#[tokio::test]
async fn test_session_expiring_at_runtime_falls_back_to_guest() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    let token = backend.issue_token("ana@void.store", Duration::seconds(2));
    let storage: Arc<dyn LocalStorage> =
        Arc::new(MemoryStorage::with_entries([(keys::AUTH_TOKEN, token)]));

    let storefront = backend.init_storefront(storage.clone()).await;
    assert_eq!(storefront.auth().status(), AuthStatus::Authenticated);

    tokio::time::sleep(std::time::Duration::from_secs(3)).await;
    backend.clear_requests();
    storefront.cart().fetch_cart().await;

    let requests = backend.cart_requests();
    assert_eq!(requests.len(), 1);
    let request = requests.first().unwrap();
    assert!(request.authorization.is_none(), "{request:?}");
    assert!(request.guest_session.is_some());
    assert_eq!(storefront.auth().status(), AuthStatus::Anonymous);
    assert!(storage.get(keys::AUTH_TOKEN).await.unwrap().is_none());
}

#[tokio::test]
async fn test_garbage_stored_token_is_cleared() {
    let backend = FakeBackend::start().await.unwrap();
    let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::with_entries([(
        keys::AUTH_TOKEN,
        "not-a-jwt",
    )]));

    let storefront = backend.init_storefront(storage.clone()).await;

    assert_eq!(storefront.auth().status(), AuthStatus::Anonymous);
    assert!(storage.get(keys::AUTH_TOKEN).await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_persists_token_for_next_start() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());

    let first = backend.init_storefront(storage.clone()).await;
    let mut notifications = first.notifier().subscribe();
    let credentials = Credentials::new("ana@void.store", "secreto123").unwrap();
    let session = first.login(&credentials).await.unwrap();

    let stored = storage.get(keys::AUTH_TOKEN).await.unwrap().unwrap();
    assert_eq!(stored, session.token.expose_secret());
    let note = notifications.recv().await.unwrap();
    assert_eq!(note.level, NotificationLevel::Success);

    let second = backend.init_storefront(storage).await;
    assert_eq!(second.auth().status(), AuthStatus::Authenticated);
}

#[tokio::test]
async fn test_wrong_password_ends_anonymous_with_notification() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
    let storefront = backend.init_storefront(storage.clone()).await;
    let mut notifications = storefront.notifier().subscribe();

    let credentials = Credentials::new("ana@void.store", "otra-clave").unwrap();
    let result = storefront.login(&credentials).await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    assert_eq!(storefront.auth().status(), AuthStatus::Anonymous);
    assert!(storage.get(keys::AUTH_TOKEN).await.unwrap().is_none());

    let note = notifications.recv().await.unwrap();
    assert_eq!(note.level, NotificationLevel::Error);
    assert_eq!(note.message, "Email o contraseña incorrectos.");
}

#[tokio::test]
async fn test_logout_twice_is_harmless() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    let storefront = backend
        .init_storefront(Arc::new(MemoryStorage::new()))
        .await;
    let credentials = Credentials::new("ana@void.store", "secreto123").unwrap();
    storefront.login(&credentials).await.unwrap();

    storefront.logout().await;
    storefront.logout().await;
    assert_eq!(storefront.auth().status(), AuthStatus::Anonymous);
}

#[tokio::test]
async fn test_register_does_not_log_in() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = backend
        .init_storefront(Arc::new(MemoryStorage::new()))
        .await;

    let registration = Registration {
        email: Email::parse("nuevo@void.store").unwrap(),
        name: "Nico".to_string(),
        last_name: "Pérez".to_string(),
        password: "secreto123".to_string(),
        phone: None,
    };
    let profile = storefront.register(&registration).await.unwrap();
    assert_eq!(profile.role, Role::User);
    assert_eq!(storefront.auth().status(), AuthStatus::Anonymous);

    let duplicate = storefront.register(&registration).await;
    assert!(matches!(duplicate, Err(AuthError::Api(ApiError::Status { status: 400, .. }))));

    let credentials = Credentials::new("nuevo@void.store", "secreto123").unwrap();
    storefront.login(&credentials).await.unwrap();
    assert_eq!(storefront.auth().status(), AuthStatus::Authenticated);
}

#[tokio::test]
async fn test_route_guard_decisions() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    backend.add_user("admin@void.store", "admin1234", Role::Admin);
    let storefront = backend
        .init_storefront(Arc::new(MemoryStorage::new()))
        .await;
    let guard = storefront.guard();

    assert!(matches!(
        guard.check(Requirement::Authenticated).await,
        GuardDecision::RedirectToLogin
    ));

    let user = Credentials::new("ana@void.store", "secreto123").unwrap();
    storefront.login(&user).await.unwrap();
    assert!(guard.check(Requirement::Authenticated).await.is_allowed());
    assert!(!guard.check(Requirement::Admin).await.is_allowed());

    let admin = Credentials::new("admin@void.store", "admin1234").unwrap();
    storefront.login(&admin).await.unwrap();
    assert!(guard.check(Requirement::Admin).await.is_allowed());
}

#[tokio::test]
async fn test_guard_waits_for_startup_check() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    let token = backend.issue_token("ana@void.store", Duration::hours(1));
    let storefront = backend.storefront(Arc::new(MemoryStorage::with_entries([(
        keys::AUTH_TOKEN,
        token,
    )])));

    let guard = storefront.guard().clone();
    let pending = tokio::spawn(async move { guard.check(Requirement::Authenticated).await });

    storefront.auth().check_auth().await;
    assert!(pending.await.unwrap().is_allowed());
}

#[tokio::test]
async fn test_admin_calls_require_admin_role() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    backend.add_user("admin@void.store", "admin1234", Role::Admin);
    let storefront = backend
        .init_storefront(Arc::new(MemoryStorage::new()))
        .await;

    let user = Credentials::new("ana@void.store", "secreto123").unwrap();
    storefront.login(&user).await.unwrap();
    backend.clear_requests();
    assert!(matches!(
        storefront.admin().kpis().await,
        Err(ApiError::Forbidden(_))
    ));
    assert!(backend.requests().is_empty());

    let admin = Credentials::new("admin@void.store", "admin1234").unwrap();
    storefront.login(&admin).await.unwrap();
    let kpis = storefront.admin().kpis().await.unwrap();
    assert_eq!(kpis.total_users, 2);
}
