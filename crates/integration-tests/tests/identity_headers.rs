//! Which identity header goes on each request.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Duration;
use rust_decimal::Decimal;
use void_core::{CartItem, GuestSessionId, Role, VariantId};
use void_integration_tests::{CartOwner, FakeBackend};
use void_storefront::api::ApiError;
use void_storefront::models::Credentials;
use void_storefront::storage::{LocalStorage, MemoryStorage, keys};

fn remera(quantity: u32) -> CartItem {
    CartItem::new(VariantId::new(7), quantity, Decimal::new(10_000, 0), "Remera Oversize")
}

#[tokio::test]
async fn test_session_sends_bearer_and_never_guest_header() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    let token = backend.issue_token("ana@void.store", Duration::hours(1));

    let guest = GuestSessionId::generate();
    let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::with_entries([
        (keys::GUEST_SESSION_ID, guest.to_string()),
        (keys::AUTH_TOKEN, token.clone()),
    ]));

    let storefront = backend.init_storefront(storage).await;
    storefront.cart().add_item(&remera(1)).await.unwrap();
    storefront.cart().remove_item(VariantId::new(7)).await.unwrap();
    storefront.cart().fetch_cart().await;

    let requests = backend.cart_requests();
    assert_eq!(requests.len(), 4);
    for request in requests {
        assert_eq!(request.authorization, Some(format!("Bearer {token}")));
        assert!(request.guest_session.is_none(), "{request:?}");
    }
}

#[tokio::test]
async fn test_logout_switches_cart_requests_to_guest_header() {
    let backend = FakeBackend::start().await.unwrap();
    let user_id = backend.add_user("ana@void.store", "secreto123", Role::User);
    let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
    let storefront = backend.init_storefront(storage.clone()).await;

    let credentials = Credentials::new("ana@void.store", "secreto123").unwrap();
    storefront.login(&credentials).await.unwrap();
    storefront.cart().add_item(&remera(2)).await.unwrap();

    backend.clear_requests();
    let guest_cart = storefront.logout().await;
    storefront.cart().fetch_cart().await;

    // The user's items stay on the server but are not shown to the guest
    assert!(guest_cart.is_empty());
    assert!(storefront.cart().cached().is_empty());
    assert_eq!(
        backend.cart_items(&CartOwner::User(user_id.to_string())).len(),
        1
    );

    let guest = storage.get(keys::GUEST_SESSION_ID).await.unwrap().unwrap();
    let requests = backend.cart_requests();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert!(!request.has_bearer(), "{request:?}");
        assert_eq!(request.guest_session.as_deref(), Some(guest.as_str()));
    }
    assert!(storage.get(keys::AUTH_TOKEN).await.unwrap().is_none());
}

#[tokio::test]
async fn test_guest_cart_is_not_merged_on_login() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    let storefront = backend
        .init_storefront(Arc::new(MemoryStorage::new()))
        .await;

    storefront.cart().add_item(&remera(1)).await.unwrap();
    let guest = storefront.guest().peek().await.unwrap().unwrap();

    let credentials = Credentials::new("ana@void.store", "secreto123").unwrap();
    storefront.login(&credentials).await.unwrap();

    assert!(storefront.cart().cached().is_empty());
    assert_eq!(
        backend.cart_items(&CartOwner::Guest(guest.to_string())),
        vec![remera(1)]
    );
}

#[tokio::test]
async fn test_bearer_only_calls_need_a_session() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = backend
        .init_storefront(Arc::new(MemoryStorage::new()))
        .await;
    backend.clear_requests();

    let result = storefront.checkout().my_orders().await;
    assert!(matches!(result, Err(ApiError::NotAuthenticated)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_my_orders_sends_bearer() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_user("ana@void.store", "secreto123", Role::User);
    let storefront = backend
        .init_storefront(Arc::new(MemoryStorage::new()))
        .await;
    let credentials = Credentials::new("ana@void.store", "secreto123").unwrap();
    storefront.login(&credentials).await.unwrap();

    let orders = storefront.checkout().my_orders().await.unwrap();
    assert!(orders.is_empty());

    let request = backend
        .requests()
        .into_iter()
        .find(|r| r.path == "/api/checkout/my-orders")
        .unwrap();
    assert!(request.has_bearer());
    assert!(request.guest_session.is_none());
}
