//! Cart cache semantics, checkout and catalog against the fake backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;
use void_core::{CartItem, CategoryId, Product, ProductId, ProductVariant, VariantId};
use void_integration_tests::FakeBackend;
use void_storefront::Storefront;
use void_storefront::api::CheckoutError;
use void_storefront::services::NotificationLevel;
use void_storefront::storage::MemoryStorage;

fn item(variant: i32, quantity: u32, price: i64) -> CartItem {
    CartItem::new(
        VariantId::new(variant),
        quantity,
        Decimal::new(price, 0),
        format!("Variante {variant}"),
    )
}

async fn guest_storefront(backend: &FakeBackend) -> Storefront {
    backend
        .init_storefront(Arc::new(MemoryStorage::new()))
        .await
}

#[tokio::test]
async fn test_add_then_remove_single_item() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = guest_storefront(&backend).await;
    assert!(storefront.cart().cached().is_empty());

    let cart = storefront.cart().add_item(&item(7, 1, 10_000)).await.unwrap();
    assert_eq!(cart.items, vec![item(7, 1, 10_000)]);
    assert_eq!(storefront.cart().cached(), cart);

    let cart = storefront.cart().remove_item(VariantId::new(7)).await.unwrap();
    assert!(cart.items.is_empty());
    assert!(storefront.cart().cached().is_empty());
}

#[tokio::test]
async fn test_subtotal_tracks_remaining_items() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = guest_storefront(&backend).await;
    let cart = storefront.cart();

    cart.add_item(&item(7, 2, 10_000)).await.unwrap();
    cart.add_item(&item(8, 3, 5_500)).await.unwrap();
    assert_eq!(cart.cached().subtotal(), Decimal::new(36_500, 0));

    let after = cart.remove_item(VariantId::new(7)).await.unwrap();
    assert!(!after.contains(VariantId::new(7)));
    let expected: Decimal = after.items.iter().map(CartItem::line_total).sum();
    assert_eq!(after.subtotal(), expected);
    assert_eq!(after.subtotal(), Decimal::new(16_500, 0));
    assert_eq!(after.item_count(), 3);
}

#[tokio::test]
async fn test_adding_same_variant_increments_quantity() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = guest_storefront(&backend).await;

    storefront.cart().add_item(&item(7, 1, 10_000)).await.unwrap();
    let cart = storefront.cart().add_item(&item(7, 2, 10_000)).await.unwrap();

    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.item(VariantId::new(7)).unwrap().quantity, 3);
}

#[tokio::test]
async fn test_remove_publishes_confirmation() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = guest_storefront(&backend).await;
    storefront.cart().add_item(&item(7, 1, 10_000)).await.unwrap();
    let mut notifications = storefront.notifier().subscribe();

    storefront.cart().remove_item(VariantId::new(7)).await.unwrap();

    let note = notifications.recv().await.unwrap();
    assert_eq!(note.level, NotificationLevel::Success);
    assert_eq!(note.message, "Producto eliminado del carrito");
}

#[tokio::test]
async fn test_fetch_failure_shows_empty_cart() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = guest_storefront(&backend).await;
    storefront.cart().add_item(&item(7, 1, 10_000)).await.unwrap();

    backend.fail_cart_fetches(1);
    let cart = storefront.cart().fetch_cart().await;
    assert!(cart.is_empty());
    assert!(storefront.cart().cached().is_empty());
    assert!(!storefront.cart().is_loading());

    // The server copy is intact and comes back on the next fetch
    let cart = storefront.cart().fetch_cart().await;
    assert_eq!(cart.items, vec![item(7, 1, 10_000)]);
}

#[tokio::test]
async fn test_subscribers_see_cache_replacements() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = guest_storefront(&backend).await;
    let mut rx = storefront.cart().subscribe();

    storefront.cart().add_item(&item(7, 1, 10_000)).await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().item_count(), 1);
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart_without_request() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = guest_storefront(&backend).await;
    backend.clear_requests();

    let result = storefront
        .checkout()
        .create_preference(&storefront.cart().cached())
        .await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_checkout_creates_preference_for_guest() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = guest_storefront(&backend).await;
    let cart = storefront.cart().add_item(&item(7, 1, 10_000)).await.unwrap();

    let preference = storefront.checkout().create_preference(&cart).await.unwrap();
    assert_eq!(preference.preference_id, "pref-1");
    assert!(preference.init_point.ends_with("pref_id=pref-1"));

    let request = backend
        .requests()
        .into_iter()
        .find(|r| r.path == "/api/checkout/create_preference")
        .unwrap();
    assert!(request.guest_session.is_some());
}

fn remera() -> Product {
    Product {
        id: ProductId::new(1),
        name: "Remera Oversize".to_string(),
        description: None,
        price: Decimal::new(10_000, 0),
        sku: "REM-001".to_string(),
        material: Some("algodón".to_string()),
        size: None,
        color: None,
        stock: 5,
        category_id: CategoryId::new(1),
        image_urls: None,
        variants: vec![ProductVariant {
            id: VariantId::new(7),
            product_id: ProductId::new(1),
            size: "M".to_string(),
            color: "negro".to_string(),
            stock: 5,
        }],
    }
}

#[tokio::test]
async fn test_catalog_product_is_cached() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_product(remera());
    let storefront = guest_storefront(&backend).await;

    let first = storefront.catalog().product(ProductId::new(1)).await.unwrap();
    let second = storefront.catalog().product(ProductId::new(1)).await.unwrap();
    assert_eq!(first, second);
    assert!(first.variant(VariantId::new(7)).unwrap().in_stock());

    let hits = backend
        .requests()
        .into_iter()
        .filter(|r| r.path == "/api/products/1")
        .count();
    assert_eq!(hits, 1);
}

#[tokio::test]
async fn test_catalog_missing_product_is_not_found() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = guest_storefront(&backend).await;

    let err = storefront
        .catalog()
        .product(ProductId::new(99))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_catalog_search() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_product(remera());
    let storefront = guest_storefront(&backend).await;

    let found = storefront.catalog().search("remera").await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(storefront.catalog().search("buzo").await.unwrap().is_empty());
    assert!(storefront.catalog().search("  ").await.unwrap().is_empty());
}
