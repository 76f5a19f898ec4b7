//! Back-office reports, expenses and catalog edits against the fake backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use void_core::{
    CategoryId, NewExpense, NewVariant, Product, ProductFilter, ProductId, ProductUpdate,
    ProductVariant, Role, VariantId,
};
use void_integration_tests::FakeBackend;
use void_storefront::Storefront;
use void_storefront::api::ApiError;
use void_storefront::models::Credentials;
use void_storefront::storage::MemoryStorage;

fn buzo(id: i32, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Buzo {id}"),
        description: None,
        price: Decimal::new(45_000, 0),
        sku: format!("BZ-{id:03}"),
        material: Some("algodón".to_string()),
        size: None,
        color: Some("negro".to_string()),
        stock,
        category_id: CategoryId::new(2),
        image_urls: None,
        variants: vec![ProductVariant {
            id: VariantId::new(id * 10),
            product_id: ProductId::new(id),
            size: "M".to_string(),
            color: "negro".to_string(),
            stock,
        }],
    }
}

fn expense(description: &str, amount: i64, category: Option<&str>) -> NewExpense {
    NewExpense {
        description: description.to_string(),
        amount: Decimal::new(amount, 0),
        category: category.map(str::to_string),
        date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
    }
}

async fn admin_storefront(backend: &FakeBackend) -> Storefront {
    backend.add_user("admin@void.store", "admin1234", Role::Admin);
    let storefront = backend
        .init_storefront(Arc::new(MemoryStorage::new()))
        .await;
    let credentials = Credentials::new("admin@void.store", "admin1234").unwrap();
    storefront.login(&credentials).await.unwrap();
    storefront
}

#[tokio::test]
async fn test_product_update_refreshes_cached_catalog() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_product(buzo(1, 4));
    let storefront = admin_storefront(&backend).await;
    let catalog = storefront.catalog();

    assert_eq!(catalog.product(ProductId::new(1)).await.unwrap().stock, 4);
    let listed = catalog.products(&ProductFilter::default()).await.unwrap();
    assert_eq!(listed.first().unwrap().name, "Buzo 1");

    let update = ProductUpdate {
        name: Some("Buzo Oversize".to_string()),
        stock: Some(9),
        ..ProductUpdate::default()
    };
    let updated = storefront
        .admin()
        .update_product(ProductId::new(1), &update)
        .await
        .unwrap();
    assert_eq!(updated.name, "Buzo Oversize");
    assert_eq!(updated.price, Decimal::new(45_000, 0));

    let cached = catalog.product(ProductId::new(1)).await.unwrap();
    assert_eq!(cached, updated);
    let listed = catalog.products(&ProductFilter::default()).await.unwrap();
    assert_eq!(listed.first().unwrap().name, "Buzo Oversize");
}

#[tokio::test]
async fn test_deleted_product_is_not_served_from_cache() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_product(buzo(1, 4));
    let storefront = admin_storefront(&backend).await;

    storefront.catalog().product(ProductId::new(1)).await.unwrap();
    storefront
        .admin()
        .delete_product(ProductId::new(1))
        .await
        .unwrap();

    assert!(backend.product(ProductId::new(1)).is_none());
    let err = storefront
        .catalog()
        .product(ProductId::new(1))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let again = storefront.admin().delete_product(ProductId::new(1)).await;
    assert!(again.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_added_variant_shows_in_cached_product() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_product(buzo(1, 4));
    let storefront = admin_storefront(&backend).await;
    storefront.catalog().product(ProductId::new(1)).await.unwrap();

    let variant = NewVariant {
        size: "XL".to_string(),
        color: "gris".to_string(),
        stock: 3,
    };
    let created = storefront
        .admin()
        .add_variant(ProductId::new(1), &variant)
        .await
        .unwrap();
    assert_eq!(created.product_id, ProductId::new(1));
    assert_eq!(created.size, "XL");

    let product = storefront.catalog().product(ProductId::new(1)).await.unwrap();
    assert_eq!(product.variants.len(), 2);
    assert_eq!(product.variant(created.id), Some(&created));
}

#[tokio::test]
async fn test_expenses_feed_reports() {
    let backend = FakeBackend::start().await.unwrap();
    let storefront = admin_storefront(&backend).await;
    let admin = storefront.admin();

    let first = admin
        .create_expense(&expense("Envíos", 12_000, Some("logística")))
        .await
        .unwrap();
    admin
        .create_expense(&expense("Fletes", 3_000, Some("logística")))
        .await
        .unwrap();
    admin
        .create_expense(&expense("Cafetera", 20_000, None))
        .await
        .unwrap();
    assert_eq!(first.description, "Envíos");
    assert_eq!(first.category.as_deref(), Some("logística"));

    let expenses = admin.expenses().await.unwrap();
    assert_eq!(expenses.len(), 3);
    assert_eq!(expenses.first(), Some(&first));

    let by_category = admin.expenses_by_category().await.unwrap();
    assert_eq!(by_category.len(), 2);
    let top = by_category.first().unwrap();
    assert_eq!(top.category, None);
    assert_eq!(top.amount, Decimal::new(20_000, 0));
    let logistics = by_category.last().unwrap();
    assert_eq!(logistics.category.as_deref(), Some("logística"));
    assert_eq!(logistics.amount, Decimal::new(15_000, 0));

    let kpis = admin.kpis().await.unwrap();
    assert_eq!(kpis.total_expenses, Decimal::new(35_000, 0));
    assert!(admin.sales_over_time().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_product_metrics() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_product(buzo(1, 4));
    backend.add_product(buzo(2, 11));
    let storefront = admin_storefront(&backend).await;

    let metrics = storefront.admin().product_metrics().await.unwrap();
    assert_eq!(metrics.product_with_most_stock.as_deref(), Some("Buzo 2"));
    assert!(metrics.most_sold_product.is_none());
}

#[tokio::test]
async fn test_reports_and_edits_are_rejected_for_shoppers() {
    let backend = FakeBackend::start().await.unwrap();
    backend.add_product(buzo(1, 4));
    backend.add_user("ana@void.store", "secreto123", Role::User);
    let storefront = backend
        .init_storefront(Arc::new(MemoryStorage::new()))
        .await;
    let admin = storefront.admin();

    assert!(matches!(
        admin.expenses().await,
        Err(ApiError::NotAuthenticated)
    ));

    let credentials = Credentials::new("ana@void.store", "secreto123").unwrap();
    storefront.login(&credentials).await.unwrap();
    backend.clear_requests();

    assert!(matches!(
        admin.product_metrics().await,
        Err(ApiError::Forbidden(_))
    ));
    assert!(matches!(
        admin.create_expense(&expense("Envíos", 1_000, None)).await,
        Err(ApiError::Forbidden(_))
    ));
    assert!(matches!(
        admin.delete_product(ProductId::new(1)).await,
        Err(ApiError::Forbidden(_))
    ));
    assert!(backend.requests().is_empty());
    assert!(backend.product(ProductId::new(1)).is_some());
}
