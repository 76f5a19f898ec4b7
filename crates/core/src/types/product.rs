//! Catalog wire models.
//!
//! Field names on the wire are the backend's Spanish column names.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId, VariantId};
use super::money::Money;

/// A purchasable size/color combination of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    #[serde(rename = "producto_id")]
    pub product_id: ProductId,
    #[serde(rename = "tamanio")]
    pub size: String,
    pub color: String,
    #[serde(rename = "cantidad_en_stock")]
    pub stock: u32,
}

impl ProductVariant {
    /// Whether at least one unit can be bought.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Body of `POST /products/{id}/variants`.
#[derive(Debug, Clone, Serialize)]
pub struct NewVariant {
    #[serde(rename = "tamanio")]
    pub size: String,
    pub color: String,
    #[serde(rename = "cantidad_en_stock")]
    pub stock: u32,
}

/// A catalog product with its variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub sku: String,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(rename = "talle", default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(rename = "categoria_id")]
    pub category_id: CategoryId,
    #[serde(rename = "urls_imagenes", default)]
    pub image_urls: Option<Vec<String>>,
    #[serde(rename = "variantes", default)]
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Price as displayable money.
    #[must_use]
    pub const fn price_money(&self) -> Money {
        Money::ars(self.price)
    }

    /// First image, used as the cart thumbnail.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls
            .as_ref()
            .and_then(|urls| urls.first())
            .map(String::as_str)
    }

    /// Variant by id.
    #[must_use]
    pub fn variant(&self, id: VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == id)
    }
}

/// Sort orders accepted by `GET /products`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    PrecioAsc,
    PrecioDesc,
    NombreAsc,
    NombreDesc,
}

/// Query parameters for `GET /products`.
///
/// Text filters are substring matches on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ProductFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Maximum price (inclusive).
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(rename = "categoria_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(rename = "talle", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Page size, 1..=100 on the server (default 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<ProductSort>,
}

impl ProductFilter {
    /// Whether no narrowing filter is set (pagination and sort aside).
    ///
    /// Only unfiltered listings are worth caching.
    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        self.material.is_none()
            && self.max_price.is_none()
            && self.category_id.is_none()
            && self.size.is_none()
            && self.color.is_none()
    }
}

/// Partial update for `PUT /admin/products/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "precio",
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(rename = "talle", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(rename = "categoria_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{
        "id": 3,
        "nombre": "Buzo VOID",
        "descripcion": "Algodon frisado",
        "precio": 45999.5,
        "sku": "BZ-001",
        "material": "algodon",
        "talle": null,
        "color": "negro",
        "stock": 12,
        "categoria_id": 2,
        "urls_imagenes": ["https://cdn.void.store/bz-001.jpg"],
        "variantes": [
            {"id": 7, "producto_id": 3, "tamanio": "M", "color": "negro", "cantidad_en_stock": 4},
            {"id": 8, "producto_id": 3, "tamanio": "L", "color": "negro", "cantidad_en_stock": 0}
        ]
    }"#;

    #[test]
    fn test_product_deserializes_backend_shape() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert_eq!(product.name, "Buzo VOID");
        assert_eq!(product.price, Decimal::new(459_995, 1));
        assert_eq!(product.primary_image(), Some("https://cdn.void.store/bz-001.jpg"));
        assert!(product.variant(VariantId::new(7)).unwrap().in_stock());
        assert!(!product.variant(VariantId::new(8)).unwrap().in_stock());
    }

    #[test]
    fn test_product_without_variants_or_images() {
        let product: Product = serde_json::from_str(
            r#"{"id": 1, "nombre": "Gorra", "precio": 9000, "sku": "G-1", "categoria_id": 1}"#,
        )
        .unwrap();
        assert!(product.variants.is_empty());
        assert!(product.primary_image().is_none());
    }

    #[test]
    fn test_filter_serializes_only_set_fields() {
        let filter = ProductFilter {
            color: Some("negro".to_string()),
            sort_by: Some(ProductSort::PrecioAsc),
            ..ProductFilter::default()
        };
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value, serde_json::json!({"color": "negro", "sort_by": "precio_asc"}));
        assert!(!filter.is_unfiltered());
        assert!(ProductFilter::default().is_unfiltered());
    }

    #[test]
    fn test_update_sends_price_as_number() {
        let update = ProductUpdate {
            price: Some(Decimal::new(12_000, 0)),
            ..ProductUpdate::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"precio": 12000.0}));
    }
}
