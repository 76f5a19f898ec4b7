//! Cart and checkout commands.

use void_core::{CartItem, ProductId, VariantId};
use void_storefront::{ClientError, Storefront};

use super::output;

/// Print the cart loaded at startup.
pub fn show(storefront: &Storefront) {
    output::cart(&storefront.cart().cached());
}

/// Add a variant, taking name, price and image from the catalog.
pub async fn add(
    storefront: &Storefront,
    product_id: ProductId,
    variant_id: VariantId,
    quantity: u32,
) -> Result<(), ClientError> {
    let product = storefront.catalog().product(product_id).await?;
    let variant = product.variant(variant_id).ok_or_else(|| {
        ClientError::BadRequest(format!(
            "El producto {product_id} no tiene la variante {variant_id}."
        ))
    })?;
    if !variant.in_stock() {
        return Err(ClientError::BadRequest(
            "Esta variante no tiene stock disponible.".to_string(),
        ));
    }

    let mut item = CartItem::new(variant.id, quantity, product.price, product.name.clone())
        .with_size(variant.size.clone());
    if let Some(image) = product.primary_image() {
        item = item.with_image_url(image);
    }

    let cart = storefront.cart().add_item(&item).await?;
    output::cart(&cart);
    Ok(())
}

pub async fn remove(storefront: &Storefront, variant_id: VariantId) -> Result<(), ClientError> {
    let cart = storefront.cart().remove_item(variant_id).await?;
    output::cart(&cart);
    Ok(())
}

/// Create a payment preference and print where to pay.
pub async fn checkout(storefront: &Storefront) -> Result<(), ClientError> {
    let cart = storefront.cart().cached();
    let preference = storefront.checkout().create_preference(&cart).await?;
    output::cart(&cart);
    output::line(&format!("Pagá en: {}", preference.init_point));
    Ok(())
}
