//! Catalog commands.

use void_core::{ProductFilter, ProductId};
use void_storefront::{ClientError, Storefront};

use super::output;

pub async fn list(storefront: &Storefront, filter: &ProductFilter) -> Result<(), ClientError> {
    let products = storefront.catalog().products(filter).await?;
    output::product_rows(&products);
    Ok(())
}

pub async fn show(storefront: &Storefront, id: ProductId) -> Result<(), ClientError> {
    let product = storefront.catalog().product(id).await?;
    output::product_detail(&product);
    Ok(())
}

pub async fn search(storefront: &Storefront, query: &str) -> Result<(), ClientError> {
    let products = storefront.catalog().search(query).await?;
    output::product_rows(&products);
    Ok(())
}
