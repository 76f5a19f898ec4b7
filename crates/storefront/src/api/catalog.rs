//! Product catalog client.
//!
//! Catalog reads are anonymous: no identity header is attached.

use moka::future::Cache;
use reqwest::Method;
use tracing::{debug, instrument};
use void_core::{Product, ProductFilter, ProductId};

use super::cache::{CacheKey, CacheValue};
use super::{ApiClient, ApiError};
use crate::config::CatalogCacheConfig;

/// Client for `GET /products*`.
///
/// Product detail and unfiltered listings are cached in memory; filtered
/// listings and searches always hit the backend.
#[derive(Clone)]
pub struct CatalogClient {
    api: ApiClient,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a catalog client.
    #[must_use]
    pub fn new(api: ApiClient, settings: CatalogCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(settings.capacity)
            .time_to_live(settings.ttl)
            .build();
        Self { api, cache }
    }

    /// Get a product with its variants.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with status 404 if the product doesn't
    /// exist, or any other `ApiError` if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let request = self.api.request(Method::GET, &format!("products/{id}"))?;
        let product: Product = self.api.send_json(request).await?;

        self.cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// List products matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        let cacheable = filter.is_unfiltered();
        let key = CacheKey::Products(filter.clone());

        if cacheable && let Some(CacheValue::Products(products)) = self.cache.get(&key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        // The collection route is mounted with a trailing slash
        let request = self.api.request(Method::GET, "products/")?.query(filter);
        let products: Vec<Product> = self.api.send_json(request).await?;

        if cacheable {
            self.cache
                .insert(key, CacheValue::Products(products.clone()))
                .await;
        }

        Ok(products)
    }

    /// Free-text product search. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let request = self
            .api
            .request(Method::GET, "products/search")?
            .query(&[("q", query)]);
        self.api.send_json(request).await
    }

    /// Drop all cached catalog data.
    ///
    /// Called by [`super::AdminClient`] after every product mutation.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("api", &self.api)
            .field("cached_entries", &self.cache.entry_count())
            .finish()
    }
}
