//! Cart synchronizer.
//!
//! Keeps the one cached copy of the cart that every surface (badge, modal,
//! cart page, checkout) reads, and replaces it with the server's copy after
//! each successful call. Every request is decorated by the
//! [`IdentityResolver`], so the server picks the user's or the guest's cart.
//!
//! Concurrent mutations are not sequenced: whichever response settles last
//! is what the cache holds.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::Method;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, instrument, warn};
use void_core::{Cart, CartItem, VariantId};

use super::notify::Notifier;
use crate::api::{ApiClient, ApiError};
use crate::middleware::IdentityResolver;
use crate::storage::StorageError;

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantities must be at least 1.
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// Backend request failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// The guest identity couldn't be read or created.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Message suitable for showing to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidQuantity => "La cantidad debe ser al menos 1.".to_string(),
            Self::Api(e) => e.user_message(),
            Self::Storage(_) => "No se pudo acceder al almacenamiento local.".to_string(),
        }
    }
}

/// Shared cart cache and the calls that refresh it.
///
/// Cheaply cloneable; clones share the cache.
#[derive(Clone)]
pub struct CartSynchronizer {
    inner: Arc<CartInner>,
}

struct CartInner {
    api: ApiClient,
    identity: IdentityResolver,
    notifier: Notifier,
    cache: watch::Sender<Cart>,
    loading: AtomicUsize,
    adding: AtomicUsize,
    removing: AtomicUsize,
}

/// Marks an operation in flight for as long as it lives.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl CartSynchronizer {
    /// Create a synchronizer with an empty cached cart.
    #[must_use]
    pub fn new(api: ApiClient, identity: IdentityResolver, notifier: Notifier) -> Self {
        let (cache, _) = watch::channel(Cart::empty());
        Self {
            inner: Arc::new(CartInner {
                api,
                identity,
                notifier,
                cache,
                loading: AtomicUsize::new(0),
                adding: AtomicUsize::new(0),
                removing: AtomicUsize::new(0),
            }),
        }
    }

    // =========================================================================
    // Cache access
    // =========================================================================

    /// Snapshot of the cached cart.
    #[must_use]
    pub fn cached(&self) -> Cart {
        self.inner.cache.borrow().clone()
    }

    /// Subscribe to cache replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.cache.subscribe()
    }

    /// Replace the cache with an empty cart.
    ///
    /// Used on logout so the previous user's items never show under the
    /// guest identity.
    pub fn reset(&self) {
        self.inner.cache.send_replace(Cart::empty());
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst) > 0
    }

    #[must_use]
    pub fn is_adding(&self) -> bool {
        self.inner.adding.load(Ordering::SeqCst) > 0
    }

    #[must_use]
    pub fn is_removing(&self) -> bool {
        self.inner.removing.load(Ordering::SeqCst) > 0
    }

    // =========================================================================
    // Server calls
    // =========================================================================

    /// Fetch the cart for the current identity and cache it.
    ///
    /// Never fails: any error is logged and yields an empty cart.
    #[instrument(skip(self))]
    pub async fn fetch_cart(&self) -> Cart {
        let _in_flight = InFlight::enter(&self.inner.loading);

        let cart = match self.request_cart(Method::GET, "cart/", None).await {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "Cart fetch failed, falling back to an empty cart");
                Cart::empty()
            }
        };

        self.inner.cache.send_replace(cart.clone());
        cart
    }

    /// Add `item` to the cart.
    ///
    /// On success the cache holds the server's updated cart. On failure the
    /// cache is untouched and an error notification is published.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a zero quantity (nothing is
    /// sent), or the request failure.
    #[instrument(skip(self, item), fields(variant_id = %item.variant_id, quantity = item.quantity))]
    pub async fn add_item(&self, item: &CartItem) -> Result<Cart, CartError> {
        let _in_flight = InFlight::enter(&self.inner.adding);

        let result = if item.quantity == 0 {
            Err(CartError::InvalidQuantity)
        } else {
            self.request_cart(Method::POST, "cart/items", Some(item)).await
        };

        self.settle(result, "No se pudo agregar el producto al carrito", None)
    }

    /// Remove every unit of `variant_id` from the cart.
    ///
    /// Same cache semantics as [`Self::add_item`]; success also publishes a
    /// confirmation.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    #[instrument(skip(self), fields(variant_id = %variant_id))]
    pub async fn remove_item(&self, variant_id: VariantId) -> Result<Cart, CartError> {
        let _in_flight = InFlight::enter(&self.inner.removing);

        let path = format!("cart/items/{variant_id}");
        let result = self.request_cart(Method::DELETE, &path, None).await;

        self.settle(
            result,
            "No se pudo eliminar el producto del carrito",
            Some("Producto eliminado del carrito"),
        )
    }

    /// Send one decorated cart request.
    async fn request_cart(
        &self,
        method: Method,
        path: &str,
        body: Option<&CartItem>,
    ) -> Result<Cart, CartError> {
        let mut request = self.inner.api.request(method, path)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let request = self.inner.identity.decorate(request).await?;
        Ok(self.inner.api.send_json(request).await?)
    }

    /// Cache a successful mutation or report a failed one.
    fn settle(
        &self,
        result: Result<Cart, CartError>,
        failure: &str,
        success: Option<&str>,
    ) -> Result<Cart, CartError> {
        match result {
            Ok(cart) => {
                info!(items = cart.items.len(), "Cart updated");
                self.inner.cache.send_replace(cart.clone());
                if let Some(message) = success {
                    self.inner.notifier.success(message);
                }
                Ok(cart)
            }
            Err(e) => {
                warn!(error = %e, "Cart mutation failed");
                self.inner
                    .notifier
                    .error(format!("{failure}: {}", e.user_message()));
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for CartSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSynchronizer")
            .field("items", &self.inner.cache.borrow().items.len())
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}
