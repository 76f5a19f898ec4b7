//! Checkout and order history.
//!
//! Only the preference creation is handled here; sending the shopper to the
//! payment gateway's `init_point` is up to the front end.

use reqwest::Method;
use thiserror::Error;
use tracing::{info, instrument};
use void_core::{Cart, CheckoutPreference, Order};

use super::{ApiClient, ApiError};
use crate::middleware::IdentityResolver;
use crate::storage::StorageError;

/// Errors from checkout calls.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to pay for.
    #[error("cart is empty")]
    EmptyCart,

    /// Backend request failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// The guest identity couldn't be read or created.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Client for `/checkout/*`.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    api: ApiClient,
    identity: IdentityResolver,
}

impl CheckoutClient {
    #[must_use]
    pub const fn new(api: ApiClient, identity: IdentityResolver) -> Self {
        Self { api, identity }
    }

    /// Create a payment preference for `cart`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` without sending anything if the
    /// cart has no items, otherwise the request failure.
    #[instrument(skip(self, cart), fields(items = cart.items.len()))]
    pub async fn create_preference(&self, cart: &Cart) -> Result<CheckoutPreference, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let request = self
            .api
            .request(Method::POST, "checkout/create_preference")?
            .json(cart);
        let request = self.identity.decorate(request).await?;
        let preference: CheckoutPreference = self.api.send_json(request).await?;

        info!(preference_id = %preference.preference_id, "Checkout preference created");
        Ok(preference)
    }

    /// Orders placed by the logged-in user, newest first as the backend
    /// returns them.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotAuthenticated` without a session, otherwise the
    /// request failure.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        let request = self.api.request(Method::GET, "checkout/my-orders")?;
        let request = self.identity.bearer(request).await?;
        self.api.send_json(request).await
    }
}
