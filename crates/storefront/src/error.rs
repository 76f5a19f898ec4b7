//! Unified error handling.
//!
//! Each concern has its own error type; `ClientError` wraps them all for
//! callers (like the CLI) that don't care which layer failed. Use
//! [`ClientError::user_message`] for anything shown to shoppers.

use thiserror::Error;

use crate::api::{ApiError, ChatError, CheckoutError};
use crate::config::ConfigError;
use crate::services::{AuthError, CartError};
use crate::storage::StorageError;

/// Client-level error type for the storefront.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Persistent storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backend request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart mutation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Chatbot query failed.
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ClientError {
    /// Message suitable for showing to the shopper.
    ///
    /// Transient and permanent failures read the same; internal details
    /// (paths, parse errors, token contents) are never included.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Storage(_) => "Error de configuración local.".to_string(),
            Self::Api(err) => err.user_message(),
            Self::Auth(err) => err.user_message(),
            Self::Cart(err) => err.user_message(),
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => "Tu carrito está vacío.".to_string(),
                CheckoutError::Api(api) => api.user_message(),
                CheckoutError::Storage(_) => "Error de configuración local.".to_string(),
            },
            Self::Chat(err) => err.user_message(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;
