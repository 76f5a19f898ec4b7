//! VOID backend REST API clients.
//!
//! # Architecture
//!
//! - [`ApiClient`] owns the `reqwest` client and the API root, and turns HTTP
//!   responses into typed results or [`ApiError`]s
//! - The backend is the source of truth: no local sync, direct API calls
//! - Catalog responses are cached in memory via `moka` (see [`CatalogClient`])
//! - Identity headers are NOT added here; callers decorate requests with
//!   [`crate::middleware::IdentityResolver`] before sending
//!
//! # Endpoints
//!
//! - `auth/login`, `auth/me`, `auth/register` - [`account`]
//! - `products`, `products/{id}`, `products/search` - [`catalog`]
//! - `cart/`, `cart/items`, `cart/items/{variante_id}` - used by
//!   [`crate::services::CartSynchronizer`]
//! - `checkout/create_preference`, `checkout/my-orders` - [`checkout`]
//! - `chatbot/query` - [`chatbot`]
//! - `admin/*` - [`admin`]

pub mod account;
pub mod admin;
mod cache;
pub mod catalog;
pub mod chatbot;
pub mod checkout;
mod client;

pub use admin::AdminClient;
pub use catalog::CatalogClient;
pub use chatbot::{ChatError, ChatbotClient};
pub use checkout::{CheckoutClient, CheckoutError};
pub use client::ApiClient;

use thiserror::Error;

/// Errors that can occur when talking to the VOID backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, reset, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided explanation.
        detail: String,
    },

    /// The backend rejected the credentials or bearer token (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller lacks the required role (403, or checked client-side).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A bearer-only endpoint was called without an active session.
    #[error("Not logged in")]
    NotAuthenticated,

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint path could not be joined onto the API root.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Whether the failure is plausibly temporary.
    ///
    /// Picks the log level in [`ApiClient`]; users see transient and
    /// permanent failures the same way.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether the error is the 404 of a missing resource.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Message suitable for showing to the shopper.
    ///
    /// Backend-provided details are shown as-is; transport and parsing
    /// internals are not.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { detail, .. } | Self::Forbidden(detail) if !detail.is_empty() => {
                detail.clone()
            }
            Self::Unauthorized(_) | Self::NotAuthenticated => {
                "Tenés que iniciar sesión para continuar.".to_string()
            }
            Self::Forbidden(_) => "No tenés permisos para esta acción.".to_string(),
            Self::RateLimited(secs) => {
                format!("Demasiadas solicitudes. Probá de nuevo en {secs} segundos.")
            }
            Self::Http(_) => "No se pudo conectar con el servidor.".to_string(),
            Self::Status { .. } | Self::Parse(_) | Self::InvalidUrl(_) => {
                "Ocurrió un error inesperado.".to_string()
            }
        }
    }
}

/// Extract a human-readable message from an error body.
///
/// The backend answers errors as `{"detail": "..."}`, or for request
/// validation failures as `{"detail": [{"msg": "...", ...}, ...]}`. Anything
/// else is returned as (truncated) raw text.
pub(crate) fn extract_detail(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }

    let Ok(ErrorBody { detail }) = serde_json::from_str::<ErrorBody>(body) else {
        return body.chars().take(200).collect();
    };

    match detail {
        serde_json::Value::String(message) => message,
        serde_json::Value::Array(entries) => {
            let messages: Vec<String> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(serde_json::Value::as_str))
                .map(str::to_string)
                .collect();
            if messages.is_empty() {
                "(no error details provided)".to_string()
            } else {
                messages.join("; ")
            }
        }
        other => other.to_string(),
    }
}
