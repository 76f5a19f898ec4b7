//! Authentication error types.

use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] void_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The bearer token could not be decoded.
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The bearer token is past its expiry.
    #[error("session expired")]
    ExpiredToken,

    /// Backend request failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Persistent storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message suitable for showing to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Email o contraseña incorrectos.".to_string(),
            Self::InvalidEmail(_) => "El email no es válido.".to_string(),
            Self::InvalidToken(_) | Self::ExpiredToken => {
                "Tu sesión expiró. Iniciá sesión nuevamente.".to_string()
            }
            Self::Api(api) => api.user_message(),
            Self::Storage(_) => "Error de configuración local.".to_string(),
        }
    }

    /// Map a login response error, turning 401 into `InvalidCredentials`.
    pub(crate) fn from_login(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized(_) => Self::InvalidCredentials,
            other => Self::Api(other),
        }
    }
}
