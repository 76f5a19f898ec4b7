//! Request identity decoration.
//!
//! Every cart request carries exactly one identity header:
//! - `Authorization: Bearer <token>` while an unexpired session exists
//! - `X-Guest-Session-ID: <uuid>` otherwise
//!
//! The session always wins; a stored guest id is ignored while logged in.

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use void_core::GuestSessionId;

use crate::api::ApiError;
use crate::services::{AuthStore, GuestIdentityStore};
use crate::storage::StorageError;

/// The HTTP header name for guest session ids.
pub const GUEST_SESSION_HEADER: &str = "X-Guest-Session-ID";

/// Identity a request is sent under.
#[derive(Clone)]
pub enum RequestIdentity {
    /// Logged-in user.
    Bearer(SecretString),
    /// Anonymous visitor.
    Guest(GuestSessionId),
}

impl RequestIdentity {
    /// Attach this identity's header to `request`.
    #[must_use]
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Bearer(token) => request.bearer_auth(token.expose_secret()),
            Self::Guest(id) => request.header(GUEST_SESSION_HEADER, id.to_string()),
        }
    }

    /// Whether this is the guest identity.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        matches!(self, Self::Guest(_))
    }
}

impl std::fmt::Debug for RequestIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer([REDACTED])"),
            Self::Guest(id) => f.debug_tuple("Guest").field(id).finish(),
        }
    }
}

/// Picks the identity for outgoing requests.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    auth: AuthStore,
    guest: GuestIdentityStore,
}

impl IdentityResolver {
    #[must_use]
    pub const fn new(auth: AuthStore, guest: GuestIdentityStore) -> Self {
        Self { auth, guest }
    }

    /// The identity to use right now.
    ///
    /// The guest id is only read (or created) when no session is active.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the guest id can't be read or persisted.
    pub async fn resolve(&self) -> Result<RequestIdentity, StorageError> {
        if let Some(session) = self.auth.active_session().await {
            return Ok(RequestIdentity::Bearer(session.token));
        }
        Ok(RequestIdentity::Guest(self.guest.get_or_create().await?))
    }

    /// Attach the current identity header to `request`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the guest id can't be read or persisted.
    pub async fn decorate(&self, request: RequestBuilder) -> Result<RequestBuilder, StorageError> {
        let identity = self.resolve().await?;
        tracing::trace!(guest = identity.is_guest(), "Decorating request");
        Ok(identity.apply(request))
    }

    /// Attach the bearer header, failing when nobody is logged in.
    ///
    /// Used for endpoints that have no guest equivalent (profile, orders,
    /// admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotAuthenticated` without an active session.
    pub async fn bearer(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let session = self
            .auth
            .active_session()
            .await
            .ok_or(ApiError::NotAuthenticated)?;
        Ok(RequestIdentity::Bearer(session.token).apply(request))
    }

    /// The auth store this resolver consults.
    #[must_use]
    pub const fn auth(&self) -> &AuthStore {
        &self.auth
    }
}
