//! Authentication service.
//!
//! [`AuthStore`] owns the visitor's authentication state and is the only
//! writer of the persisted bearer token. State changes are published on a
//! `tokio::sync::watch` channel so request decoration, route guards and UI
//! surfaces all observe the same value.
//!
//! Login, logout and the stored-token check are serialized: at most one of
//! them runs at a time, so `Loading` always belongs to exactly one operation.

mod error;
pub mod token;

pub use error::AuthError;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, instrument, warn};
use void_core::{Registration, UserProfile};

use crate::api::{ApiClient, ApiError};
use crate::models::{AuthSession, AuthState, AuthStatus, Credentials};
use crate::storage::{LocalStorage, keys};

/// Authentication state holder.
///
/// Cheaply cloneable; clones share state.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<AuthStoreInner>,
}

struct AuthStoreInner {
    api: ApiClient,
    storage: Arc<dyn LocalStorage>,
    state: watch::Sender<AuthState>,
    op_lock: Mutex<()>,
}

impl AuthStore {
    /// Create a store in the `Unknown` state.
    #[must_use]
    pub fn new(api: ApiClient, storage: Arc<dyn LocalStorage>) -> Self {
        let (state, _) = watch::channel(AuthState::Unknown);
        Self {
            inner: Arc::new(AuthStoreInner {
                api,
                storage,
                state,
                op_lock: Mutex::new(()),
            }),
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    /// Current state without its payload.
    #[must_use]
    pub fn status(&self) -> AuthStatus {
        self.inner.state.borrow().status()
    }

    /// Whether a login or stored-token check is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status() == AuthStatus::Loading
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    /// Wait until the state is `Authenticated` or `Anonymous`.
    ///
    /// Never resolves while the state stays `Unknown`; something must call
    /// [`Self::check_auth`] first.
    pub async fn wait_until_resolved(&self) -> AuthState {
        let mut rx = self.inner.state.subscribe();
        match rx.wait_for(AuthState::is_resolved).await {
            Ok(state) => state.clone(),
            // The sender lives as long as `self`
            Err(_) => self.state(),
        }
    }

    /// The current session, if one exists and hasn't expired.
    ///
    /// Finding an expired session ends it: the token is removed and the state
    /// becomes `Anonymous`.
    pub async fn active_session(&self) -> Option<AuthSession> {
        let session = self.inner.state.borrow().session().cloned()?;
        if !session.is_expired() {
            return Some(session);
        }

        let _guard = self.inner.op_lock.lock().await;
        self.expire_locked().await;
        None
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Log in with email and password.
    ///
    /// On success the token is persisted and the state becomes
    /// `Authenticated`. On any failure the state becomes `Anonymous`.
    /// Logging in while already authenticated ends the previous session
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the backend rejects the
    /// credentials, `AuthError::InvalidToken` or `AuthError::ExpiredToken` if
    /// the issued token is unusable, or `AuthError::Api`/`AuthError::Storage`
    /// for request and storage failures.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let _guard = self.inner.op_lock.lock().await;

        if self.status() == AuthStatus::Authenticated {
            debug!("Ending previous session before login");
            self.clear_locked().await;
        }

        self.transition(AuthState::Loading);

        match self.authenticate(credentials).await {
            Ok(session) => {
                info!(user_id = %session.user_id(), role = %session.role(), "User logged in");
                self.transition(AuthState::Authenticated(Box::new(session.clone())));
                Ok(session)
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.forget_token().await;
                self.transition(AuthState::Anonymous);
                Err(e)
            }
        }
    }

    /// Log out.
    ///
    /// Always ends with the state `Anonymous` and no persisted token, even if
    /// storage fails (the failure is logged). Calling it again is a no-op.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let _guard = self.inner.op_lock.lock().await;

        match self.status() {
            AuthStatus::Authenticated => {
                self.clear_locked().await;
                info!("User logged out");
            }
            AuthStatus::Unknown => {
                // Resolve through Loading so waiters see a normal check outcome
                self.transition(AuthState::Loading);
                self.forget_token().await;
                self.transition(AuthState::Anonymous);
            }
            AuthStatus::Anonymous | AuthStatus::Loading => {
                self.forget_token().await;
            }
        }
    }

    /// Restore the session from the persisted token.
    ///
    /// Runs on startup. A missing token resolves to `Anonymous`; an expired
    /// or unusable token is removed and also resolves to `Anonymous`.
    /// If a session is already active this only re-checks its expiry.
    #[instrument(skip(self))]
    pub async fn check_auth(&self) -> AuthStatus {
        let _guard = self.inner.op_lock.lock().await;

        if self.status() == AuthStatus::Authenticated {
            self.expire_locked().await;
            return self.status();
        }

        self.transition(AuthState::Loading);
        let next = self.restore().await;
        self.transition(next);

        let status = self.status();
        debug!(%status, "Stored session checked");
        status
    }

    /// Create an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` if the backend rejects the registration (e.g.
    /// the email is taken) or the request fails.
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, AuthError> {
        let profile = self.inner.api.register(registration).await?;
        info!(user_id = %profile.id, "Account registered");
        Ok(profile)
    }

    // =========================================================================
    // Internals (callers hold `op_lock`)
    // =========================================================================

    /// Obtain, validate and persist a new token.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let token = self
            .inner
            .api
            .login(&credentials.email, &credentials.password)
            .await
            .map_err(AuthError::from_login)?;

        let session = self.validate(token).await?;
        self.inner
            .storage
            .set(keys::AUTH_TOKEN, session.token.expose_secret())
            .await?;
        Ok(session)
    }

    /// Decode a token and fetch its owner's profile.
    async fn validate(&self, token: SecretString) -> Result<AuthSession, AuthError> {
        let claims = token::decode_claims(token.expose_secret())?;
        if claims.is_expired() {
            return Err(AuthError::ExpiredToken);
        }

        let profile = self.inner.api.me(&token).await.map_err(|e| match e {
            ApiError::Unauthorized(_) => AuthError::ExpiredToken,
            other => AuthError::Api(other),
        })?;

        Ok(AuthSession {
            token,
            claims,
            profile,
        })
    }

    /// Work out the state the persisted token leads to.
    async fn restore(&self) -> AuthState {
        let token = match self.inner.storage.get(keys::AUTH_TOKEN).await {
            Ok(Some(token)) => token,
            Ok(None) => return AuthState::Anonymous,
            Err(e) => {
                warn!(error = %e, "Could not read stored token");
                return AuthState::Anonymous;
            }
        };

        match self.validate(SecretString::from(token)).await {
            Ok(session) => {
                info!(user_id = %session.user_id(), "Session restored");
                AuthState::Authenticated(Box::new(session))
            }
            Err(e) => {
                info!(reason = %e, "Discarding stored token");
                self.forget_token().await;
                AuthState::Anonymous
            }
        }
    }

    /// End the session if it has expired.
    async fn expire_locked(&self) {
        let expired = self
            .inner
            .state
            .borrow()
            .session()
            .is_some_and(AuthSession::is_expired);
        if expired {
            info!("Session expired");
            self.clear_locked().await;
        }
    }

    /// `Authenticated -> Anonymous`, removing the token.
    async fn clear_locked(&self) {
        self.forget_token().await;
        self.transition(AuthState::Anonymous);
    }

    /// Remove the persisted token, logging failures.
    async fn forget_token(&self) {
        if let Err(e) = self.inner.storage.remove(keys::AUTH_TOKEN).await {
            error!(error = %e, "Failed to remove stored token");
        }
    }

    /// Publish `next` if the state machine allows it.
    fn transition(&self, next: AuthState) {
        let from = self.status();
        let to = next.status();
        if from.can_transition_to(to) {
            self.inner.state.send_replace(next);
        } else {
            error!(%from, %to, "Rejected auth state transition");
        }
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
