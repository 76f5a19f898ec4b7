//! Route guards.
//!
//! Guards wait for the auth state to resolve before deciding, so a page
//! loaded with a valid stored token is never bounced to login while the
//! token is still being checked.

use tracing::debug;

use crate::models::{AuthSession, AuthState};
use crate::services::AuthStore;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// What a protected view needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any logged-in user.
    Authenticated,
    /// A logged-in user with the admin role.
    Admin,
}

/// Outcome of a guard check.
#[derive(Debug, Clone)]
pub enum GuardDecision {
    /// Render the view for this session.
    Allow(Box<AuthSession>),
    /// Send the visitor to [`LOGIN_PATH`].
    RedirectToLogin,
}

impl GuardDecision {
    /// Whether access was granted.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}

/// Guards views behind authentication.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    auth: AuthStore,
}

impl RouteGuard {
    #[must_use]
    pub const fn new(auth: AuthStore) -> Self {
        Self { auth }
    }

    /// Decide whether a view with `requirement` may be shown.
    ///
    /// Suspends while the auth state is `Unknown` or `Loading`.
    pub async fn check(&self, requirement: Requirement) -> GuardDecision {
        let state = self.auth.wait_until_resolved().await;
        let AuthState::Authenticated(_) = state else {
            debug!(?requirement, "Guard: not logged in");
            return GuardDecision::RedirectToLogin;
        };

        // An expired session counts as logged out
        let Some(session) = self.auth.active_session().await else {
            debug!(?requirement, "Guard: session expired");
            return GuardDecision::RedirectToLogin;
        };

        match requirement {
            Requirement::Authenticated => GuardDecision::Allow(Box::new(session)),
            Requirement::Admin if session.role().is_admin() => GuardDecision::Allow(Box::new(session)),
            Requirement::Admin => {
                debug!(user_id = %session.user_id(), "Guard: admin role required");
                GuardDecision::RedirectToLogin
            }
        }
    }
}
