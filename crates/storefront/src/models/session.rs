//! Authentication state types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use void_core::{Email, Role, TokenClaims, UserId, UserProfile};

/// An authenticated session.
///
/// Only ever constructed by [`crate::services::AuthStore`] after the token's
/// claims decoded and the profile fetch succeeded.
#[derive(Clone)]
pub struct AuthSession {
    /// Bearer token as issued by the backend.
    pub token: SecretString,
    /// Claims decoded from `token`.
    pub claims: TokenClaims,
    /// Profile from `GET /auth/me`.
    pub profile: UserProfile,
}

impl AuthSession {
    /// The logged-in user's id.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.claims.user_id
    }

    /// The role granted by the token.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.claims.role
    }

    /// When the token stops being accepted.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.expires_at()
    }

    /// Whether the token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.claims.is_expired()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user_id", &self.claims.user_id)
            .field("email", &self.profile.email)
            .field("role", &self.claims.role)
            .field("exp", &self.claims.exp)
            .finish_non_exhaustive()
    }
}

/// Authentication state of the visitor.
///
/// Transitions:
///
/// ```text
/// Unknown ──> Loading ──> Authenticated
///               ▲    └──> Anonymous
///               │             │
///               └─────────────┘  (login)
/// Authenticated ──> Anonymous    (logout, expiry)
/// ```
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    /// No check has run yet.
    #[default]
    Unknown,
    /// A login or stored-token check is in progress.
    Loading,
    /// A valid session exists.
    Authenticated(Box<AuthSession>),
    /// No session; requests fall back to the guest identity.
    Anonymous,
}

impl AuthState {
    /// The discriminant, for comparisons and logging.
    #[must_use]
    pub const fn status(&self) -> AuthStatus {
        match self {
            Self::Unknown => AuthStatus::Unknown,
            Self::Loading => AuthStatus::Loading,
            Self::Authenticated(_) => AuthStatus::Authenticated,
            Self::Anonymous => AuthStatus::Anonymous,
        }
    }

    /// Whether the state is final until the next login or logout.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Authenticated(_) | Self::Anonymous)
    }

    /// The session, if authenticated.
    #[must_use]
    pub fn session(&self) -> Option<&AuthSession> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// [`AuthState`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Unknown,
    Loading,
    Authenticated,
    Anonymous,
}

impl AuthStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unknown | Self::Anonymous, Self::Loading)
                | (Self::Loading | Self::Authenticated, Self::Anonymous)
                | (Self::Loading, Self::Authenticated)
        )
    }
}

impl std::fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Loading => "loading",
            Self::Authenticated => "authenticated",
            Self::Anonymous => "anonymous",
        })
    }
}

/// Login credentials.
pub struct Credentials {
    pub email: Email,
    pub password: SecretString,
}

impl Credentials {
    /// Credentials from raw input. The email is validated, the password isn't.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if `email` is malformed.
    pub fn new(email: &str, password: impl Into<String>) -> Result<Self, void_core::EmailError> {
        Ok(Self {
            email: Email::parse(email)?,
            password: SecretString::from(password.into()),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
