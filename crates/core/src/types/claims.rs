//! Claims embedded in the backend's bearer tokens.
//!
//! The client never verifies the token signature (it doesn't hold the key);
//! it only reads these claims to learn who is logged in and when the session
//! stops being usable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;
use super::role::Role;

/// Decoded JWT payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user's email.
    pub sub: String,
    /// Backend user id.
    pub user_id: UserId,
    /// Role at the time the token was issued.
    #[serde(default)]
    pub role: Role,
    /// Expiry as unix seconds.
    pub exp: i64,
}

impl TokenClaims {
    /// Expiry as a timestamp, if representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Whether the token is no longer usable at `now`.
    ///
    /// A token whose expiry equals `now` counts as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// Whether the token is no longer usable right now.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
