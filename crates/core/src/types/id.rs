//! Newtype IDs for type-safe entity references.
//!
//! Catalog and order entities live in the backend's relational store and use
//! integer keys; users live in its document store and use opaque string keys.
//! Guest and chatbot sessions are identified by client-generated UUIDs.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe integer ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Display`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use void_core::define_id;
/// define_id!(WishlistId);
/// define_id!(CouponId);
///
/// let wishlist = WishlistId::new(1);
/// let coupon = CouponId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: WishlistId = coupon;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i32>().map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(VariantId);
define_id!(OrderId);
define_id!(CategoryId);
define_id!(ExpenseId);

/// Identifier of a registered user.
///
/// The backend stores users in a document database, so ids are opaque
/// strings (hex object ids) rather than integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user id from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Define a random (v4) UUID identifier kept in client storage.
macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random (v4) id.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

define_uuid_id!(
    /// Anonymous cart identity.
    ///
    /// Generated once per storage scope and never regenerated, so a returning
    /// anonymous visitor keeps the same server-side cart.
    GuestSessionId
);

define_uuid_id!(
    /// Chatbot conversation identity.
    ///
    /// Independent of the cart identity; the backend keys the conversation
    /// history on it.
    ChatSessionId
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_id_display_and_parse() {
        let id: VariantId = "7".parse().unwrap();
        assert_eq!(id, VariantId::new(7));
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_variant_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&VariantId::new(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_guest_session_id_round_trips_through_string() {
        let id = GuestSessionId::generate();
        let parsed: GuestSessionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_chat_session_id_is_distinct_from_guest_id() {
        let chat = ChatSessionId::generate();
        let parsed: ChatSessionId = chat.to_string().parse().unwrap();
        assert_eq!(parsed, chat);
        assert_eq!(serde_json::to_string(&chat).unwrap(), format!("\"{chat}\""));
    }

    #[test]
    fn test_guest_session_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<GuestSessionId>().is_err());
    }

    #[test]
    fn test_generated_guest_ids_differ() {
        assert_ne!(GuestSessionId::generate(), GuestSessionId::generate());
    }
}
