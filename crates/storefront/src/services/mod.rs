//! Client-side services.
//!
//! # Services
//!
//! - `guest` - Persisted anonymous cart identity
//! - `auth` - Login, logout, stored-token check and the auth state machine
//! - `cart` - Shared cart cache kept in sync with the server
//! - `notify` - Transient notifications for the UI

pub mod auth;
pub mod cart;
pub mod guest;
pub mod notify;

pub use auth::{AuthError, AuthStore};
pub use cart::{CartError, CartSynchronizer};
pub use guest::GuestIdentityStore;
pub use notify::{Notification, NotificationLevel, Notifier};
