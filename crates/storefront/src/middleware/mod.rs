//! Request-side plumbing shared by the API clients.
//!
//! - [`identity`] - picks the identity header for each outgoing request
//! - [`auth`] - route guards that wait for the auth check to settle

pub mod auth;
pub mod identity;

pub use auth::{GuardDecision, LOGIN_PATH, Requirement, RouteGuard};
pub use identity::{GUEST_SESSION_HEADER, IdentityResolver, RequestIdentity};
