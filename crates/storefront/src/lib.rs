//! VOID Storefront client library.
//!
//! Resolves which identity (guest or logged-in user) addresses the visitor's
//! cart, keeps one shared copy of that cart in sync with the VOID backend,
//! and exposes the catalog, checkout, account and admin endpoints.
//!
//! # Modules
//!
//! - [`config`] - Environment-based configuration
//! - [`storage`] - Persistent key/value storage (guest id, auth token)
//! - [`models`] - Auth state machine and session
//! - [`services`] - Guest and auth identity stores, cart synchronizer, notifications
//! - [`middleware`] - Request identity decoration and route guards
//! - [`api`] - Typed REST clients
//! - [`state`] - The [`Storefront`] container tying it all together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{ClientError, Result};
pub use state::Storefront;
