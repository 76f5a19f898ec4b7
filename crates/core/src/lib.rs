//! VOID Core - Shared types library.
//!
//! This crate provides the types shared by every VOID client component:
//! - `storefront` - API client, identity resolution, and cart synchronization
//! - `cli` - Terminal front end over the storefront library
//! - `integration-tests` - Fake backend and end-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure computations - no I/O, no HTTP
//! clients, no persistent storage. Wire names follow the VOID backend's JSON
//! (Spanish field names are mapped to English Rust names with `serde` renames).
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email, roles, money, cart, catalog, orders,
//!   back-office metrics, chatbot, token claims

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
