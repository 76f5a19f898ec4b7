//! Command implementations.
//!
//! Each command works against a fully initialized [`void_storefront::Storefront`]:
//! the stored session has been checked and the cart loaded before it runs.

pub mod account;
pub mod admin;
pub mod cart;
pub mod chat;
pub mod output;
pub mod products;
