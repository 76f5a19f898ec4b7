//! Core types for the VOID storefront.
//!
//! This module provides type-safe wrappers and wire models for the VOID
//! backend's resources.

pub mod cart;
pub mod chat;
pub mod claims;
pub mod email;
pub mod id;
pub mod metrics;
pub mod money;
pub mod order;
pub mod product;
pub mod role;
pub mod user;

pub use cart::{Cart, CartItem};
pub use chat::{ChatQuery, ChatResponse};
pub use claims::TokenClaims;
pub use email::{Email, EmailError};
pub use id::*;
pub use metrics::{Chart, Expense, ExpenseCategoryPoint, NewExpense, ProductMetrics, SalesPoint};
pub use money::{CurrencyCode, Money};
pub use order::{CheckoutPreference, KpiMetrics, Order, OrderLine};
pub use product::{NewVariant, Product, ProductFilter, ProductSort, ProductUpdate, ProductVariant};
pub use role::Role;
pub use user::{Phone, Registration, UserProfile};
