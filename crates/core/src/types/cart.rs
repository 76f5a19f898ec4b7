//! Cart wire model.
//!
//! The cart is a server-owned resource keyed by either a guest session id or a
//! user id. The client only ever holds a read-through copy of the server's
//! latest response; derived figures (subtotal, item count) are recomputed from
//! the items rather than trusted from elsewhere.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{GuestSessionId, UserId, VariantId};
use super::money::Money;

/// One line of the cart: a product variant and how many of it.
///
/// The same shape is sent as the body of `POST /cart/items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Variant being bought (size/color combination of a product).
    #[serde(rename = "variante_id")]
    pub variant_id: VariantId,
    /// Number of units; the backend rejects values below 1.
    pub quantity: u32,
    /// Price of a single unit at the time it was added.
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Product name shown in the cart.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Size label of the variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartItem {
    /// Create a cart line without size or image.
    #[must_use]
    pub fn new(
        variant_id: VariantId,
        quantity: u32,
        unit_price: Decimal,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            variant_id,
            quantity,
            unit_price,
            display_name: display_name.into(),
            size: None,
            image_url: None,
        }
    }

    /// Set the size label.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The visitor's cart as last returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Server document id; absent for carts that have never been stored.
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owner when the cart belongs to a registered user.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Owner when the cart belongs to an anonymous visitor.
    #[serde(default)]
    pub guest_session_id: Option<GuestSessionId>,
    /// Lines in insertion order.
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Last server-side modification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDateTime>,
}

impl Cart {
    /// An ownerless cart with no items.
    ///
    /// Used as the fallback whenever the server cart cannot be read.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Subtotal as displayable money.
    #[must_use]
    pub fn subtotal_money(&self) -> Money {
        Money::ars(self.subtotal())
    }

    /// Total units across all lines (the navbar badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Whether a line for `variant_id` exists.
    #[must_use]
    pub fn contains(&self, variant_id: VariantId) -> bool {
        self.items.iter().any(|item| item.variant_id == variant_id)
    }

    /// The line for `variant_id`, if any.
    #[must_use]
    pub fn item(&self, variant_id: VariantId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.variant_id == variant_id)
    }
}
