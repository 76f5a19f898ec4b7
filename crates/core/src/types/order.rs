//! Checkout, order history and back-office metrics.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, VariantId};
use super::money::Money;

/// Payment-gateway preference created for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPreference {
    /// Gateway-side preference id.
    pub preference_id: String,
    /// URL the buyer is sent to in order to pay.
    pub init_point: String,
}

/// One purchased line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "variante_producto_id")]
    pub variant_id: VariantId,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    /// Unit price frozen at purchase time.
    #[serde(rename = "precio_en_momento_compra", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Buyer's user id (string form).
    #[serde(rename = "usuario_id")]
    pub user_id: String,
    #[serde(rename = "monto_total", with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
    #[serde(rename = "estado_pago", default)]
    pub payment_status: Option<String>,
    #[serde(rename = "creado_en")]
    pub created_at: NaiveDateTime,
    #[serde(rename = "detalles", default)]
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Total as displayable money.
    #[must_use]
    pub const fn total_money(&self) -> Money {
        Money::ars(self.total)
    }
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiMetrics {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_ticket: Decimal,
    pub total_orders: u64,
    pub total_users: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
}
