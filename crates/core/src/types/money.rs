//! Decimal money amounts.
//!
//! The backend sends prices as JSON floats in Argentine pesos. Amounts are held
//! as [`Decimal`] so subtotals add up exactly, and displayed the way the
//! storefront shows them: whole pesos with `.` as the thousands separator.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes accepted by the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    ARS,
    USD,
}

impl CurrencyCode {
    /// Three-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ARS => "ARS",
            Self::USD => "USD",
        }
    }
}

/// An amount with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (pesos, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create an amount in Argentine pesos.
    #[must_use]
    pub const fn ars(amount: Decimal) -> Self {
        Self {
            amount,
            currency_code: CurrencyCode::ARS,
        }
    }

    /// Zero pesos.
    #[must_use]
    pub const fn zero() -> Self {
        Self::ars(Decimal::ZERO)
    }
}

impl std::fmt::Display for Money {
    /// Formats as `$ 10.000` (no decimals, half away from zero).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = self
            .amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = rounded.abs().trunc().to_string();
        write!(f, "{sign}$ {}", group_thousands(&digits))
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
