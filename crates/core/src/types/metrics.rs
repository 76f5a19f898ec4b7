//! Back-office expenses, metrics and chart series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ExpenseId;
use super::money::Money;

/// A recorded business expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "monto", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
}

impl Expense {
    /// Amount as displayable money.
    #[must_use]
    pub const fn amount_money(&self) -> Money {
        Money::ars(self.amount)
    }
}

/// Body of `POST /admin/expenses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewExpense {
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "monto", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
}

/// Catalog highlights. Each name is absent when there is no data yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetrics {
    #[serde(default)]
    pub most_sold_product: Option<String>,
    #[serde(default)]
    pub product_with_most_stock: Option<String>,
    #[serde(default)]
    pub category_with_most_products: Option<String>,
}

/// Revenue of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesPoint {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Total expenses of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategoryPoint {
    /// `None` groups expenses recorded without a category.
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "monto", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// A chart series as the backend wraps it: `{"data": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart<T> {
    pub data: Vec<T>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_deserializes_backend_shape() {
        let expense: Expense = serde_json::from_str(
            r#"{"id": 3, "descripcion": "Envíos", "monto": 12500.5, "categoria": "logística", "fecha": "2026-10-01"}"#,
        )
        .unwrap();
        assert_eq!(expense.id, ExpenseId::new(3));
        assert_eq!(expense.amount, Decimal::new(125_005, 1));
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
    }

    #[test]
    fn test_new_expense_omits_missing_category() {
        let expense = NewExpense {
            description: "Hosting".to_string(),
            amount: Decimal::new(9_000, 0),
            category: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
        };
        let json = serde_json::to_value(&expense).unwrap();
        assert!(json.get("categoria").is_none());
        assert_eq!(json["fecha"], "2026-10-02");
    }

    #[test]
    fn test_sales_chart_unwraps_data() {
        let chart: Chart<SalesPoint> = serde_json::from_str(
            r#"{"data": [{"fecha": "2026-10-01", "total": 30000.0}, {"fecha": "2026-10-02", "total": 0}]}"#,
        )
        .unwrap();
        assert_eq!(chart.data.len(), 2);
        assert_eq!(chart.data.first().unwrap().total, Decimal::new(30_000, 0));
    }

    #[test]
    fn test_product_metrics_tolerate_nulls() {
        let metrics: ProductMetrics = serde_json::from_str(
            r#"{"most_sold_product": "N/A", "product_with_most_stock": null, "category_with_most_products": "Remeras"}"#,
        )
        .unwrap();
        assert_eq!(metrics.most_sold_product.as_deref(), Some("N/A"));
        assert!(metrics.product_with_most_stock.is_none());
    }
}
