//! Terminal rendering.
//!
//! The only module allowed to print; everything else logs through `tracing`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use void_core::{
    Cart, Expense, ExpenseCategoryPoint, KpiMetrics, Money, Order, Product, ProductMetrics,
    SalesPoint, UserProfile,
};
use void_storefront::models::AuthSession;
use void_storefront::services::{Notification, NotificationLevel};

pub fn notification(notification: &Notification) {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
        NotificationLevel::Info => "info",
    };
    eprintln!("[{tag}] {}", notification.message);
}

pub fn error(message: &str) {
    eprintln!("[error] {message}");
}

pub fn line(text: &str) {
    println!("{text}");
}

pub fn session(session: &AuthSession) {
    let profile = &session.profile;
    println!("{} <{}>", profile.full_name(), profile.email);
    println!("  role: {}", session.role());
    if let Some(expires) = session.expires_at() {
        println!("  session expires: {}", expires.format("%Y-%m-%d %H:%M UTC"));
    }
}

pub fn cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Tu carrito está vacío.");
        return;
    }

    for item in &cart.items {
        let size = item
            .size
            .as_deref()
            .map(|s| format!(" (talle {s})"))
            .unwrap_or_default();
        println!(
            "{:>3} x {}{size}  [variante {}]  {}",
            item.quantity,
            item.display_name,
            item.variant_id,
            Money::ars(item.line_total()),
        );
    }
    println!("{} productos, subtotal {}", cart.item_count(), cart.subtotal_money());
}

pub fn product_rows(products: &[Product]) {
    if products.is_empty() {
        println!("No se encontraron productos.");
        return;
    }
    for product in products {
        println!(
            "{:>5}  {:<40} {:>12}  stock {}",
            product.id,
            product.name,
            product.price_money().to_string(),
            product.stock,
        );
    }
}

pub fn product_detail(product: &Product) {
    println!("{} [{}]  {}", product.name, product.sku, product.price_money());
    if let Some(description) = &product.description {
        println!("  {description}");
    }
    if let Some(image) = product.primary_image() {
        println!("  imagen: {image}");
    }
    for variant in &product.variants {
        let availability = if variant.in_stock() {
            format!("{} en stock", variant.stock)
        } else {
            "sin stock".to_string()
        };
        println!(
            "  variante {:>5}: talle {} / {}  ({availability})",
            variant.id, variant.size, variant.color
        );
    }
}

pub fn orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("Todavía no hay órdenes.");
        return;
    }
    for order in orders {
        println!(
            "#{:<6} {}  {:>12}  {} / {}",
            order.id,
            order.created_at.format("%Y-%m-%d"),
            order.total_money().to_string(),
            order.status.as_deref().unwrap_or("-"),
            order.payment_status.as_deref().unwrap_or("-"),
        );
    }
}

pub fn users(users: &[UserProfile]) {
    for user in users {
        println!("{:<26} {:<32} {}", user.id, user.email, user.role);
    }
}

pub fn kpis(kpis: &KpiMetrics) {
    println!("Ingresos:       {}", Money::ars(kpis.total_revenue));
    println!("Ticket promedio {}", Money::ars(kpis.average_ticket));
    println!("Órdenes:        {}", kpis.total_orders);
    println!("Usuarios:       {}", kpis.total_users);
    println!("Gastos:         {}", Money::ars(kpis.total_expenses));
}

pub fn product_metrics(metrics: &ProductMetrics) {
    println!("Más vendido:          {}", metrics.most_sold_product.as_deref().unwrap_or("-"));
    println!("Más stock:            {}", metrics.product_with_most_stock.as_deref().unwrap_or("-"));
    println!(
        "Categoría más grande: {}",
        metrics.category_with_most_products.as_deref().unwrap_or("-")
    );
}

pub fn expenses(expenses: &[Expense]) {
    if expenses.is_empty() {
        println!("No hay gastos registrados.");
        return;
    }
    for expense in expenses {
        println!(
            "#{:<5} {}  {:>12}  {:<16} {}",
            expense.id,
            expense.date,
            expense.amount_money().to_string(),
            expense.category.as_deref().unwrap_or("-"),
            expense.description,
        );
    }
}

pub fn sales_series(points: &[SalesPoint]) {
    println!("Ventas por día:");
    for point in points {
        println!("  {}  {:>12}", point.date, Money::ars(point.total).to_string());
    }
}

pub fn expense_breakdown(points: &[ExpenseCategoryPoint]) {
    println!("Gastos por categoría:");
    for point in points {
        println!(
            "  {:<16} {:>12}",
            point.category.as_deref().unwrap_or("sin categoría"),
            Money::ars(point.amount).to_string(),
        );
    }
}
