//! Back-office commands.
//!
//! The admin role is checked locally from the session before any request is
//! sent, and again by the backend.

use void_core::{NewExpense, NewVariant, ProductId, ProductUpdate, Role, UserId};
use void_storefront::{ClientError, Storefront};

use super::output;

pub async fn kpis(storefront: &Storefront) -> Result<(), ClientError> {
    let kpis = storefront.admin().kpis().await?;
    output::kpis(&kpis);
    Ok(())
}

pub async fn users(storefront: &Storefront) -> Result<(), ClientError> {
    let users = storefront.admin().users().await?;
    output::users(&users);
    Ok(())
}

pub async fn set_role(storefront: &Storefront, user_id: &str, role: Role) -> Result<(), ClientError> {
    let profile = storefront
        .admin()
        .update_user_role(&UserId::new(user_id), role)
        .await?;
    tracing::info!(user_id = %profile.id, role = %profile.role, "Role updated");
    output::line(&format!("{} ahora es {}", profile.email, profile.role));
    Ok(())
}

pub async fn sales(storefront: &Storefront) -> Result<(), ClientError> {
    let orders = storefront.admin().sales().await?;
    output::orders(&orders);
    Ok(())
}

pub async fn product_metrics(storefront: &Storefront) -> Result<(), ClientError> {
    let metrics = storefront.admin().product_metrics().await?;
    output::product_metrics(&metrics);
    Ok(())
}

pub async fn charts(storefront: &Storefront) -> Result<(), ClientError> {
    let admin = storefront.admin();
    let (sales, expenses) = tokio::try_join!(admin.sales_over_time(), admin.expenses_by_category())?;
    output::sales_series(&sales);
    output::expense_breakdown(&expenses);
    Ok(())
}

pub async fn expenses(storefront: &Storefront) -> Result<(), ClientError> {
    let expenses = storefront.admin().expenses().await?;
    output::expenses(&expenses);
    Ok(())
}

pub async fn add_expense(storefront: &Storefront, expense: &NewExpense) -> Result<(), ClientError> {
    if expense.amount.is_sign_negative() {
        return Err(ClientError::BadRequest(
            "El monto no puede ser negativo.".to_string(),
        ));
    }
    let created = storefront.admin().create_expense(expense).await?;
    output::line(&format!(
        "Gasto #{} registrado: {} ({})",
        created.id,
        created.description,
        created.amount_money()
    ));
    Ok(())
}

pub async fn update_product(
    storefront: &Storefront,
    id: ProductId,
    update: &ProductUpdate,
) -> Result<(), ClientError> {
    let product = storefront.admin().update_product(id, update).await?;
    output::product_detail(&product);
    Ok(())
}

pub async fn add_variant(
    storefront: &Storefront,
    id: ProductId,
    variant: &NewVariant,
) -> Result<(), ClientError> {
    let created = storefront.admin().add_variant(id, variant).await?;
    output::line(&format!(
        "Variante {} agregada: talle {} / {}",
        created.id, created.size, created.color
    ));
    Ok(())
}

pub async fn delete_product(storefront: &Storefront, id: ProductId) -> Result<(), ClientError> {
    storefront.admin().delete_product(id).await?;
    output::line(&format!("Producto {id} eliminado."));
    Ok(())
}
