//! Back-office calls.
//!
//! All of them need an admin session. The role is checked from the token
//! claims before anything is sent; the backend enforces it again.
//!
//! Product mutations drop the catalog cache so the next read sees them.

use reqwest::{Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{info, instrument};
use void_core::{
    Chart, Expense, ExpenseCategoryPoint, KpiMetrics, NewExpense, NewVariant, Order, Product,
    ProductId, ProductMetrics, ProductUpdate, ProductVariant, Role, SalesPoint, UserId, UserProfile,
};

use super::{ApiClient, ApiError, CatalogClient};
use crate::services::AuthStore;

#[derive(Serialize)]
struct RoleUpdate {
    role: Role,
}

/// Client for `/admin/*`.
#[derive(Debug, Clone)]
pub struct AdminClient {
    api: ApiClient,
    auth: AuthStore,
    catalog: CatalogClient,
}

impl AdminClient {
    #[must_use]
    pub const fn new(api: ApiClient, auth: AuthStore, catalog: CatalogClient) -> Self {
        Self { api, auth, catalog }
    }

    /// Start an admin request, rejecting non-admins locally.
    async fn admin_request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let session = self
            .auth
            .active_session()
            .await
            .ok_or(ApiError::NotAuthenticated)?;
        if !session.role().is_admin() {
            return Err(ApiError::Forbidden(String::new()));
        }

        Ok(self
            .api
            .request(method, path)?
            .bearer_auth(session.token.expose_secret()))
    }

    /// Dashboard headline figures.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotAuthenticated` or `ApiError::Forbidden` without an
    /// admin session, otherwise the request failure.
    #[instrument(skip(self))]
    pub async fn kpis(&self) -> Result<KpiMetrics, ApiError> {
        let request = self.admin_request(Method::GET, "admin/metrics/kpis").await?;
        self.api.send_json(request).await
    }

    /// Best seller, best stocked product and largest category.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self))]
    pub async fn product_metrics(&self) -> Result<ProductMetrics, ApiError> {
        let request = self.admin_request(Method::GET, "admin/metrics/products").await?;
        self.api.send_json(request).await
    }

    /// Daily revenue, oldest day first.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self))]
    pub async fn sales_over_time(&self) -> Result<Vec<SalesPoint>, ApiError> {
        let request = self
            .admin_request(Method::GET, "admin/charts/sales-over-time")
            .await?;
        let chart: Chart<SalesPoint> = self.api.send_json(request).await?;
        Ok(chart.data)
    }

    /// Expense totals per category, largest first.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self))]
    pub async fn expenses_by_category(&self) -> Result<Vec<ExpenseCategoryPoint>, ApiError> {
        let request = self
            .admin_request(Method::GET, "admin/charts/expenses-by-category")
            .await?;
        let chart: Chart<ExpenseCategoryPoint> = self.api.send_json(request).await?;
        Ok(chart.data)
    }

    /// All recorded expenses.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self))]
    pub async fn expenses(&self) -> Result<Vec<Expense>, ApiError> {
        let request = self.admin_request(Method::GET, "admin/expenses").await?;
        self.api.send_json(request).await
    }

    /// Record an expense.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self, expense), fields(amount = %expense.amount))]
    pub async fn create_expense(&self, expense: &NewExpense) -> Result<Expense, ApiError> {
        let request = self
            .admin_request(Method::POST, "admin/expenses")
            .await?
            .json(expense);
        let created: Expense = self.api.send_json(request).await?;
        info!(expense_id = %created.id, "Expense recorded");
        Ok(created)
    }

    /// All registered users.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<UserProfile>, ApiError> {
        let request = self.admin_request(Method::GET, "admin/users").await?;
        self.api.send_json(request).await
    }

    /// Change a user's role.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self), fields(user_id = %user_id, role = %role))]
    pub async fn update_user_role(
        &self,
        user_id: &UserId,
        role: Role,
    ) -> Result<UserProfile, ApiError> {
        let request = self
            .admin_request(Method::PUT, &format!("admin/users/{user_id}"))
            .await?
            .json(&RoleUpdate { role });
        let profile: UserProfile = self.api.send_json(request).await?;
        info!("User role updated");
        Ok(profile)
    }

    /// Every order in the store.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self))]
    pub async fn sales(&self) -> Result<Vec<Order>, ApiError> {
        let request = self.admin_request(Method::GET, "admin/sales").await?;
        self.api.send_json(request).await
    }

    /// Apply a partial update to a product.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self, update), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        let request = self
            .admin_request(Method::PUT, &format!("admin/products/{id}"))
            .await?
            .json(update);
        let product: Product = self.api.send_json(request).await?;
        self.catalog.invalidate_all().await;
        info!("Product updated");
        Ok(product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let request = self
            .admin_request(Method::DELETE, &format!("admin/products/{id}"))
            .await?;
        self.api.send_empty(request).await?;
        self.catalog.invalidate_all().await;
        info!("Product deleted");
        Ok(())
    }

    /// Add a size/color variant to a product.
    ///
    /// # Errors
    ///
    /// See [`Self::kpis`].
    #[instrument(skip(self, variant), fields(product_id = %id))]
    pub async fn add_variant(
        &self,
        id: ProductId,
        variant: &NewVariant,
    ) -> Result<ProductVariant, ApiError> {
        let request = self
            .admin_request(Method::POST, &format!("products/{id}/variants"))
            .await?
            .json(variant);
        let created: ProductVariant = self.api.send_json(request).await?;
        self.catalog.invalidate_all().await;
        info!(variant_id = %created.id, "Variant added");
        Ok(created)
    }
}
