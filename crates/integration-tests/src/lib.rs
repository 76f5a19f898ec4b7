//! Integration tests for the VOID storefront client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p void-integration-tests
//! ```
//!
//! No external services are needed: [`FakeBackend`] serves the subset of the
//! VOID REST API the client uses from an in-process axum router on an
//! ephemeral port, and records the identity headers of every request so tests
//! can assert exactly what went over the wire.
//!
//! # Test Categories
//!
//! - `guest_identity` - Guest id creation and persistence
//! - `identity_headers` - Bearer vs guest header selection across login/logout
//! - `auth_lifecycle` - Login, stored-token restore, expiry, route guards
//! - `cart_sync` - Cart cache semantics, fallbacks, checkout and catalog
//! - `chatbot` - Assistant queries, conversation id and identity decoration
//! - `admin` - Back-office reports, expenses and catalog edits

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Form, Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::{Duration, NaiveDateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use void_core::{
    CartItem, Chart, Expense, ExpenseCategoryPoint, ExpenseId, Product, ProductId,
    ProductMetrics, ProductVariant, Role, TokenClaims, UserId, VariantId,
};
use void_storefront::Storefront;
use void_storefront::config::ClientConfig;
use void_storefront::storage::LocalStorage;

/// Secret the fake signs tokens with. The client never sees it.
const SIGNING_SECRET: &[u8] = b"fake-backend-signing-secret";

/// Lower-cased guest header, as axum normalizes header names.
const GUEST_HEADER: &str = "x-guest-session-id";

type Failure = (StatusCode, Json<Value>);

fn failure(status: StatusCode, detail: &str) -> Failure {
    (status, Json(json!({ "detail": detail })))
}

// =============================================================================
// Recorded traffic
// =============================================================================

/// Identity headers seen on one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Full `Authorization` header value, if sent.
    pub authorization: Option<String>,
    /// `X-Guest-Session-ID` header value, if sent.
    pub guest_session: Option<String>,
}

impl RecordedRequest {
    /// Whether this was a request to a cart endpoint.
    #[must_use]
    pub fn is_cart(&self) -> bool {
        self.path.starts_with("/api/cart")
    }

    /// Whether the request carried a bearer token.
    #[must_use]
    pub fn has_bearer(&self) -> bool {
        self.authorization
            .as_deref()
            .is_some_and(|v| v.starts_with("Bearer "))
    }
}

/// Who a server-side cart belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CartOwner {
    User(String),
    Guest(String),
}

#[derive(Debug, Clone)]
struct FakeUser {
    id: String,
    email: String,
    password: String,
    name: String,
    last_name: String,
    role: Role,
}

impl FakeUser {
    fn profile(&self) -> Value {
        json!({
            "_id": self.id,
            "email": self.email,
            "name": self.name,
            "last_name": self.last_name,
            "phone": null,
            "role": self.role,
        })
    }
}

#[derive(Debug, Clone)]
struct StoredCart {
    items: Vec<CartItem>,
    last_updated: NaiveDateTime,
}

impl Default for StoredCart {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            last_updated: Utc::now().naive_utc(),
        }
    }
}

#[derive(Default)]
struct BackendInner {
    users: Vec<FakeUser>,
    carts: HashMap<CartOwner, StoredCart>,
    products: HashMap<ProductId, Product>,
    requests: Vec<RecordedRequest>,
    expenses: Vec<Expense>,
    /// `sesion_id` of every chatbot query, in arrival order.
    chat_sessions: Vec<String>,
    failing_cart_fetches: usize,
    preferences_created: usize,
}

#[derive(Clone, Default)]
struct BackendState {
    inner: Arc<Mutex<BackendInner>>,
}

impl BackendState {
    fn lock(&self) -> MutexGuard<'_, BackendInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate a bearer header the way the real backend does.
    fn verify(&self, headers: &HeaderMap) -> Result<Option<TokenClaims>, Failure> {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Could not validate credentials"))?;

        let mut validation = Validation::default();
        validation.required_spec_claims.clear();
        jsonwebtoken::decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(SIGNING_SECRET),
            &validation,
        )
        .map(|data| Some(data.claims))
        .map_err(|_| failure(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }

    fn require_user(&self, headers: &HeaderMap) -> Result<FakeUser, Failure> {
        let claims = self
            .verify(headers)?
            .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Not authenticated"))?;
        self.lock()
            .users
            .iter()
            .find(|u| u.id == claims.user_id.as_str())
            .cloned()
            .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }

    fn require_admin(&self, headers: &HeaderMap) -> Result<FakeUser, Failure> {
        let user = self.require_user(headers)?;
        if !user.role.is_admin() {
            return Err(failure(StatusCode::FORBIDDEN, "Not enough permissions"));
        }
        Ok(user)
    }

    fn cart_owner(&self, headers: &HeaderMap) -> Result<CartOwner, Failure> {
        if let Some(claims) = self.verify(headers)? {
            return Ok(CartOwner::User(claims.user_id.to_string()));
        }
        headers
            .get(GUEST_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| CartOwner::Guest(v.to_string()))
            .ok_or_else(|| {
                failure(
                    StatusCode::BAD_REQUEST,
                    "Se requiere sesión de usuario o de invitado.",
                )
            })
    }
}

fn render_cart(owner: &CartOwner, cart: &StoredCart) -> Value {
    let (user_id, guest_session_id) = match owner {
        CartOwner::User(id) => (Some(id.as_str()), None),
        CartOwner::Guest(id) => (None, Some(id.as_str())),
    };
    json!({
        "user_id": user_id,
        "guest_session_id": guest_session_id,
        "items": cart.items,
        "last_updated": cart.last_updated,
    })
}

fn issue(user: &FakeUser, ttl: Duration) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims {
        sub: user.email.clone(),
        user_id: UserId::new(user.id.clone()),
        role: user.role,
        exp: (Utc::now() + ttl).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SIGNING_SECRET),
    )
}

// =============================================================================
// Handlers
// =============================================================================

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn record(State(state): State<BackendState>, request: Request, next: Next) -> Response {
    // Every borrow of `request` ends here; `Body` is not `Sync`
    let recorded = {
        let headers = request.headers();
        RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            authorization: header_value(headers, AUTHORIZATION.as_str()),
            guest_session: header_value(headers, GUEST_HEADER),
        }
    };
    state.lock().requests.push(recorded);
    next.run(request).await
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(
    State(state): State<BackendState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<Value>, Failure> {
    let user = state
        .lock()
        .users
        .iter()
        .find(|u| u.email == form.username && u.password == form.password)
        .cloned()
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Email o contraseña incorrectos"))?;

    let token = issue(&user, Duration::hours(1))
        .map_err(|_| failure(StatusCode::INTERNAL_SERVER_ERROR, "token error"))?;
    Ok(Json(json!({ "access_token": token, "token_type": "bearer" })))
}

async fn me(State(state): State<BackendState>, headers: HeaderMap) -> Result<Json<Value>, Failure> {
    Ok(Json(state.require_user(&headers)?.profile()))
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    name: String,
    last_name: String,
    password: String,
}

async fn register(
    State(state): State<BackendState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    let mut inner = state.lock();
    if inner.users.iter().any(|u| u.email == body.email) {
        return Err(failure(StatusCode::BAD_REQUEST, "El email ya está registrado"));
    }
    let user = FakeUser {
        id: format!("{:024x}", inner.users.len() + 1),
        email: body.email,
        password: body.password,
        name: body.name,
        last_name: body.last_name,
        role: Role::User,
    };
    let profile = user.profile();
    inner.users.push(user);
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn get_cart(
    State(state): State<BackendState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Failure> {
    let owner = state.cart_owner(&headers)?;
    let mut inner = state.lock();
    if inner.failing_cart_fetches > 0 {
        inner.failing_cart_fetches -= 1;
        return Err(failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"));
    }
    let cart = inner.carts.get(&owner).cloned().unwrap_or_default();
    Ok(Json(render_cart(&owner, &cart)))
}

async fn add_item(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(item): Json<CartItem>,
) -> Result<Json<Value>, Failure> {
    if item.quantity == 0 {
        return Err(failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Input should be greater than 0",
        ));
    }
    let owner = state.cart_owner(&headers)?;
    let mut inner = state.lock();
    let cart = inner.carts.entry(owner.clone()).or_default();
    match cart.items.iter_mut().find(|i| i.variant_id == item.variant_id) {
        Some(existing) => existing.quantity += item.quantity,
        None => cart.items.push(item),
    }
    cart.last_updated = Utc::now().naive_utc();
    Ok(Json(render_cart(&owner, cart)))
}

async fn remove_item(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(variant_id): Path<i32>,
) -> Result<Json<Value>, Failure> {
    let owner = state.cart_owner(&headers)?;
    let mut inner = state.lock();
    let cart = inner.carts.entry(owner.clone()).or_default();
    cart.items.retain(|i| i.variant_id.as_i32() != variant_id);
    cart.last_updated = Utc::now().naive_utc();
    Ok(Json(render_cart(&owner, cart)))
}

async fn list_products(State(state): State<BackendState>) -> Json<Vec<Product>> {
    let mut products: Vec<Product> = state.lock().products.values().cloned().collect();
    products.sort_by_key(|p| p.id);
    Json(products)
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
}

async fn search_products(
    State(state): State<BackendState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Product>> {
    let needle = query.q.to_lowercase();
    let mut products: Vec<Product> = state
        .lock()
        .products
        .values()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    products.sort_by_key(|p| p.id);
    Json(products)
}

async fn get_product(
    State(state): State<BackendState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, Failure> {
    state
        .lock()
        .products
        .get(&ProductId::new(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Producto no encontrado"))
}

async fn create_preference(
    State(state): State<BackendState>,
    Json(cart): Json<Value>,
) -> Result<Json<Value>, Failure> {
    let has_items = cart
        .get("items")
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty());
    if !has_items {
        return Err(failure(StatusCode::BAD_REQUEST, "El carrito está vacío"));
    }

    let mut inner = state.lock();
    inner.preferences_created += 1;
    let id = format!("pref-{}", inner.preferences_created);
    Ok(Json(json!({
        "preference_id": id,
        "init_point": format!("https://www.mercadopago.com.ar/checkout/v1/redirect?pref_id={id}"),
    })))
}

async fn my_orders(
    State(state): State<BackendState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Failure> {
    state.require_user(&headers)?;
    Ok(Json(json!([])))
}

#[derive(Deserialize)]
struct ChatBody {
    sesion_id: String,
    pregunta: String,
}

async fn chatbot_query(
    State(state): State<BackendState>,
    Json(body): Json<ChatBody>,
) -> Json<Value> {
    state.lock().chat_sessions.push(body.sesion_id);
    Json(json!({ "respuesta": format!("Recibí: {}", body.pregunta) }))
}

async fn kpis(State(state): State<BackendState>, headers: HeaderMap) -> Result<Json<Value>, Failure> {
    state.require_admin(&headers)?;
    let inner = state.lock();
    let total_expenses: Decimal = inner.expenses.iter().map(|e| e.amount).sum();
    Ok(Json(json!({
        "total_revenue": 0.0,
        "average_ticket": 0.0,
        "total_orders": 0,
        "total_users": inner.users.len(),
        "total_expenses": total_expenses.to_f64().unwrap_or_default(),
    })))
}

async fn product_metrics(
    State(state): State<BackendState>,
    headers: HeaderMap,
) -> Result<Json<ProductMetrics>, Failure> {
    state.require_admin(&headers)?;
    let inner = state.lock();
    let most_stock = inner
        .products
        .values()
        .max_by_key(|p| (p.stock, std::cmp::Reverse(p.id)))
        .map(|p| p.name.clone());
    Ok(Json(ProductMetrics {
        most_sold_product: None,
        product_with_most_stock: most_stock,
        category_with_most_products: None,
    }))
}

async fn sales_over_time(
    State(state): State<BackendState>,
    headers: HeaderMap,
) -> Result<Json<Value>, Failure> {
    state.require_admin(&headers)?;
    Ok(Json(json!({ "data": [] })))
}

async fn expenses_by_category(
    State(state): State<BackendState>,
    headers: HeaderMap,
) -> Result<Json<Chart<ExpenseCategoryPoint>>, Failure> {
    state.require_admin(&headers)?;
    let inner = state.lock();
    let mut totals: HashMap<Option<String>, Decimal> = HashMap::new();
    for expense in &inner.expenses {
        *totals.entry(expense.category.clone()).or_default() += expense.amount;
    }
    let mut data: Vec<ExpenseCategoryPoint> = totals
        .into_iter()
        .map(|(category, amount)| ExpenseCategoryPoint { category, amount })
        .collect();
    data.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(Json(Chart { data }))
}

async fn list_expenses(
    State(state): State<BackendState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Expense>>, Failure> {
    state.require_admin(&headers)?;
    Ok(Json(state.lock().expenses.clone()))
}

async fn create_expense(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Result<(StatusCode, Json<Expense>), Failure> {
    state.require_admin(&headers)?;
    let mut inner = state.lock();
    let id = ExpenseId::new(i32::try_from(inner.expenses.len() + 1).unwrap_or(i32::MAX));
    if let Some(fields) = body.as_object_mut() {
        fields.insert("id".to_string(), json!(id));
    }
    let expense: Expense = serde_json::from_value(body)
        .map_err(|e| failure(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()))?;
    inner.expenses.push(expense.clone());
    Ok((StatusCode::CREATED, Json(expense)))
}

/// Apply a partial JSON update, field by field, like the backend's
/// `exclude_unset` update.
async fn update_product(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(patch): Json<Value>,
) -> Result<Json<Product>, Failure> {
    state.require_admin(&headers)?;
    let mut inner = state.lock();
    let product = inner
        .products
        .get_mut(&ProductId::new(id))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Producto no encontrado"))?;

    let mut current = serde_json::to_value(&*product)
        .map_err(|e| failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?;
    if let (Some(fields), Some(changes)) = (current.as_object_mut(), patch.as_object()) {
        for (key, value) in changes {
            fields.insert(key.clone(), value.clone());
        }
    }
    *product = serde_json::from_value(current)
        .map_err(|e| failure(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()))?;
    Ok(Json(product.clone()))
}

async fn delete_product(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<StatusCode, Failure> {
    state.require_admin(&headers)?;
    state
        .lock()
        .products
        .remove(&ProductId::new(id))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Producto no encontrado"))
}

#[derive(Deserialize)]
struct VariantBody {
    tamanio: String,
    color: String,
    cantidad_en_stock: u32,
}

async fn add_variant(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(body): Json<VariantBody>,
) -> Result<(StatusCode, Json<ProductVariant>), Failure> {
    state.require_admin(&headers)?;
    let mut inner = state.lock();
    let next_id = inner
        .products
        .values()
        .flat_map(|p| p.variants.iter().map(|v| v.id.as_i32()))
        .max()
        .unwrap_or(0)
        + 1;
    let product = inner
        .products
        .get_mut(&ProductId::new(id))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Producto no encontrado"))?;

    let variant = ProductVariant {
        id: VariantId::new(next_id),
        product_id: product.id,
        size: body.tamanio,
        color: body.color,
        stock: body.cantidad_en_stock,
    };
    product.variants.push(variant.clone());
    Ok((StatusCode::CREATED, Json(variant)))
}

// =============================================================================
// FakeBackend
// =============================================================================

/// In-process stand-in for the VOID REST backend.
///
/// The server task is aborted when the value is dropped.
pub struct FakeBackend {
    addr: SocketAddr,
    state: BackendState,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener can't be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = BackendState::default();

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/me", get(me))
            .route("/api/auth/register", post(register))
            .route("/api/cart/", get(get_cart))
            .route("/api/cart/items", post(add_item))
            .route("/api/cart/items/{variante_id}", delete(remove_item))
            .route("/api/products/", get(list_products))
            .route("/api/products/search", get(search_products))
            .route("/api/products/{id}", get(get_product))
            .route("/api/products/{id}/variants", post(add_variant))
            .route("/api/checkout/create_preference", post(create_preference))
            .route("/api/checkout/my-orders", get(my_orders))
            .route("/api/chatbot/query", post(chatbot_query))
            .route("/api/admin/metrics/kpis", get(kpis))
            .route("/api/admin/metrics/products", get(product_metrics))
            .route("/api/admin/charts/sales-over-time", get(sales_over_time))
            .route(
                "/api/admin/charts/expenses-by-category",
                get(expenses_by_category),
            )
            .route("/api/admin/expenses", get(list_expenses).post(create_expense))
            .route(
                "/api/admin/products/{id}",
                put(update_product).delete(delete_product),
            )
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            // Only returns on I/O failure; the test will notice via failed requests
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    /// API root to configure the client with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Client configuration pointing at this backend.
    ///
    /// # Panics
    ///
    /// Never in practice: the base URL is always a valid http URL.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::for_base_url(&self.base_url()).expect("fake backend URL is valid")
    }

    /// A storefront over `storage`, without the startup check.
    #[must_use]
    pub fn storefront(&self, storage: Arc<dyn LocalStorage>) -> Storefront {
        Storefront::new(self.client_config(), storage)
    }

    /// A storefront over `storage`, after the startup check and cart load.
    pub async fn init_storefront(&self, storage: Arc<dyn LocalStorage>) -> Storefront {
        Storefront::init(self.client_config(), storage).await
    }

    /// Register a user who can log in with `email` / `password`.
    pub fn add_user(&self, email: &str, password: &str, role: Role) -> UserId {
        let mut inner = self.state.lock();
        let id = format!("{:024x}", inner.users.len() + 1);
        inner.users.push(FakeUser {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
            name: "Ana".to_string(),
            last_name: "García".to_string(),
            role,
        });
        UserId::new(id)
    }

    /// Issue a token for a registered user, valid for `ttl` (negative for an
    /// already expired token).
    ///
    /// # Panics
    ///
    /// Panics if no user has `email`.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn issue_token(&self, email: &str, ttl: Duration) -> String {
        let user = self
            .state
            .lock()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .expect("user registered with add_user");
        issue(&user, ttl).expect("token encodes")
    }

    /// Add a catalog product.
    pub fn add_product(&self, product: Product) {
        self.state.lock().products.insert(product.id, product);
    }

    /// A catalog product as the backend currently stores it.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.state.lock().products.get(&id).cloned()
    }

    /// Conversation ids of the chatbot queries received so far.
    #[must_use]
    pub fn chat_sessions(&self) -> Vec<String> {
        self.state.lock().chat_sessions.clone()
    }

    /// Make the next `n` cart fetches answer 500.
    pub fn fail_cart_fetches(&self, n: usize) {
        self.state.lock().failing_cart_fetches = n;
    }

    /// Items of a server-side cart.
    #[must_use]
    pub fn cart_items(&self, owner: &CartOwner) -> Vec<CartItem> {
        self.state
            .lock()
            .carts
            .get(owner)
            .map(|c| c.items.clone())
            .unwrap_or_default()
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// Cart requests received so far.
    #[must_use]
    pub fn cart_requests(&self) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(RecordedRequest::is_cart).collect()
    }

    /// Forget recorded requests.
    pub fn clear_requests(&self) {
        self.state.lock().requests.clear();
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}
