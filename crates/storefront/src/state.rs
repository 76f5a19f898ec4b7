//! Client state shared across every surface of the storefront.

use std::sync::Arc;

use tracing::{info, instrument};
use void_core::{Cart, Registration, UserProfile};

use crate::api::{AdminClient, ApiClient, CatalogClient, ChatbotClient, CheckoutClient};
use crate::config::ClientConfig;
use crate::middleware::{IdentityResolver, RouteGuard};
use crate::models::{AuthSession, Credentials};
use crate::services::{AuthError, AuthStore, CartSynchronizer, GuestIdentityStore, Notifier};
use crate::storage::LocalStorage;

/// Storefront client state.
///
/// This struct is cheaply cloneable via `Arc` and wires the identity stores,
/// the cart cache and the API clients together around one storage scope.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: ClientConfig,
    api: ApiClient,
    storage: Arc<dyn LocalStorage>,
    guest: GuestIdentityStore,
    auth: AuthStore,
    identity: IdentityResolver,
    cart: CartSynchronizer,
    catalog: CatalogClient,
    checkout: CheckoutClient,
    chatbot: ChatbotClient,
    admin: AdminClient,
    guard: RouteGuard,
    notifier: Notifier,
}

impl Storefront {
    /// Wire up a storefront without touching the network.
    ///
    /// The auth state starts `Unknown`; call [`Self::init`] (or
    /// `auth().check_auth()`) before relying on it.
    #[must_use]
    pub fn new(config: ClientConfig, storage: Arc<dyn LocalStorage>) -> Self {
        let api = ApiClient::new(config.api_base_url.clone());
        let notifier = Notifier::new();
        let guest = GuestIdentityStore::new(Arc::clone(&storage));
        let auth = AuthStore::new(api.clone(), Arc::clone(&storage));
        let identity = IdentityResolver::new(auth.clone(), guest.clone());
        let cart = CartSynchronizer::new(api.clone(), identity.clone(), notifier.clone());
        let catalog = CatalogClient::new(api.clone(), config.catalog_cache);
        let checkout = CheckoutClient::new(api.clone(), identity.clone());
        let chatbot = ChatbotClient::new(api.clone(), identity.clone(), Arc::clone(&storage));
        let admin = AdminClient::new(api.clone(), auth.clone(), catalog.clone());
        let guard = RouteGuard::new(auth.clone());

        Self {
            inner: Arc::new(StorefrontInner {
                config,
                api,
                storage,
                guest,
                auth,
                identity,
                cart,
                catalog,
                checkout,
                chatbot,
                admin,
                guard,
                notifier,
            }),
        }
    }

    /// Wire up a storefront, restore the stored session and load the cart.
    #[instrument(skip_all, fields(api = %config.api_base_url))]
    pub async fn init(config: ClientConfig, storage: Arc<dyn LocalStorage>) -> Self {
        let storefront = Self::new(config, storage);
        let status = storefront.inner.auth.check_auth().await;
        let cart = storefront.inner.cart.fetch_cart().await;
        info!(%status, items = cart.items.len(), "Storefront ready");
        storefront
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Log in and reload the cart under the user's identity.
    ///
    /// # Errors
    ///
    /// Returns the `AuthError` from the login; an error notification is
    /// published as well.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        match self.inner.auth.login(credentials).await {
            Ok(session) => {
                self.inner.notifier.success("Inicio de sesión exitoso");
                self.inner.cart.fetch_cart().await;
                Ok(session)
            }
            Err(e) => {
                self.inner.notifier.error(e.user_message());
                Err(e)
            }
        }
    }

    /// Log out and reload the cart under the guest identity.
    ///
    /// The cached cart is emptied first so the user's items are never shown
    /// to the guest, even briefly.
    pub async fn logout(&self) -> Cart {
        self.inner.auth.logout().await;
        self.inner.cart.reset();
        let cart = self.inner.cart.fetch_cart().await;
        self.inner.notifier.info("Sesión cerrada");
        cart
    }

    /// Create an account. The visitor stays logged out.
    ///
    /// # Errors
    ///
    /// Returns the `AuthError` from the registration; an error notification
    /// is published as well.
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, AuthError> {
        let result = self.inner.auth.register(registration).await;
        match &result {
            Ok(_) => self
                .inner
                .notifier
                .success("Cuenta creada. Ya podés iniciar sesión."),
            Err(e) => self.inner.notifier.error(e.user_message()),
        }
        result
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the low-level API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get the storage scope.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn LocalStorage> {
        &self.inner.storage
    }

    #[must_use]
    pub fn guest(&self) -> &GuestIdentityStore {
        &self.inner.guest
    }

    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    #[must_use]
    pub fn identity(&self) -> &IdentityResolver {
        &self.inner.identity
    }

    #[must_use]
    pub fn cart(&self) -> &CartSynchronizer {
        &self.inner.cart
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutClient {
        &self.inner.checkout
    }

    #[must_use]
    pub fn chatbot(&self) -> &ChatbotClient {
        &self.inner.chatbot
    }

    #[must_use]
    pub fn admin(&self) -> &AdminClient {
        &self.inner.admin
    }

    #[must_use]
    pub fn guard(&self) -> &RouteGuard {
        &self.inner.guard
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }
}
