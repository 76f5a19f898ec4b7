//! Guest identity store.
//!
//! The guest session id is the cart identity of anonymous visitors. It is
//! created on first use, persisted, and then never changes for the life of
//! the storage scope; logging in or out does not touch it.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};
use void_core::GuestSessionId;

use crate::storage::{LocalStorage, StorageError, keys};

/// Reads, and on first use creates, the persisted guest session id.
#[derive(Clone)]
pub struct GuestIdentityStore {
    inner: Arc<GuestIdentityInner>,
}

struct GuestIdentityInner {
    storage: Arc<dyn LocalStorage>,
    // Serializes read-or-create so concurrent first calls agree on one id
    create_lock: Mutex<()>,
}

impl GuestIdentityStore {
    /// Create a store over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            inner: Arc::new(GuestIdentityInner {
                storage,
                create_lock: Mutex::new(()),
            }),
        }
    }

    /// Return the persisted guest id, creating and persisting one if absent.
    ///
    /// A stored value that isn't a UUID is replaced.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if storage can't be read or written.
    pub async fn get_or_create(&self) -> Result<GuestSessionId, StorageError> {
        let _guard = self.inner.create_lock.lock().await;

        if let Some(raw) = self.inner.storage.get(keys::GUEST_SESSION_ID).await? {
            match raw.parse::<GuestSessionId>() {
                Ok(id) => return Ok(id),
                Err(e) => warn!(error = %e, stored = %raw, "Replacing malformed guest session id"),
            }
        }

        let id = GuestSessionId::generate();
        self.inner
            .storage
            .set(keys::GUEST_SESSION_ID, &id.to_string())
            .await?;
        info!(guest_session_id = %id, "Created guest session");
        Ok(id)
    }

    /// Return the persisted guest id without creating one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if storage can't be read.
    pub async fn peek(&self) -> Result<Option<GuestSessionId>, StorageError> {
        let raw = self.inner.storage.get(keys::GUEST_SESSION_ID).await?;
        Ok(raw.and_then(|raw| raw.parse().ok()))
    }
}

impl std::fmt::Debug for GuestIdentityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuestIdentityStore").finish_non_exhaustive()
    }
}
