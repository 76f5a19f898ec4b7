//! Persistent client-side key/value storage.
//!
//! This is the client's equivalent of browser-local storage: a small string
//! map that survives restarts. Only the keys in [`keys`] are ever written.
//!
//! Implementations:
//! - [`MemoryStorage`] - process-local map for tests and throwaway sessions
//! - [`FileStorage`] - JSON file on disk, used by the CLI

mod file;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

pub use file::FileStorage;

/// Storage keys.
pub mod keys {
    /// Key for the anonymous visitor's guest session id.
    pub const GUEST_SESSION_ID: &str = "guestSessionId";

    /// Key for the bearer token of the logged-in user.
    pub const AUTH_TOKEN: &str = "authToken";

    /// Key for the chatbot conversation id.
    pub const CHAT_SESSION_ID: &str = "chatSessionId";
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a JSON string map.
    #[error("storage file is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Abstraction over persistent client storage.
///
/// Removing a missing key is not an error.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// Read a value.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage.
///
/// Each instance is its own storage scope.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage scope pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl LocalStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(keys::AUTH_TOKEN).await.unwrap(), None);

        storage.set(keys::AUTH_TOKEN, "abc").await.unwrap();
        assert_eq!(
            storage.get(keys::AUTH_TOKEN).await.unwrap().as_deref(),
            Some("abc")
        );

        storage.remove(keys::AUTH_TOKEN).await.unwrap();
        storage.remove(keys::AUTH_TOKEN).await.unwrap();
        assert_eq!(storage.get(keys::AUTH_TOKEN).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_storage_with_entries() {
        let storage = MemoryStorage::with_entries([(keys::GUEST_SESSION_ID, "g-1")]);
        assert_eq!(
            storage.get(keys::GUEST_SESSION_ID).await.unwrap().as_deref(),
            Some("g-1")
        );
    }
}
