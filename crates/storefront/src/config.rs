//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `VOID_API_BASE_URL` - Backend REST API root (default: `http://localhost:8000/api`)
//! - `VOID_STORAGE_PATH` - File holding the persisted guest id and auth token
//!   (default: `.void/storage.json`)
//! - `VOID_CATALOG_CACHE_TTL_SECS` - Catalog cache time-to-live (default: 300)
//! - `VOID_CATALOG_CACHE_CAPACITY` - Catalog cache entry limit (default: 1000)
//!
//! No request timeout is configurable: a hung request only stalls the
//! operation waiting on it.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_STORAGE_PATH: &str = ".void/storage.json";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend API root. Always ends with `/` so relative joins keep the path.
    pub api_base_url: Url,
    /// Persistent storage file used by [`crate::storage::FileStorage`].
    pub storage_path: PathBuf,
    /// Catalog cache settings.
    pub catalog_cache: CatalogCacheConfig,
}

/// Catalog response cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCacheConfig {
    /// How long a cached product or listing stays valid.
    pub ttl: Duration,
    /// Maximum number of cached entries.
    pub capacity: u64,
}

impl Default for CatalogCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("VOID_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = parse_base_url(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("VOID_API_BASE_URL".to_string(), e))?;

        let storage_path = lookup("VOID_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        let ttl = parse_u64(&lookup, "VOID_CATALOG_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;
        let capacity = parse_u64(&lookup, "VOID_CATALOG_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;

        Ok(Self {
            api_base_url,
            storage_path,
            catalog_cache: CatalogCacheConfig {
                ttl: Duration::from_secs(ttl),
                capacity,
            },
        })
    }

    /// Configuration pointing at `base_url` with default everything else.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not an absolute http(s) URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let api_base_url = parse_base_url(base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("VOID_API_BASE_URL".to_string(), e))?;
        Ok(Self {
            api_base_url,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            catalog_cache: CatalogCacheConfig::default(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the API root, forcing a trailing slash.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

/// Parse an optional unsigned integer variable.
fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8000/api/");
        assert_eq!(config.storage_path, PathBuf::from(".void/storage.json"));
        assert_eq!(config.catalog_cache, CatalogCacheConfig::default());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("VOID_API_BASE_URL", "https://api.void.store/api")]))
                .unwrap();
        assert_eq!(
            config.api_base_url.join("cart/").unwrap().as_str(),
            "https://api.void.store/api/cart/"
        );
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let result = ClientConfig::from_lookup(lookup_from(&[("VOID_API_BASE_URL", "ftp://void.store")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "VOID_API_BASE_URL"));
    }

    #[test]
    fn test_rejects_unparseable_ttl() {
        let result =
            ClientConfig::from_lookup(lookup_from(&[("VOID_CATALOG_CACHE_TTL_SECS", "five minutes")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_cache_settings_override() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("VOID_CATALOG_CACHE_TTL_SECS", "60"),
            ("VOID_CATALOG_CACHE_CAPACITY", "10"),
            ("VOID_STORAGE_PATH", "/tmp/void.json"),
        ]))
        .unwrap();
        assert_eq!(config.catalog_cache.ttl, Duration::from_secs(60));
        assert_eq!(config.catalog_cache.capacity, 10);
        assert_eq!(config.storage_path, PathBuf::from("/tmp/void.json"));
    }
}
