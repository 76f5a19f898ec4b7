//! Low-level HTTP client for the VOID backend.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::{ApiError, extract_detail};

/// Client for the VOID REST API.
///
/// Cheaply cloneable; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client rooted at `base_url`.
    ///
    /// A missing trailing `/` is added, so `http://host/api` and
    /// `http://host/api/` both keep the `/api` prefix when endpoint paths are
    /// joined onto them.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            inner: Arc::new(ApiClientInner { http, base_url }),
        }
    }

    /// The API root.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an endpoint path against the API root.
    ///
    /// Leading slashes are ignored so `"/cart/"` and `"cart/"` both stay under
    /// the root's path.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the path cannot be joined.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Start a request to an endpoint, without any identity header.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the path cannot be joined.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.inner.http.request(method, self.url(path)?))
    }

    /// Send a request and decode a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` for transport failures, non-success statuses and
    /// bodies that don't decode as `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = Self::send(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse VOID API response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a request whose response body is irrelevant.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` for transport failures and non-success statuses.
    pub async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        Self::send(request).await.map(|_| ())
    }

    /// Send a request and return the raw body of a successful response.
    ///
    /// Transient failures are logged at `error`, everything else at `debug`.
    async fn send(request: RequestBuilder) -> Result<String, ApiError> {
        let result = Self::dispatch(request).await;
        if let Err(err) = &result {
            if err.is_transient() {
                tracing::error!(error = %err, "VOID API request failed");
            } else {
                tracing::debug!(error = %err, "VOID API rejected request");
            }
        }
        result
    }

    async fn dispatch(request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Read the body first so error responses can be diagnosed
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let detail = extract_detail(&body);
        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized(detail)),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden(detail)),
            _ => Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            }),
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
