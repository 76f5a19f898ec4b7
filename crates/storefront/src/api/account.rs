//! Account endpoints: login, profile and registration.
//!
//! These are raw calls. Session bookkeeping lives in
//! [`crate::services::AuthStore`].

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;
use void_core::{Email, Registration, UserProfile};

use super::{ApiClient, ApiError};

/// Body of a successful `POST /auth/login`.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

impl ApiClient {
    /// Exchange credentials for a bearer token.
    ///
    /// The backend follows the OAuth2 password flow, so credentials are sent
    /// form-encoded with the email as `username`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for wrong credentials, or any other
    /// `ApiError` if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &SecretString) -> Result<SecretString, ApiError> {
        let request = self.request(Method::POST, "auth/login")?.form(&[
            ("username", email.as_str()),
            ("password", password.expose_secret()),
        ]);
        let response: TokenResponse = self.send_json(request).await?;

        if let Some(token_type) = response.token_type.as_deref()
            && !token_type.eq_ignore_ascii_case("bearer")
        {
            tracing::warn!(token_type, "Unexpected token type from login");
        }

        Ok(SecretString::from(response.access_token))
    }

    /// Fetch the profile of the token's owner.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the backend rejects the token, or
    /// any other `ApiError` if the request fails.
    #[instrument(skip_all)]
    pub async fn me(&self, token: &SecretString) -> Result<UserProfile, ApiError> {
        let request = self
            .request(Method::GET, "auth/me")?
            .bearer_auth(token.expose_secret());
        self.send_json(request).await
    }

    /// Create a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` (400) if the email is already registered, or
    /// any other `ApiError` if the request fails.
    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        let request = self.request(Method::POST, "auth/register")?.json(registration);
        self.send_json(request).await
    }
}
