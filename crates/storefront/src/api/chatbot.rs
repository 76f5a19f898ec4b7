//! Shopping-assistant chatbot.
//!
//! The conversation is keyed by its own persisted [`ChatSessionId`], separate
//! from the cart identity, so the backend can replay earlier turns. Requests
//! are still decorated with the visitor's identity like every other call.

use std::sync::Arc;

use reqwest::Method;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use void_core::{ChatQuery, ChatResponse, ChatSessionId};

use super::{ApiClient, ApiError};
use crate::middleware::IdentityResolver;
use crate::storage::{LocalStorage, StorageError, keys};

/// Errors from chatbot queries.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Blank questions are not sent.
    #[error("question is empty")]
    EmptyQuestion,

    /// Backend request failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// The conversation or guest id couldn't be read or created.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ChatError {
    /// Message suitable for showing in the chat window.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyQuestion => "Escribí una pregunta.".to_string(),
            Self::Api(_) | Self::Storage(_) => {
                "Disculpá, estoy teniendo problemas para conectarme.".to_string()
            }
        }
    }
}

/// Client for `POST /chatbot/query`.
///
/// Cheaply cloneable; clones share the conversation id.
#[derive(Clone)]
pub struct ChatbotClient {
    inner: Arc<ChatbotInner>,
}

struct ChatbotInner {
    api: ApiClient,
    identity: IdentityResolver,
    storage: Arc<dyn LocalStorage>,
    create_lock: Mutex<()>,
}

impl ChatbotClient {
    #[must_use]
    pub fn new(api: ApiClient, identity: IdentityResolver, storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            inner: Arc::new(ChatbotInner {
                api,
                identity,
                storage,
                create_lock: Mutex::new(()),
            }),
        }
    }

    /// The persisted conversation id, created on first use.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if storage can't be read or written.
    pub async fn session_id(&self) -> Result<ChatSessionId, StorageError> {
        let _guard = self.inner.create_lock.lock().await;

        if let Some(raw) = self.inner.storage.get(keys::CHAT_SESSION_ID).await? {
            match raw.parse::<ChatSessionId>() {
                Ok(id) => return Ok(id),
                Err(e) => warn!(error = %e, "Replacing malformed chat session id"),
            }
        }

        let id = ChatSessionId::generate();
        self.inner
            .storage
            .set(keys::CHAT_SESSION_ID, &id.to_string())
            .await?;
        info!(chat_session_id = %id, "Started chat session");
        Ok(id)
    }

    /// Ask the assistant a question.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyQuestion` for blank input (nothing is sent),
    /// otherwise the storage or request failure.
    #[instrument(skip(self, question))]
    pub async fn query(&self, question: &str) -> Result<String, ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        let body = ChatQuery {
            session_id: self.session_id().await?,
            question: question.to_string(),
        };
        let request = self
            .inner
            .api
            .request(Method::POST, "chatbot/query")?
            .json(&body);
        let request = self.inner.identity.decorate(request).await?;

        let response: ChatResponse = self.inner.api.send_json(request).await?;
        Ok(response.answer)
    }
}

impl std::fmt::Debug for ChatbotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatbotClient")
            .field("api", &self.inner.api)
            .finish_non_exhaustive()
    }
}
