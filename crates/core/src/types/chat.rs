//! Shopping-assistant chatbot wire models.

use serde::{Deserialize, Serialize};

use super::id::ChatSessionId;

/// Body of `POST /chatbot/query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatQuery {
    #[serde(rename = "sesion_id")]
    pub session_id: ChatSessionId,
    #[serde(rename = "pregunta")]
    pub question: String,
}

/// The assistant's answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    #[serde(rename = "respuesta")]
    pub answer: String,
}
