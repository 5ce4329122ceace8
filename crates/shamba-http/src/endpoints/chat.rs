//! AI assistant chat.
//!
//! These routes are auth-optional: a 401 from them is returned to the
//! caller but leaves the session in place.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use shamba_core::{Envelope, Result};

use crate::client::ApiClient;
use crate::request::ApiRequest;

/// POST: send a message to the assistant.
pub const CHAT: &str = "/api/chat";

/// GET: previous turns of the conversation.
pub const CHAT_HISTORY: &str = "/api/chat/history";

/// A message to the assistant.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub message: String,
    /// Reply language, `en` or `sw`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl ChatMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            language: None,
            conversation_id: None,
        }
    }

    pub fn in_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn in_conversation(mut self, id: impl Into<String>) -> Self {
        self.conversation_id = Some(id.into());
        self
    }
}

/// The assistant's answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    #[serde(alias = "response")]
    pub reply: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// One turn of a stored conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ApiClient {
    /// Ask the assistant a question.
    #[instrument(skip(self, message))]
    pub async fn send_chat(&self, message: &ChatMessage) -> Result<ChatReply> {
        let request = ApiRequest::post(CHAT).json(message)?;
        let envelope: Envelope<ChatReply> = self.request_as(request).await?;
        envelope.into_data()
    }

    /// Fetch the stored conversation.
    #[instrument(skip(self))]
    pub async fn chat_history(&self) -> Result<Vec<ChatTurn>> {
        let envelope: Envelope<Vec<ChatTurn>> =
            self.request_as(ApiRequest::get(CHAT_HISTORY)).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}
