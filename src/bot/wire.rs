//! Wire types for the unofficial conversation API.
//!
//! Request bodies match what the backends' own web frontends send; response
//! shapes are deserialized leniently since the backend is not a stable
//! contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of the session-initiation POST.
#[derive(Debug, Clone, Serialize)]
pub struct NewConversation {
    /// Client-generated unique id for the new conversation.
    pub id: String,
}

impl NewConversation {
    /// Create a request with a fresh v4 UUID.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for NewConversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Successful session-initiation response. Only the id is consumed; the
/// rest of the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationCreated {
    /// Server-assigned conversation identifier.
    pub id: String,
}

/// Body of one turn POST.
#[derive(Debug, Clone, Serialize)]
pub struct TurnRequest {
    /// Conversation thread this turn belongs to.
    pub conversation_id: String,
    /// Continuity token: the message the new turn attaches to as a child.
    /// Omitted on the first turn of a conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_message_id: Option<String>,
    /// The user's prompt text.
    pub prompt: String,
}

impl TurnRequest {
    /// Build a turn request; an empty continuity token is omitted from the
    /// wire body.
    pub fn new(conversation_id: &str, last_message_id: &str, prompt: &str) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            parent_message_id: if last_message_id.is_empty() {
                None
            } else {
                Some(last_message_id.to_string())
            },
            prompt: prompt.to_string(),
        }
    }
}
