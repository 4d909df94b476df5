//! Conversation session state machine.
//!
//! The session is either absent or fully formed; a continuity token without
//! a conversation id is unrepresentable. Transitions:
//!
//! - `NoSession` → `Active` on successful session initiation
//! - `Active` → `NoSession` on auth failure, 404, or explicit reset
//! - `Active` → `Active` (token updated) on commit after a turn

/// State of one adapter's conversation with its backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversationState {
    /// No conversation established yet (or it was invalidated).
    #[default]
    NoSession,
    /// A live conversation thread on the backend.
    Active {
        /// Server-assigned opaque conversation identifier.
        conversation_id: String,
        /// Id of the last received message; empty until the first turn
        /// completes. The next turn attaches as this message's child.
        last_message_id: String,
    },
}

impl ConversationState {
    /// Enter the active state with a fresh conversation and no continuity
    /// token.
    pub fn activate(&mut self, conversation_id: impl Into<String>) {
        *self = ConversationState::Active {
            conversation_id: conversation_id.into(),
            last_message_id: String::new(),
        };
    }

    /// Discard the session. Idempotent.
    pub fn invalidate(&mut self) {
        *self = ConversationState::NoSession;
    }

    /// Update the continuity token after a successful turn.
    ///
    /// No-op when no session is present or `id` is empty: a commit racing a
    /// concurrent invalidation must not resurrect stale state.
    pub fn commit_message_id(&mut self, id: &str) {
        if id.is_empty() {
            return;
        }
        if let ConversationState::Active {
            last_message_id, ..
        } = self
        {
            *last_message_id = id.to_string();
        } else {
            tracing::debug!(message_id = id, "dropping commit for absent session");
        }
    }

    /// Whether a session is currently established.
    pub fn is_active(&self) -> bool {
        matches!(self, ConversationState::Active { .. })
    }

    /// The conversation id, if a session is established.
    pub fn conversation_id(&self) -> Option<&str> {
        match self {
            ConversationState::Active {
                conversation_id, ..
            } => Some(conversation_id),
            ConversationState::NoSession => None,
        }
    }

    /// The continuity token, if a session is established and a turn has
    /// completed.
    pub fn last_message_id(&self) -> Option<&str> {
        match self {
            ConversationState::Active {
                last_message_id, ..
            } if !last_message_id.is_empty() => Some(last_message_id),
            _ => None,
        }
    }
}
