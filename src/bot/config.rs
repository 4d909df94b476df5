//! Per-backend configuration.
//!
//! Every backend follows the same session/turn/stream shape; what differs
//! is captured here as data, not code: where to POST, what the backend is
//! called, and the message wording for each failure class.

/// Configuration record for one backend service.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Human-readable backend label, e.g. "Kimi (webapp)".
    pub name: String,
    /// Backend origin with trailing slash, e.g. "https://www.kimi.com/".
    /// Also the subject of the host-permission check.
    pub origin: String,
    /// Path of the session-initiation endpoint, relative to the origin.
    pub init_path: String,
    /// Path of the turn endpoint, relative to the origin.
    pub chat_path: String,
    /// Message for network-level session-initiation failure.
    pub unavailable_message: String,
    /// Message for 401/403 on initiation or turn.
    pub unauthorized_message: String,
    /// Message for 404 on a turn.
    pub not_found_message: String,
    /// When true, an explicit error payload in the event stream fails the
    /// turn instead of being skipped. Default false (original behavior).
    pub fail_on_stream_error: bool,
}

impl BackendConfig {
    /// Create a config with the standard endpoint layout and generic
    /// messages. Presets in `crate::backends` override the wording.
    pub fn new(name: impl Into<String>, origin: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            origin: origin.into(),
            init_path: "api/chat/conversations".to_string(),
            chat_path: "api/chat".to_string(),
            unavailable_message: format!("{} is not available", name),
            unauthorized_message: format!("There is no logged-in {} account in this browser.", name),
            not_found_message: "Conversation not found. Please try again.".to_string(),
            fail_on_stream_error: false,
            name,
        }
    }

    /// Override the failure-class messages.
    pub fn with_messages(
        mut self,
        unavailable: impl Into<String>,
        unauthorized: impl Into<String>,
        not_found: impl Into<String>,
    ) -> Self {
        self.unavailable_message = unavailable.into();
        self.unauthorized_message = unauthorized.into();
        self.not_found_message = not_found.into();
        self
    }

    /// Surface backend-reported stream errors instead of skipping them.
    pub fn with_fail_on_stream_error(mut self, fail: bool) -> Self {
        self.fail_on_stream_error = fail;
        self
    }

    /// Resolve a path against the origin.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.origin.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// URL of the session-initiation endpoint.
    pub fn init_url(&self) -> String {
        self.url(&self.init_path)
    }

    /// URL of the turn endpoint.
    pub fn chat_url(&self) -> String {
        self.url(&self.chat_path)
    }

    /// URL of a specific conversation resource.
    pub fn conversation_url(&self, conversation_id: &str) -> String {
        format!("{}/{}", self.init_url(), conversation_id)
    }
}
