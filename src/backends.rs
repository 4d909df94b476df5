//! Preset configurations for the supported backends.
//!
//! Each preset carries the service's real origin, endpoint layout, and the
//! user-facing message wording for every failure class.

use crate::bot::BackendConfig;

/// Kimi webapp (kimi.com).
pub fn kimi() -> BackendConfig {
    BackendConfig::new("Kimi (webapp)", "https://www.kimi.com/").with_messages(
        "Kimi webapp not available in your country",
        "There is no logged-in Kimi account in this browser.",
        "Conversation not found. Please try again.",
    )
}

/// MiniMax agent webapp (agent.minimax.io).
pub fn minimax() -> BackendConfig {
    BackendConfig::new("MiniMax (webapp)", "https://agent.minimax.io/").with_messages(
        "MiniMax webapp not available in your country",
        "There is no logged-in MiniMax account in this browser.",
        "Conversation not found. Please try again.",
    )
}
