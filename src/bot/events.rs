//! Caller-visible events emitted while a turn streams.

use serde::{Deserialize, Serialize};

/// Events delivered to the `send_message` event sink.
///
/// There is no error variant: failures are returned as `Err` from
/// `send_message` and never reach the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BotEvent {
    /// Cumulative assistant text so far, leading whitespace trimmed.
    UpdateAnswer { text: String },
    /// The turn completed successfully; no further events follow.
    Done,
}
