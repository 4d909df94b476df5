//! Stream decoder for one turn.
//!
//! Consumes the SSE data payloads of a successful turn response,
//! accumulates the assistant's text, and tracks the new continuity token.
//! The backend's stream format is not a stable contract, so decoding is
//! deliberately lenient: a frame that fails to parse is logged and skipped,
//! never fatal.

use serde::Deserialize;

use crate::bot::events::BotEvent;
use crate::error::{BotError, BridgeResult};

/// Expected shape of one stream frame. Every field is optional; heartbeat
/// frames carry none of them.
#[derive(Debug, Deserialize)]
struct ChunkPayload {
    message_id: Option<String>,
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

/// Decoder state for a single turn's response stream.
#[derive(Debug)]
pub struct TurnDecoder {
    answer: String,
    message_id: String,
    fail_on_error_frame: bool,
}

impl TurnDecoder {
    /// Create a decoder. `fail_on_error_frame` selects whether an explicit
    /// error payload fails the turn or is skipped like a malformed frame.
    pub fn new(fail_on_error_frame: bool) -> Self {
        Self {
            answer: String::new(),
            message_id: String::new(),
            fail_on_error_frame,
        }
    }

    /// Feed one SSE data payload.
    ///
    /// Returns the event to emit, if any. Malformed frames yield `Ok(None)`
    /// and never abort the stream; an explicit error frame without content
    /// yields `Err` only under the strict policy.
    pub fn feed(&mut self, payload: &str) -> BridgeResult<Option<BotEvent>> {
        let chunk: ChunkPayload = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(err) => {
                tracing::debug!(%err, payload, "skipping undecodable stream frame");
                return Ok(None);
            }
        };

        // Last-seen-wins within the turn.
        if let Some(id) = chunk.message_id {
            if !id.is_empty() {
                self.message_id = id;
            }
        }

        let content = chunk
            .choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
            .unwrap_or_default();

        if !content.is_empty() {
            self.answer.push_str(content);
            return Ok(Some(BotEvent::UpdateAnswer {
                text: self.answer.trim_start().to_string(),
            }));
        }

        if let Some(error) = chunk.error {
            if self.fail_on_error_frame {
                return Err(BotError::BackendReported {
                    message: error.to_string(),
                });
            }
            tracing::debug!(%error, "skipping backend-reported stream error");
        }

        Ok(None)
    }

    /// The continuity token extracted from the stream, empty if none was
    /// seen this turn.
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// The accumulated assistant text.
    pub fn answer(&self) -> &str {
        self.answer.trim_start()
    }
}
