//! SSE (Server-Sent Events) stream consumption.
//!
//! Generic primitive shared by every backend adapter: given an HTTP
//! response body stream, decode the SSE framing and invoke a callback once
//! per data payload. SSE format consists of:
//! - `data: <payload>` - data payload line(s)
//! - `event: <type>` - event type line (ignored here)
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments/keep-alives (ignored)
//!
//! Interpretation of the payloads is the caller's business; this module
//! never parses JSON.

mod parser;

pub use parser::{parse_sse_line, SseLine, SseParser};

use futures_util::StreamExt;

use crate::traits::{ByteStream, HttpError};

/// Sentinel payload some backends send to mark end of stream.
const DONE_SENTINEL: &str = "[DONE]";

/// Drive a response body stream through the SSE parser, invoking
/// `on_message` once per decoded data payload.
///
/// Terminates when the body stream closes, a `[DONE]` sentinel payload
/// arrives, or the callback returns an error. Transport errors mid-stream
/// are propagated through `E: From<HttpError>`; a trailing event without a
/// final blank line is still delivered.
///
/// Chunk boundaries carry no meaning: bytes are buffered raw and only
/// decoded per line, so a multi-byte character split across chunks stays
/// intact.
pub async fn for_each_message<F, E>(mut body: ByteStream, mut on_message: F) -> Result<(), E>
where
    F: FnMut(&str) -> Result<(), E>,
    E: From<HttpError>,
{
    let mut parser = SseParser::new();
    let mut buffer: Vec<u8> = Vec::new();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(E::from)?;
        buffer.extend_from_slice(&chunk);

        while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = buffer.drain(..=newline_pos).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(|c| c == '\n' || c == '\r');

            if let Some(payload) = parser.feed_line(line) {
                if payload == DONE_SENTINEL {
                    return Ok(());
                }
                on_message(&payload)?;
            }
        }
    }

    // Stream ended - flush any partial line and pending payload
    if !buffer.is_empty() {
        let line = String::from_utf8_lossy(&buffer);
        parser.feed_line(line.trim_end_matches('\r'));
    }
    if let Some(payload) = parser.finish() {
        if payload != DONE_SENTINEL {
            on_message(&payload)?;
        }
    }

    Ok(())
}
