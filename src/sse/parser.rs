//! Stateful SSE line parser.
//!
//! Accumulates `data:` lines and emits one payload string per event
//! boundary (empty line). Event-type lines and comments are ignored: the
//! backends served by this crate put everything in the data payload.

/// A single classified SSE line.
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// `data: <payload>` line
    Data(String),
    /// `event: <type>` line
    Event(String),
    /// Comment (`: ...`) or unrecognized line
    Comment(String),
    /// Empty line - event boundary
    Empty,
}

/// Parse a single SSE line into its component type.
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Stateful SSE parser that accumulates lines and emits payloads at event
/// boundaries.
///
/// SSE allows multiple `data:` lines per event; they are joined with `\n`
/// as the format prescribes.
#[derive(Debug, Default)]
pub struct SseParser {
    data_buffer: Vec<String>,
}

impl SseParser {
    /// Create a new SSE parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line to the parser, potentially returning a complete payload.
    ///
    /// Returns `Some(payload)` when an event boundary closes a non-empty
    /// data buffer, `None` otherwise.
    pub fn feed_line(&mut self, line: &str) -> Option<String> {
        match parse_sse_line(line) {
            SseLine::Data(data) => {
                self.data_buffer.push(data);
                None
            }
            SseLine::Empty => {
                if self.data_buffer.is_empty() {
                    None
                } else {
                    Some(self.data_buffer.drain(..).collect::<Vec<_>>().join("\n"))
                }
            }
            SseLine::Event(_) | SseLine::Comment(_) => None,
        }
    }

    /// Emit any pending payload. Called when the underlying stream closes
    /// without a trailing blank line.
    pub fn finish(&mut self) -> Option<String> {
        self.feed_line("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sse_line_variants() {
        assert_eq!(parse_sse_line(""), SseLine::Empty);
        assert_eq!(
            parse_sse_line("data: {\"a\":1}"),
            SseLine::Data("{\"a\":1}".to_string())
        );
        assert_eq!(
            parse_sse_line("event: message"),
            SseLine::Event("message".to_string())
        );
        assert_eq!(
            parse_sse_line(": keep-alive"),
            SseLine::Comment("keep-alive".to_string())
        );
        assert_eq!(
            parse_sse_line("garbage line"),
            SseLine::Comment("garbage line".to_string())
        );
    }

    #[test]
    fn test_parser_emits_payload_on_blank_line() {
        let mut parser = SseParser::new();
        assert_eq!(parser.feed_line("data: hello"), None);
        assert_eq!(parser.feed_line(""), Some("hello".to_string()));
    }

    #[test]
    fn test_parser_joins_multiple_data_lines() {
        let mut parser = SseParser::new();
        parser.feed_line("data: line1");
        parser.feed_line("data: line2");
        assert_eq!(parser.feed_line(""), Some("line1\nline2".to_string()));
    }

    #[test]
    fn test_parser_ignores_comments_and_event_lines() {
        let mut parser = SseParser::new();
        parser.feed_line(": ping");
        parser.feed_line("event: message");
        assert_eq!(parser.feed_line(""), None);

        parser.feed_line("event: message");
        parser.feed_line("data: payload");
        assert_eq!(parser.feed_line(""), Some("payload".to_string()));
    }

    #[test]
    fn test_parser_blank_line_without_data_is_noop() {
        let mut parser = SseParser::new();
        assert_eq!(parser.feed_line(""), None);
        assert_eq!(parser.feed_line(""), None);
    }

    #[test]
    fn test_finish_flushes_pending_data() {
        let mut parser = SseParser::new();
        parser.feed_line("data: tail");
        assert_eq!(parser.finish(), Some("tail".to_string()));
        assert_eq!(parser.finish(), None);
    }
}
