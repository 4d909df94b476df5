//! Generic web-chat backend adapter.
//!
//! One [`WebChatBot`] instance talks to one backend service through its
//! unofficial conversation API, as the service's own browser frontend
//! would. The adapter owns the conversation session, submits prompt turns,
//! decodes the streamed response into incremental events, and maps HTTP
//! failure classes to recoverable vs. terminal errors.
//!
//! # Module structure
//! - `config` - per-backend configuration record
//! - `session` - conversation session state machine
//! - `wire` - request/response body types
//! - `stream` - SSE payload decoder for one turn
//! - `events` - caller-visible event types
//!
//! # Usage
//!
//! ```ignore
//! let bot = WebChatBot::with_defaults(backends::kimi());
//! let cancel = CancellationToken::new();
//! bot.send_message("Hello", &cancel, |event| match event {
//!     BotEvent::UpdateAnswer { text } => print!("\r{text}"),
//!     BotEvent::Done => println!(),
//! })
//! .await?;
//! ```

pub mod config;
pub mod events;
pub mod session;
pub mod stream;
pub mod wire;

pub use config::BackendConfig;
pub use events::BotEvent;
pub use session::ConversationState;

use std::sync::{Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

use crate::adapters::ReqwestHttpClient;
use crate::error::{BotError, BridgeResult};
use crate::sse;
use crate::traits::{GrantAll, Headers, HostPermissions, HttpClient, HttpError};

use self::stream::TurnDecoder;
use self::wire::{ConversationCreated, NewConversation, TurnRequest};

/// Adapter for one chat web service.
///
/// Expected usage is one logical turn in flight per instance; overlapping
/// `send_message` calls are not mutually excluded and race on the session
/// (last commit wins). Callers serialize turns per conversation.
pub struct WebChatBot<H: HttpClient, P: HostPermissions> {
    config: BackendConfig,
    http: H,
    permissions: P,
    state: Mutex<ConversationState>,
}

impl WebChatBot<ReqwestHttpClient, GrantAll> {
    /// Create an adapter with the production HTTP client and no permission
    /// gating.
    pub fn with_defaults(config: BackendConfig) -> Self {
        Self::new(config, ReqwestHttpClient::new(), GrantAll)
    }
}

impl<H: HttpClient, P: HostPermissions> WebChatBot<H, P> {
    /// Create an adapter with injected collaborators.
    pub fn new(config: BackendConfig, http: H, permissions: P) -> Self {
        Self {
            config,
            http,
            permissions,
            state: Mutex::new(ConversationState::NoSession),
        }
    }

    /// Human-readable backend label.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The backend configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Snapshot of the current session state.
    pub fn conversation_state(&self) -> ConversationState {
        self.state().clone()
    }

    /// Unconditionally discard the session. The next turn re-initiates.
    pub fn reset_conversation(&self) {
        self.state().invalidate();
    }

    /// Submit one prompt turn and stream the response through `on_event`.
    ///
    /// Emits [`BotEvent::UpdateAnswer`] with cumulative text as deltas
    /// arrive, then [`BotEvent::Done`] exactly once on success. Failures
    /// are returned as `Err` and no `Done` is emitted. Cancelling `cancel`
    /// aborts the in-flight request or stream; the continuity-token commit
    /// is skipped in that case.
    pub async fn send_message<F>(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
        mut on_event: F,
    ) -> BridgeResult<()>
    where
        F: FnMut(BotEvent) + Send,
    {
        if !self
            .permissions
            .request_host_permission(&self.config.origin)
            .await
        {
            return Err(BotError::MissingHostPermission {
                origin: self.config.origin.clone(),
            });
        }

        let (conversation_id, last_message_id) = self.ensure_session().await?;

        let request = TurnRequest::new(&conversation_id, &last_message_id, prompt);
        let body = serde_json::to_string(&request)
            .map_err(|e| BotError::Http(HttpError::Other(e.to_string())))?;

        let chat_url = self.config.chat_url();
        let headers = Headers::new();
        let body_stream = tokio::select! {
            _ = cancel.cancelled() => return Err(BotError::Cancelled),
            result = self.http.post_stream(&chat_url, &body, &headers) => {
                result.map_err(|err| self.classify_turn_error(err))?
            }
        };

        let mut decoder = TurnDecoder::new(self.config.fail_on_stream_error);
        let decode_result = {
            let decoder = &mut decoder;
            let on_event = &mut on_event;
            let decode = sse::for_each_message(body_stream, move |payload| {
                if let Some(event) = decoder.feed(payload)? {
                    on_event(event);
                }
                Ok(())
            });
            tokio::select! {
                _ = cancel.cancelled() => Err(BotError::Cancelled),
                result = decode => result,
            }
        };

        tracing::debug!(
            backend = %self.config.name,
            message_id = decoder.message_id(),
            answer_chars = decoder.answer().chars().count(),
            "turn stream decoded"
        );

        match decode_result {
            // Decoding never completed: leave the session exactly as if no
            // commit had occurred.
            Err(BotError::Cancelled) | Err(BotError::Http(HttpError::Cancelled)) => {
                return Err(BotError::Cancelled)
            }
            result => {
                // Commit precedes the terminal event, and happens even when
                // decoding failed mid-stream, so the next turn threads off
                // whatever the backend acknowledged.
                self.state().commit_message_id(decoder.message_id());
                result?;
            }
        }

        on_event(BotEvent::Done);
        Ok(())
    }

    /// Best-effort probe: does the backend still know this conversation?
    pub async fn conversation_exists(&self, conversation_id: &str) -> bool {
        let url = self.config.conversation_url(conversation_id);
        match self.http.get(&url, &Headers::new()).await {
            Ok(response) => response.is_success(),
            Err(_) => false,
        }
    }

    /// Return the current session, initiating one if absent.
    async fn ensure_session(&self) -> BridgeResult<(String, String)> {
        if let ConversationState::Active {
            conversation_id,
            last_message_id,
        } = &*self.state()
        {
            return Ok((conversation_id.clone(), last_message_id.clone()));
        }

        let conversation_id = self.create_conversation().await?;
        tracing::debug!(
            backend = %self.config.name,
            conversation_id = %conversation_id,
            "created conversation"
        );

        self.state().activate(conversation_id.as_str());
        Ok((conversation_id, String::new()))
    }

    /// Session initiation: POST a client-generated id, receive the
    /// server-assigned conversation id.
    async fn create_conversation(&self) -> BridgeResult<String> {
        let body = serde_json::to_string(&NewConversation::new())
            .map_err(|e| BotError::Http(HttpError::Other(e.to_string())))?;

        let response = self
            .http
            .post(&self.config.init_url(), &body, &Headers::new())
            .await
            .map_err(|err| {
                if err.is_network() {
                    BotError::Unreachable {
                        backend: self.config.name.clone(),
                        message: self.config.unavailable_message.clone(),
                    }
                } else {
                    BotError::Http(err)
                }
            })?;

        if response.status == 401 || response.status == 403 {
            return Err(BotError::NotAuthenticated {
                backend: self.config.name.clone(),
                message: self.config.unauthorized_message.clone(),
            });
        }
        if !response.is_success() {
            return Err(BotError::BackendStatus {
                backend: self.config.name.clone(),
                status: response.status,
            });
        }

        let created: ConversationCreated = response.json().map_err(|e| {
            BotError::Http(HttpError::Other(format!(
                "unexpected conversation response: {}",
                e
            )))
        })?;
        Ok(created.id)
    }

    /// Map a turn-request failure to its error class, discarding the
    /// session where the status says it is no longer valid.
    fn classify_turn_error(&self, err: HttpError) -> BotError {
        match err {
            HttpError::ServerError {
                status: status @ (401 | 403),
                ..
            } => {
                tracing::debug!(backend = %self.config.name, status, "turn unauthorized, discarding session");
                self.state().invalidate();
                BotError::NotAuthenticated {
                    backend: self.config.name.clone(),
                    message: self.config.unauthorized_message.clone(),
                }
            }
            HttpError::ServerError { status: 404, .. } => {
                tracing::debug!(backend = %self.config.name, "conversation gone, discarding session");
                self.state().invalidate();
                BotError::ConversationNotFound {
                    backend: self.config.name.clone(),
                    message: self.config.not_found_message.clone(),
                }
            }
            HttpError::ServerError { status, .. } => BotError::BackendStatus {
                backend: self.config.name.clone(),
                status,
            },
            HttpError::Cancelled => BotError::Cancelled,
            other => BotError::Http(other),
        }
    }

    /// Lock the session state, tolerating a poisoned mutex (state is a
    /// plain enum; a panicking writer cannot leave it half-updated).
    fn state(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockPermissions, MockResponse};
    use crate::traits::Response;
    use bytes::Bytes;

    const INIT_URL: &str = "https://chat.example/api/chat/conversations";
    const CHAT_URL: &str = "https://chat.example/api/chat";

    fn test_config() -> BackendConfig {
        BackendConfig::new("Example (webapp)", "https://chat.example/")
    }

    fn bot_with(http: MockHttpClient) -> WebChatBot<MockHttpClient, MockPermissions> {
        WebChatBot::new(test_config(), http, MockPermissions::new(true))
    }

    fn init_ok(http: &MockHttpClient) {
        http.set_response(
            INIT_URL,
            MockResponse::Success(Response::new(200, Bytes::from(r#"{"id":"conv-1"}"#))),
        );
    }

    fn sse_body(frames: &[&str]) -> Vec<Bytes> {
        frames
            .iter()
            .map(|f| Bytes::from(format!("data: {}\n\n", f)))
            .collect()
    }

    async fn send_collecting(
        bot: &WebChatBot<MockHttpClient, MockPermissions>,
        prompt: &str,
    ) -> (BridgeResult<()>, Vec<BotEvent>) {
        let mut events = Vec::new();
        let cancel = CancellationToken::new();
        let result = bot
            .send_message(prompt, &cancel, |event| events.push(event))
            .await;
        (result, events)
    }

    #[tokio::test]
    async fn test_first_turn_initiates_session_once() {
        let http = MockHttpClient::new();
        init_ok(&http);
        http.set_response(
            CHAT_URL,
            MockResponse::Stream(sse_body(&[
                r#"{"choices":[{"delta":{"content":"Hi"}}]}"#,
                r#"{"message_id":"m1"}"#,
            ])),
        );
        let bot = bot_with(http.clone());

        let (result, events) = send_collecting(&bot, "hello").await;
        result.unwrap();

        assert_eq!(http.request_count(INIT_URL), 1);
        assert_eq!(http.request_count(CHAT_URL), 1);
        assert_eq!(
            events,
            vec![
                BotEvent::UpdateAnswer {
                    text: "Hi".to_string()
                },
                BotEvent::Done,
            ]
        );
        assert_eq!(
            bot.conversation_state(),
            ConversationState::Active {
                conversation_id: "conv-1".to_string(),
                last_message_id: "m1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_second_turn_reuses_session_and_threads_parent() {
        let http = MockHttpClient::new();
        init_ok(&http);
        http.set_response(
            CHAT_URL,
            MockResponse::Stream(sse_body(&[r#"{"message_id":"m1"}"#])),
        );
        let bot = bot_with(http.clone());

        send_collecting(&bot, "first").await.0.unwrap();
        send_collecting(&bot, "second").await.0.unwrap();

        assert_eq!(http.request_count(INIT_URL), 1);
        let turns: Vec<_> = http
            .requests()
            .into_iter()
            .filter(|r| r.url == CHAT_URL)
            .collect();
        assert_eq!(turns.len(), 2);

        let first: serde_json::Value =
            serde_json::from_str(turns[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(first["conversation_id"], "conv-1");
        assert!(first.get("parent_message_id").is_none());

        let second: serde_json::Value =
            serde_json::from_str(turns[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(second["parent_message_id"], "m1");
    }

    #[tokio::test]
    async fn test_missing_permission_fails_before_any_request() {
        let http = MockHttpClient::new();
        let bot = WebChatBot::new(test_config(), http.clone(), MockPermissions::new(false));

        let (result, events) = send_collecting(&bot, "hello").await;

        assert!(matches!(
            result,
            Err(BotError::MissingHostPermission { .. })
        ));
        assert!(events.is_empty());
        assert!(http.requests().is_empty());
        assert_eq!(bot.conversation_state(), ConversationState::NoSession);
    }

    #[tokio::test]
    async fn test_init_unauthorized_creates_no_session() {
        let http = MockHttpClient::new();
        http.set_response(
            INIT_URL,
            MockResponse::Success(Response::new(401, Bytes::new())),
        );
        let bot = bot_with(http);

        let (result, _) = send_collecting(&bot, "hello").await;

        assert!(matches!(result, Err(BotError::NotAuthenticated { .. })));
        assert_eq!(bot.conversation_state(), ConversationState::NoSession);
    }

    #[tokio::test]
    async fn test_init_network_failure_is_unreachable() {
        let http = MockHttpClient::new();
        http.set_response(
            INIT_URL,
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );
        let bot = bot_with(http);

        let (result, _) = send_collecting(&bot, "hello").await;

        match result {
            Err(BotError::Unreachable { message, .. }) => {
                assert_eq!(message, "Example (webapp) is not available");
            }
            other => panic!("expected Unreachable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_init_unexpected_status_surfaces_code() {
        let http = MockHttpClient::new();
        http.set_response(
            INIT_URL,
            MockResponse::Success(Response::new(503, Bytes::new())),
        );
        let bot = bot_with(http);

        let (result, _) = send_collecting(&bot, "hello").await;

        assert!(matches!(
            result,
            Err(BotError::BackendStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_turn_unauthorized_discards_session_then_reinitiates() {
        let http = MockHttpClient::new();
        init_ok(&http);
        http.set_response(
            CHAT_URL,
            MockResponse::StreamError(HttpError::ServerError {
                status: 403,
                message: "Forbidden".to_string(),
            }),
        );
        let bot = bot_with(http.clone());

        let (result, _) = send_collecting(&bot, "hello").await;
        assert!(matches!(result, Err(BotError::NotAuthenticated { .. })));
        assert_eq!(bot.conversation_state(), ConversationState::NoSession);

        // Retry re-creates a session from scratch.
        http.set_response(
            CHAT_URL,
            MockResponse::Stream(sse_body(&[r#"{"message_id":"m1"}"#])),
        );
        send_collecting(&bot, "again").await.0.unwrap();
        assert_eq!(http.request_count(INIT_URL), 2);
    }

    #[tokio::test]
    async fn test_turn_not_found_discards_session() {
        let http = MockHttpClient::new();
        init_ok(&http);
        http.set_response(
            CHAT_URL,
            MockResponse::StreamError(HttpError::ServerError {
                status: 404,
                message: "Not Found".to_string(),
            }),
        );
        let bot = bot_with(http);

        let (result, _) = send_collecting(&bot, "hello").await;

        match result {
            Err(err @ BotError::ConversationNotFound { .. }) => assert!(err.is_retryable()),
            other => panic!("expected ConversationNotFound, got {:?}", other),
        }
        assert_eq!(bot.conversation_state(), ConversationState::NoSession);
    }

    #[tokio::test]
    async fn test_turn_server_error_keeps_session() {
        let http = MockHttpClient::new();
        init_ok(&http);
        http.set_response(
            CHAT_URL,
            MockResponse::StreamError(HttpError::ServerError {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        let bot = bot_with(http);

        let (result, _) = send_collecting(&bot, "hello").await;

        assert!(matches!(
            result,
            Err(BotError::BackendStatus { status: 500, .. })
        ));
        assert!(bot.conversation_state().is_active());
    }

    #[tokio::test]
    async fn test_reset_conversation_forces_reinitiation() {
        let http = MockHttpClient::new();
        init_ok(&http);
        http.set_response(
            CHAT_URL,
            MockResponse::Stream(sse_body(&[r#"{"message_id":"m1"}"#])),
        );
        let bot = bot_with(http.clone());

        send_collecting(&bot, "first").await.0.unwrap();
        bot.reset_conversation();
        assert_eq!(bot.conversation_state(), ConversationState::NoSession);

        // Only look at the traffic the second turn generates.
        http.clear_requests();
        send_collecting(&bot, "second").await.0.unwrap();
        assert_eq!(http.request_count(INIT_URL), 1);
        assert_eq!(http.request_count(CHAT_URL), 1);
    }

    #[tokio::test]
    async fn test_malformed_frame_does_not_abort_stream() {
        let http = MockHttpClient::new();
        init_ok(&http);
        let mut frames = sse_body(&[r#"{"choices":[{"delta":{"content":"a"}}]}"#]);
        frames.push(Bytes::from("data: }{garbage\n\n"));
        frames.extend(sse_body(&[r#"{"choices":[{"delta":{"content":"b"}}]}"#]));
        http.set_response(CHAT_URL, MockResponse::Stream(frames));
        let bot = bot_with(http);

        let (result, events) = send_collecting(&bot, "hello").await;
        result.unwrap();

        assert_eq!(
            events,
            vec![
                BotEvent::UpdateAnswer {
                    text: "a".to_string()
                },
                BotEvent::UpdateAnswer {
                    text: "ab".to_string()
                },
                BotEvent::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_cancellation_skips_commit() {
        let http = MockHttpClient::new();
        init_ok(&http);
        http.set_response(
            CHAT_URL,
            MockResponse::StallingStream(sse_body(&[r#"{"message_id":"m1"}"#])),
        );
        let bot = bot_with(http);

        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let mut events = Vec::new();
        let result = bot
            .send_message("hello", &cancel, |event| events.push(event))
            .await;

        assert!(matches!(result, Err(BotError::Cancelled)));
        assert!(events.is_empty());
        // Session survives but no continuity token was committed.
        match bot.conversation_state() {
            ConversationState::Active {
                last_message_id, ..
            } => assert!(last_message_id.is_empty()),
            other => panic!("expected active session, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_strict_stream_error_policy_fails_turn() {
        let http = MockHttpClient::new();
        init_ok(&http);
        http.set_response(
            CHAT_URL,
            MockResponse::Stream(sse_body(&[
                r#"{"message_id":"m1"}"#,
                r#"{"error":{"code":"overloaded"}}"#,
            ])),
        );
        let config = test_config().with_fail_on_stream_error(true);
        let bot = WebChatBot::new(config, http, MockPermissions::new(true));

        let (result, events) = send_collecting(&bot, "hello").await;

        assert!(matches!(result, Err(BotError::BackendReported { .. })));
        assert!(events.is_empty());
        // The token seen before the failure is still committed.
        match bot.conversation_state() {
            ConversationState::Active {
                last_message_id, ..
            } => assert_eq!(last_message_id, "m1"),
            other => panic!("expected active session, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_conversation_exists_probe() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://chat.example/api/chat/conversations/c-1",
            MockResponse::Success(Response::new(200, Bytes::new())),
        );
        http.set_response(
            "https://chat.example/api/chat/conversations/c-2",
            MockResponse::Success(Response::new(404, Bytes::new())),
        );
        let bot = bot_with(http);

        assert!(bot.conversation_exists("c-1").await);
        assert!(!bot.conversation_exists("c-2").await);
        assert!(!bot.conversation_exists("c-unreachable").await);
    }

    #[tokio::test]
    async fn test_permission_check_uses_origin() {
        let http = MockHttpClient::new();
        init_ok(&http);
        http.set_response(CHAT_URL, MockResponse::Stream(Vec::new()));
        let perms = MockPermissions::new(true);
        let bot = WebChatBot::new(test_config(), http, perms.clone());

        send_collecting(&bot, "hello").await.0.unwrap();

        assert_eq!(perms.checked_origins(), vec!["https://chat.example/"]);
    }
}
