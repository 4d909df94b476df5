//! Adapter error type.
//!
//! `BotError` is the single error surface of `send_message` and friends.
//! Each variant maps one failure class from the turn/init classification;
//! the variant tells the caller whether retrying can help and what state
//! the session was left in.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Errors raised by a backend adapter.
///
/// Session effects are fixed per variant: auth failures and
/// `ConversationNotFound` discard the session before the error is returned;
/// every other variant leaves it untouched.
#[derive(Debug, Error)]
pub enum BotError {
    /// Session initiation could not reach the backend at all.
    #[error("{message}")]
    Unreachable { backend: String, message: String },

    /// The backend answered 401/403: no logged-in browser session.
    #[error("{message}")]
    NotAuthenticated { backend: String, message: String },

    /// The host application holds no permission for the backend origin.
    /// Raised before any network call.
    #[error("Missing host permission for {origin}")]
    MissingHostPermission { origin: String },

    /// The backend no longer knows the conversation (404 on a turn).
    /// The session was discarded; an immediate retry starts fresh.
    #[error("{message}")]
    ConversationNotFound { backend: String, message: String },

    /// Any other non-success turn status. Session untouched.
    #[error("{backend} API error: {status}")]
    BackendStatus { backend: String, status: u16 },

    /// The backend reported an error inside the event stream and the
    /// adapter is configured to surface those.
    #[error("Backend reported error: {message}")]
    BackendReported { message: String },

    /// The caller cancelled the turn; no continuity token was committed.
    #[error("Turn cancelled")]
    Cancelled,

    /// Transport-level failure outside the classified cases.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl BotError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::Unreachable { .. } => ErrorCategory::Network,
            BotError::NotAuthenticated { .. } => ErrorCategory::Auth,
            BotError::MissingHostPermission { .. } => ErrorCategory::User,
            BotError::ConversationNotFound { .. } => ErrorCategory::Server,
            BotError::BackendStatus { .. } => ErrorCategory::Server,
            BotError::BackendReported { .. } => ErrorCategory::Server,
            BotError::Cancelled => ErrorCategory::User,
            BotError::Http(err) => {
                if err.is_network() {
                    ErrorCategory::Network
                } else {
                    ErrorCategory::Server
                }
            }
        }
    }

    /// Check if retrying the call, unchanged, can reasonably succeed.
    ///
    /// `ConversationNotFound` is retryable by design: the failed call
    /// already discarded the stale session, so the retry re-initiates.
    pub fn is_retryable(&self) -> bool {
        match self {
            BotError::Unreachable { .. } => true,
            BotError::ConversationNotFound { .. } => true,
            BotError::Cancelled => true,
            BotError::Http(err) => err.is_network(),
            BotError::NotAuthenticated { .. }
            | BotError::MissingHostPermission { .. }
            | BotError::BackendStatus { .. }
            | BotError::BackendReported { .. } => false,
        }
    }

    /// Check if this error is resolved by the user signing in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, BotError::NotAuthenticated { .. })
    }

    /// Message suitable for showing to the end user.
    ///
    /// The classified variants carry the backend's configured wording; the
    /// rest fall back to a generic phrasing.
    pub fn user_message(&self) -> String {
        match self {
            BotError::Unreachable { message, .. }
            | BotError::NotAuthenticated { message, .. }
            | BotError::ConversationNotFound { message, .. }
            | BotError::BackendReported { message } => message.clone(),
            BotError::MissingHostPermission { origin } => {
                format!("This app needs permission to access {}", origin)
            }
            BotError::BackendStatus { backend, status } => {
                format!("{} returned an unexpected error ({})", backend, status)
            }
            BotError::Cancelled => "The request was cancelled.".to_string(),
            BotError::Http(err) => format!("Network error: {}", err),
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            BotError::Unreachable { .. } => "E_BOT_UNREACHABLE",
            BotError::NotAuthenticated { .. } => "E_BOT_UNAUTHORIZED",
            BotError::MissingHostPermission { .. } => "E_BOT_PERMISSION",
            BotError::ConversationNotFound { .. } => "E_BOT_CONV_NOT_FOUND",
            BotError::BackendStatus { .. } => "E_BOT_STATUS",
            BotError::BackendReported { .. } => "E_BOT_BACKEND",
            BotError::Cancelled => "E_BOT_CANCELLED",
            BotError::Http(_) => "E_BOT_HTTP",
        }
    }
}
