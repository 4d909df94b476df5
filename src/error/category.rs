//! Error category classification.
//!
//! High-level grouping of adapter errors to enable consistent retry
//! policies and user messaging in embedding applications.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-level failures (connection, DNS, timeout).
    /// Generally transient and retryable.
    Network,

    /// The backend rejected the session or turn as unauthenticated.
    /// Retryable once the user signs in again in their browser.
    Auth,

    /// Backend-side errors (unexpected statuses, reported errors).
    /// Retryability depends on the backend.
    Server,

    /// User or host-application action required (permission grants,
    /// cancellation). Not retryable until the caller acts.
    User,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network)
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::User => "user",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
