//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction over the HTTP transport, enabling
//! dependency injection and mocking in tests. The adapter core never talks
//! to `reqwest` directly; it goes through [`HttpClient`].

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// A fully-buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP transport errors.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection could not be established
    ConnectionFailed(String),
    /// Request timed out
    Timeout(String),
    /// Server returned an error status on a streaming request
    ServerError { status: u16, message: String },
    /// Request was cancelled by the caller
    Cancelled,
    /// IO error while reading the response body
    Io(String),
    /// Other transport error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::Cancelled => write!(f, "Request cancelled"),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Whether the failure happened before the request reached the server.
    ///
    /// Used by session initiation to distinguish "backend unreachable" from
    /// a response the server actually produced.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            HttpError::ConnectionFailed(_) | HttpError::Timeout(_) | HttpError::Io(_)
        )
    }
}

/// A stream of response body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and a
/// recording mock for tests. All request bodies are JSON strings; adding
/// the `Content-Type: application/json` header is the implementation's
/// responsibility.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and buffer the full response.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request and buffer the full response.
    ///
    /// Non-2xx statuses are returned as `Ok(Response)` so the caller can
    /// classify them; only transport failures produce `Err`.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request and return the response body incrementally.
    ///
    /// Used for server-sent-event streams. Unlike [`HttpClient::post`], a
    /// non-2xx status is reported as `Err(HttpError::ServerError)` because
    /// there is no stream to hand back in that case.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}
