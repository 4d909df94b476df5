//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses, errors or streams, and records every request for later
//! verification.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request body (for POST requests)
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response
    Success(Response),
    /// Return a transport error
    Error(HttpError),
    /// Return a finite stream of body chunks
    Stream(Vec<Bytes>),
    /// Return the given chunks, then never complete (for cancellation tests)
    StallingStream(Vec<Bytes>),
    /// Fail the streaming request itself
    StreamError(HttpError),
}

/// Mock HTTP client for testing.
///
/// Responses are configured per exact URL; unmatched URLs fall back to the
/// default response or to a connection error. Clones share configuration
/// and the request log.
///
/// # Example
///
/// ```ignore
/// let http = MockHttpClient::new();
/// http.set_response(
///     "https://www.kimi.com/api/chat/conversations",
///     MockResponse::Success(Response::new(200, Bytes::from(r#"{"id":"c1"}"#))),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response for a specific URL (matched exactly).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    /// Set a default response for URLs without a specific match.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of recorded requests to a given URL.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record(&self, method: &str, url: &str, body: Option<String>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            body,
        });
    }

    fn lookup(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();
        responses
            .get(url)
            .cloned()
            .or_else(|| self.default_response.lock().unwrap().clone())
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, _headers: &Headers) -> Result<Response, HttpError> {
        self.record("GET", url, None);

        match self.lookup(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(_) => Err(HttpError::Other(format!(
                "mock: stream response configured for buffered GET {}",
                url
            ))),
            None => Err(HttpError::ConnectionFailed(format!(
                "mock: no response configured for {}",
                url
            ))),
        }
    }

    async fn post(&self, url: &str, body: &str, _headers: &Headers) -> Result<Response, HttpError> {
        self.record("POST", url, Some(body.to_string()));

        match self.lookup(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(_) => Err(HttpError::Other(format!(
                "mock: stream response configured for buffered POST {}",
                url
            ))),
            None => Err(HttpError::ConnectionFailed(format!(
                "mock: no response configured for {}",
                url
            ))),
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        _headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record("POST", url, Some(body.to_string()));

        match self.lookup(url) {
            Some(MockResponse::Stream(chunks)) => {
                let items: Vec<Result<Bytes, HttpError>> = chunks.into_iter().map(Ok).collect();
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::StallingStream(chunks)) => {
                let items: Vec<Result<Bytes, HttpError>> = chunks.into_iter().map(Ok).collect();
                Ok(Box::pin(
                    futures::stream::iter(items).chain(futures::stream::pending()),
                ))
            }
            Some(MockResponse::StreamError(err)) => Err(err),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Success(response)) => {
                // Buffered response configured for a streaming call: hand the
                // whole body over as one chunk.
                Ok(Box::pin(futures::stream::iter(vec![Ok(response.body)])))
            }
            None => Err(HttpError::ConnectionFailed(format!(
                "mock: no response configured for {}",
                url
            ))),
        }
    }
}
