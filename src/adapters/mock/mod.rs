//! Mock implementations of the collaborator traits.
//!
//! - [`MockHttpClient`] - configurable HTTP responses with request recording
//! - [`MockPermissions`] - scripted permission answers

pub mod http;
pub mod permissions;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use permissions::MockPermissions;
