//! Concrete implementations of the collaborator traits.
//!
//! This module provides the production adapters behind the traits defined
//! in `crate::traits`, plus test doubles under [`mock`].
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//!
//! # Mock Implementations
//!
//! - [`mock::MockHttpClient`] - configurable HTTP responses
//! - [`mock::MockPermissions`] - scripted permission answers

pub mod mock;
pub mod reqwest_http;

pub use mock::{MockHttpClient, MockPermissions, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
