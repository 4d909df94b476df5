//! Trait abstractions for dependency injection and testability.
//!
//! This module provides trait-based abstractions for the adapter's two
//! external collaborators, enabling dependency injection and mocking:
//!
//! - [`HttpClient`] - HTTP transport (GET, POST, streaming POST)
//! - [`HostPermissions`] - origin access checks consulted before every turn

pub mod http;
pub mod permissions;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
pub use permissions::{GrantAll, HostPermissions};
