//! Host permission collaborator trait.
//!
//! Before any network call, the adapter checks that the embedding
//! application has been granted access to the target origin. How that grant
//! is obtained (browser permission prompt, config allowlist, ...) is the
//! host application's concern; the adapter only consumes the answer.

use async_trait::async_trait;

/// Trait for checking (and, where the host supports it, requesting) access
/// to a backend origin.
#[async_trait]
pub trait HostPermissions: Send + Sync {
    /// Returns `true` if the host application holds permission for `origin`.
    ///
    /// Implementations may prompt the user and await the outcome; a `false`
    /// return means the adapter must not issue any request to that origin.
    async fn request_host_permission(&self, origin: &str) -> bool;
}

/// Permission collaborator that grants every origin.
///
/// Suitable for embeddings without a permission model (CLIs, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantAll;

#[async_trait]
impl HostPermissions for GrantAll {
    async fn request_host_permission(&self, _origin: &str) -> bool {
        true
    }
}
