//! Error handling for the adapter.
//!
//! - [`BotError`] - the unified error surface of the public API
//! - [`ErrorCategory`] - high-level classification for handling decisions
//! - [`BridgeResult`] - result alias used throughout the crate
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Backend unreachable, transport failures | Yes |
//! | Auth | No logged-in browser session | After re-auth |
//! | Server | Unexpected statuses, backend-reported errors | Depends |
//! | User | Missing permission, cancellation | After user action |

mod bot;
mod category;

pub use bot::BotError;
pub use category::ErrorCategory;

/// Type alias for Results using [`BotError`].
pub type BridgeResult<T> = Result<T, BotError>;
