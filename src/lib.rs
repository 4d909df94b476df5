//! chatbridge - streaming adapters for unofficial web chat backends.
//!
//! Talks to third-party chat web services through their unofficial
//! conversation APIs, as a logged-in browser session would, and exposes a
//! uniform start/stream/done contract regardless of which backend is
//! targeted.
//!
//! # Layout
//! - [`bot`] - the generic adapter: session lifecycle, turn submission,
//!   stream decoding
//! - [`backends`] - preset configurations for supported services
//! - [`sse`] - generic server-sent-event consumption
//! - [`traits`] / [`adapters`] - collaborator seams (HTTP, permissions)
//!   and their production/mock implementations
//! - [`error`] - error taxonomy with retry/re-auth classification

pub mod adapters;
pub mod backends;
pub mod bot;
pub mod error;
pub mod prelude;
pub mod sse;
pub mod traits;

pub use bot::{BackendConfig, BotEvent, ConversationState, WebChatBot};
pub use error::{BotError, BridgeResult, ErrorCategory};
