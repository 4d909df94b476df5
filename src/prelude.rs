//! Prelude module for convenient imports.
//!
//! ```ignore
//! use chatbridge::prelude::*;
//! ```

pub use crate::adapters::ReqwestHttpClient;
pub use crate::backends;
pub use crate::bot::{BackendConfig, BotEvent, ConversationState, WebChatBot};
pub use crate::error::{BotError, BridgeResult, ErrorCategory};
pub use crate::traits::{GrantAll, HostPermissions, HttpClient};
pub use tokio_util::sync::CancellationToken;
