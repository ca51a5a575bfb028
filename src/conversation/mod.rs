//! Conversational assistant over the evaluation dataset
//!
//! - **context**: reduced record projection serialized into each request
//! - **session**: append-only history and the single-flight guard
//! - **manager**: the session object the front end talks to

pub mod context;
pub mod manager;
mod session;

pub use context::{build_context, RecordContext};
pub use manager::ConversationManager;
pub use session::{SessionState, FALLBACK_REPLY};
