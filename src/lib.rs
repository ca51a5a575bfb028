//! Tooleval - Software Tool Evaluation Tracker
//!
//! An in-memory tracker for software-tool evaluations that provides:
//! - Search, category and status filtering with date ordering
//! - Summary statistics and approval rate
//! - Heuristic extraction of example links from free-text fields
//! - A conversational assistant that answers questions about the dataset
//!
//! # Architecture
//!
//! The system is organized into several layers:
//! - **Types**: Core data structures (EvaluationRecord, EvaluationStatus, ChatMessage)
//! - **Store**: Immutable, validated dataset loaded once
//! - **Dashboard**: Pure filter/stats functions and the query controller
//! - **Services**: Language-model client boundary and Anthropic implementation
//! - **Conversation**: Session history with single-flight request discipline
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tooleval_core::{AnthropicClient, ConversationManager, DataStore, FilterQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = DataStore::load("data/evaluations.json".as_ref())?;
//!
//!     let approved = tooleval_core::dashboard::filter(
//!         store.records(),
//!         &FilterQuery::new().with_search("video"),
//!     );
//!     println!("{} matches", approved.len());
//!
//!     let client = Arc::new(AnthropicClient::with_default()?);
//!     let chat = ConversationManager::new(&store, client)?;
//!     chat.send("Which tools are approved?").await;
//!     println!("{:?}", chat.history().last());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod conversation;
pub mod dashboard;
pub mod error;
pub mod example_output;
pub mod services;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use conversation::{ConversationManager, SessionState, FALLBACK_REPLY};
pub use dashboard::{Dashboard, EvaluationStats, FilterQuery, StatusFilter};
pub use error::{Result, ToolEvalError};
pub use example_output::ExampleLink;
pub use services::{AnthropicClient, ChatRequest, LlmClient, LlmConfig};
pub use store::DataStore;
pub use types::{
    ChatMessage, DetailedScores, EvaluationRecord, EvaluationStatus, ExampleOutput, RecordId, Role,
};
