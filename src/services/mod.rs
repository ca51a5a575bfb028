//! Services layer for the tool evaluation tracker
//!
//! Provides the language-model boundary and its Anthropic implementation.

pub mod llm;
pub mod prompts;

pub use llm::{AnthropicClient, ChatRequest, LlmClient, LlmConfig};
