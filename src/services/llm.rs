//! LLM service for the evaluation assistant
//!
//! Defines the [`LlmClient`] boundary used by the conversation manager and
//! an Anthropic Messages API implementation of it.

use crate::config::{ConfigError, API_KEY_ENV};
use crate::error::{Result, ToolEvalError};
use crate::services::prompts;
use crate::types::{ChatMessage, Role};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: usize = 1000;
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One request/response exchange with the assistant
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Serialized dataset projection
    pub context: String,

    /// Full conversation so far, ending with the newest user message
    pub history: Vec<ChatMessage>,
}

/// Remote language-model boundary
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Perform exactly one exchange; the reply must be an assistant message
    async fn complete(&self, request: ChatRequest) -> Result<ChatMessage>;
}

/// Configuration for LLM service
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Anthropic API key
    pub api_key: String,

    /// Model to use (default: claude-sonnet-4-20250514)
    pub model: String,

    /// Max tokens for responses
    pub max_tokens: usize,

    /// Temperature for sampling, server default when `None`
    pub temperature: Option<f32>,

    /// Messages endpoint URL
    pub endpoint: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).unwrap_or_default(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Anthropic Messages API client
pub struct AnthropicClient {
    config: LlmConfig,
    client: reqwest::Client,
}

/// Anthropic API message format
#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: usize,
    system: String,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Anthropic API response format
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default = "assistant_role")]
    role: Role,
    content: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    text: Option<String>,
}

fn assistant_role() -> Role {
    Role::Assistant
}

impl AnthropicClient {
    /// Create a new client with custom config
    pub fn new(config: LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(ToolEvalError::Config(ConfigError::ValidationError(format!(
                "{} not set",
                API_KEY_ENV
            ))));
        }

        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Create with default config
    pub fn with_default() -> Result<Self> {
        Self::new(LlmConfig::default())
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatMessage> {
        debug!(
            "Calling Anthropic API with {} messages",
            request.history.len()
        );

        let body = AnthropicRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: prompts::system_prompt(&request.context),
            messages: &request.history,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ToolEvalError::LlmApi(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ToolEvalError::LlmApi(format!("Failed to parse response: {}", e)))?;

        if api_response.role != Role::Assistant {
            return Err(ToolEvalError::LlmApi(
                "Response was not an assistant message".to_string(),
            ));
        }

        api_response
            .content
            .into_iter()
            .find_map(|c| c.text)
            .map(ChatMessage::assistant)
            .ok_or_else(|| ToolEvalError::LlmApi("Empty response from API".to_string()))
    }
}
