//! Error types for the tool evaluation tracker
//!
//! This module provides error handling using thiserror for structured
//! error definitions and anyhow for error propagation at the binary edge.

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for tooleval operations
#[derive(Error, Debug)]
pub enum ToolEvalError {
    /// A record violates a dataset invariant
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    /// Dataset could not be loaded
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Status text outside the closed enumeration
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// LLM API request failed or returned an unusable payload
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for tooleval operations
pub type Result<T> = std::result::Result<T, ToolEvalError>;

/// Convert anyhow::Error to ToolEvalError
impl From<anyhow::Error> for ToolEvalError {
    fn from(err: anyhow::Error) -> Self {
        ToolEvalError::Other(err.to_string())
    }
}
