//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;
use tooleval_core::{ChatMessage, ChatRequest, DataStore, LlmClient, Result, ToolEvalError};

/// Path of the shared evaluation fixture
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/evaluations.json")
}

/// Load the shared evaluation fixture
pub fn fixture_store() -> DataStore {
    DataStore::load(&fixture_path()).expect("Failed to load fixture dataset")
}

/// Client that holds every exchange open until released
pub struct GatedClient {
    reply: String,
    calls: AtomicUsize,
    pub started: Notify,
    pub release: Notify,
}

impl GatedClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for GatedClient {
    async fn complete(&self, _request: ChatRequest) -> Result<ChatMessage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(ChatMessage::assistant(self.reply.clone()))
    }
}

/// Client whose every exchange fails
pub struct FailingClient;

#[async_trait]
impl LlmClient for FailingClient {
    async fn complete(&self, _request: ChatRequest) -> Result<ChatMessage> {
        Err(ToolEvalError::LlmApi(
            "API request failed with status 503 Service Unavailable".to_string(),
        ))
    }
}

/// Client that panics mid-exchange
pub struct PanickingClient;

#[async_trait]
impl LlmClient for PanickingClient {
    async fn complete(&self, _request: ChatRequest) -> Result<ChatMessage> {
        panic!("client bug")
    }
}
