//! Conversation manager
//!
//! Owns one session's history and drives the assistant with single-flight
//! discipline: while a reply is pending, further messages are dropped rather
//! than queued.

use super::context::build_context;
use super::session::{InFlightGuard, Session, SessionState, FALLBACK_REPLY};
use crate::error::Result;
use crate::services::llm::{ChatRequest, LlmClient};
use crate::store::DataStore;
use crate::types::{ChatMessage, Role};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Assistant session over a fixed dataset
pub struct ConversationManager {
    session: Arc<Session>,
    client: Arc<dyn LlmClient>,
    context: Arc<str>,
}

impl ConversationManager {
    /// Create an idle session with empty history
    ///
    /// The dataset context is serialized once here; the store is immutable.
    pub fn new(store: &DataStore, client: Arc<dyn LlmClient>) -> Result<Self> {
        let context = build_context(store)?;
        info!(
            "Conversation started with {} evaluations in context",
            store.len()
        );

        Ok(Self {
            session: Arc::new(Session::default()),
            client,
            context: context.into(),
        })
    }

    /// Send a user message and wait for the reply to land in the history
    ///
    /// Blank text, or a call while another reply is pending, does nothing.
    /// Failures never escape: they are logged and recorded as
    /// [`FALLBACK_REPLY`]. The exchange runs on its own Tokio task, so it still
    /// completes and updates the history if this future is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn send(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank message");
            return;
        }

        let Some(guard) = InFlightGuard::acquire(&self.session) else {
            warn!("Ignoring message while a reply is pending");
            return;
        };

        let history = guard.session().push(ChatMessage::user(text));
        let request = ChatRequest {
            context: self.context.to_string(),
            history,
        };
        let client = Arc::clone(&self.client);

        let exchange = tokio::spawn(async move {
            debug!("Dispatching {} messages", request.history.len());
            let reply = match client.complete(request).await {
                Ok(reply) if reply.role == Role::Assistant => reply,
                Ok(reply) => {
                    error!("Assistant endpoint replied with role {:?}", reply.role);
                    ChatMessage::assistant(FALLBACK_REPLY)
                }
                Err(e) => {
                    error!("Error calling assistant endpoint: {}", e);
                    ChatMessage::assistant(FALLBACK_REPLY)
                }
            };
            guard.settle(reply);
        });

        if let Err(e) = exchange.await {
            error!("Assistant exchange aborted: {}", e);
        }
    }

    /// Copy of the history in send order
    pub fn history(&self) -> Vec<ChatMessage> {
        self.session.snapshot()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_sending(&self) -> bool {
        self.state() == SessionState::Sending
    }

    /// Serialized dataset sent with every request
    pub fn context(&self) -> &str {
        &self.context
    }
}
