//! Conversation state and the in-flight guard
//!
//! History is append-only. The in-flight flag is only ever set by acquiring
//! an [`InFlightGuard`] and only ever cleared when that guard is dropped.

use crate::types::ChatMessage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// Reply appended whenever an exchange does not produce a usable answer
pub const FALLBACK_REPLY: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

/// Observable state of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

#[derive(Debug, Default)]
pub(crate) struct Session {
    history: Mutex<Vec<ChatMessage>>,
    in_flight: AtomicBool,
}

impl Session {
    fn messages(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        // Nothing panics while holding the lock, but a poisoned history is
        // still a valid history.
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append and return the history as it now stands
    pub(crate) fn push(&self, message: ChatMessage) -> Vec<ChatMessage> {
        let mut messages = self.messages();
        messages.push(message);
        messages.clone()
    }

    pub(crate) fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages().clone()
    }

    pub(crate) fn state(&self) -> SessionState {
        if self.in_flight.load(Ordering::Acquire) {
            SessionState::Sending
        } else {
            SessionState::Idle
        }
    }
}

/// Exclusive right to run one exchange on a session
///
/// Dropping the guard without [`InFlightGuard::settle`] records
/// [`FALLBACK_REPLY`], so every accepted message gets an answer even if the
/// exchange panics or is torn down. The session returns to
/// [`SessionState::Idle`] only after that answer is in the history.
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    session: Arc<Session>,
    settled: bool,
}

impl InFlightGuard {
    /// `None` when another exchange already holds the session
    pub(crate) fn acquire(session: &Arc<Session>) -> Option<Self> {
        session
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                session: Arc::clone(session),
                settled: false,
            })
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    /// Record the reply, then release the session
    pub(crate) fn settle(mut self, reply: ChatMessage) {
        self.session.push(reply);
        self.settled = true;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Exchange ended without a reply, recording fallback");
            self.session.push(ChatMessage::assistant(FALLBACK_REPLY));
        }
        self.session.in_flight.store(false, Ordering::Release);
    }
}
