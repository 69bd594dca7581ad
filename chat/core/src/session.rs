//! Session State Store
//!
//! Owns the conversation: the ordered message log, the pending flag, the
//! connected flag and the draft being composed.
//!
//! # Transitions
//!
//! ```text
//!            submit (non-blank draft)
//!   ┌──────┐ ───────────────────────────▶ ┌──────────────────┐
//!   │ Idle │                              │ AwaitingResponse │
//!   └──────┘ ◀─────────────────────────── └──────────────────┘
//!            resolve (Success | Failure)
//! ```
//!
//! `submit` while awaiting a response and `resolve` while idle are no-ops.
//! Every transition completes inside a single `&mut self` call, so a reader
//! never observes a half-applied state. The store performs no I/O.

use serde::{Deserialize, Serialize};

use crate::messages::{Message, MessageId};
use crate::transport::Outcome;

/// Bot message every session starts with
pub const GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// Text shown in place of a failed reply
pub const APOLOGY: &str =
    "Sorry, I'm having trouble connecting to the service. Please try again later.";

/// Where the session is in its request lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No request in flight; submissions are accepted
    Idle,
    /// One request is outstanding; submissions are ignored
    AwaitingResponse,
}

/// Backend health as last observed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    /// The most recent request succeeded (or none has been made yet)
    Online,
    /// The most recent request failed
    Offline,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "Online"),
            Self::Offline => write!(f, "Offline"),
        }
    }
}

/// A consistent copy of the whole session taken at one instant
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Conversation history, oldest first
    pub messages: Vec<Message>,
    /// Whether a request is in flight
    pub pending: bool,
    /// Whether the most recent request succeeded
    pub connected: bool,
    /// Text being composed
    pub draft: String,
}

impl SessionSnapshot {
    /// Whether the send action should be enabled
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.draft.trim().is_empty()
    }

    /// Connection status label
    pub fn status(&self) -> ConnectionStatus {
        if self.connected {
            ConnectionStatus::Online
        } else {
            ConnectionStatus::Offline
        }
    }

    /// Newest message
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// The conversation state for one session
#[derive(Clone, Debug)]
pub struct SessionStore {
    /// Conversation history
    messages: Vec<Message>,
    /// True exactly while a request is in flight
    pending: bool,
    /// Outcome of the most recent request attempt
    connected: bool,
    /// Text being composed
    draft: String,
    /// ID handed to the next appended message
    next_id: MessageId,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a session seeded with the greeting
    pub fn new() -> Self {
        Self::with_greeting(GREETING)
    }

    /// Create a session seeded with a custom greeting
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut store = Self {
            messages: Vec::new(),
            pending: false,
            connected: true,
            draft: String::new(),
            next_id: MessageId(1),
        };
        let id = store.fresh_id();
        store.messages.push(Message::bot(id, greeting));
        store
    }

    /// Replace the draft
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submit the current draft
    ///
    /// See [`SessionStore::submit_text`].
    pub fn submit(&mut self) -> Option<String> {
        let draft = self.draft.clone();
        self.submit_text(draft)
    }

    /// Submit `text` as a user message
    ///
    /// Appends the message, marks the session pending and clears the draft.
    /// Returns the submitted text for the transport, or `None` when the text
    /// is blank or a request is already in flight (nothing changes then).
    pub fn submit_text(&mut self, text: impl Into<String>) -> Option<String> {
        let text = text.into();

        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank submission");
            return None;
        }
        if self.pending {
            tracing::debug!("Ignoring submission while a request is in flight");
            return None;
        }

        let id = self.fresh_id();
        self.messages.push(Message::user(id, text.clone()));
        self.pending = true;
        self.draft.clear();

        tracing::debug!(id = %id, "User message submitted");
        Some(text)
    }

    /// Apply the outcome of the in-flight request
    ///
    /// Returns the appended message, or `None` when nothing was pending
    /// (a stale or duplicate response).
    pub fn resolve(&mut self, outcome: Outcome) -> Option<&Message> {
        if !self.pending {
            tracing::warn!(outcome = %outcome, "Discarding outcome with no request in flight");
            return None;
        }

        let id = self.fresh_id();
        let message = match outcome {
            Outcome::Success(text) => {
                self.connected = true;
                Message::bot(id, text)
            }
            Outcome::Failure(reason) => {
                tracing::debug!(id = %id, reason = %reason, "Request failed, appending apology");
                self.connected = false;
                Message::bot_error(id, APOLOGY)
            }
        };
        self.messages.push(message);
        self.pending = false;

        self.messages.last()
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Newest message
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Get current message count
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Whether a request is in flight
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether the most recent request succeeded
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Text being composed
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        if self.pending {
            SessionPhase::AwaitingResponse
        } else {
            SessionPhase::Idle
        }
    }

    /// Copy the whole state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            pending: self.pending,
            connected: self.connected,
            draft: self.draft.clone(),
        }
    }

    fn fresh_id(&mut self) -> MessageId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }
}
