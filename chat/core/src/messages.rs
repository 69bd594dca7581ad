//! Chat Messages
//!
//! The entries of a conversation log. A message is immutable once it has been
//! appended to a session; the log only ever grows.
//!
//! # Ordering
//!
//! Message IDs are handed out by the owning session from a monotonically
//! increasing sequence, so sorting by [`MessageId`] reproduces append order.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message identifier
///
/// Unique within a session and ordered by creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    /// The ID that follows this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg_{}", self.0)
    }
}

/// Who sent a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the user
    User,
    /// Produced by the chat backend, or synthesized on its behalf
    Bot,
}

/// A message in the conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: MessageId,
    /// Message content
    pub text: String,
    /// Who sent this message
    pub sender: Sender,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
    /// Set only on synthetic messages standing in for a failed request
    #[serde(default)]
    pub is_error: bool,
}

impl Message {
    /// Create a user message
    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, Sender::User, text.into(), false)
    }

    /// Create a bot reply
    pub fn bot(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, Sender::Bot, text.into(), false)
    }

    /// Create a bot message that reports a failed request
    pub fn bot_error(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, Sender::Bot, text.into(), true)
    }

    fn new(id: MessageId, sender: Sender, text: String, is_error: bool) -> Self {
        Self {
            id,
            text,
            sender,
            timestamp: Utc::now(),
            is_error,
        }
    }

    /// Whether the user wrote this message
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}
