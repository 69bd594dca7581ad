//! Chat Events
//!
//! Change notifications sent from the controller to presentation surfaces.
//! Each event describes one complete transition of the session, so a surface
//! that applies events in order always holds a consistent view.
//!
//! # Design Philosophy
//!
//! Surfaces are renderers. They read the session through snapshots and
//! learn about changes from these events; they never mutate session state
//! directly.

use serde::{Deserialize, Serialize};

use crate::messages::Message;

/// Events from the controller to a surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A user message was appended; the session is now pending and the
    /// draft is empty
    Submitted {
        /// The appended user message
        message: Message,
    },

    /// The in-flight request finished; the session is no longer pending
    Resolved {
        /// The appended bot message (flagged `is_error` on failure)
        message: Message,
        /// Whether the request succeeded
        connected: bool,
    },

    /// The draft text changed
    DraftChanged {
        /// New draft text
        text: String,
    },
}

impl ChatEvent {
    /// The message appended by this transition, if any
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::Submitted { message } | Self::Resolved { message, .. } => Some(message),
            Self::DraftChanged { .. } => None,
        }
    }
}
