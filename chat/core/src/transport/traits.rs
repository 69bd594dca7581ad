//! Chat Transport Traits
//!
//! Trait definitions for the chat backend exchange. The controller only ever
//! talks to a [`ChatTransport`], so tests and alternative backends can stand
//! in for the HTTP implementation.
//!
//! # Contract
//!
//! One `send` call issues exactly one request and yields exactly one
//! [`Outcome`]. A transport never touches session state and never retries.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a single request to the chat backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The backend replied; the body is the bot's text
    Success(String),
    /// The exchange failed; the reason is for diagnostics only
    Failure(String),
}

impl Outcome {
    /// Whether the backend replied
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(text) => write!(f, "success ({} bytes)", text.len()),
            Self::Failure(reason) => write!(f, "failure: {reason}"),
        }
    }
}

/// Chat transport trait
///
/// Implement this trait to reach a different kind of chat backend.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Get the transport name (e.g., "HTTP")
    fn name(&self) -> &str;

    /// Send the user's text and wait for the single outcome
    ///
    /// Every failure mode (bad status, network fault, unreadable body,
    /// timeout) must come back as [`Outcome::Failure`] rather than hang.
    async fn send(&self, user_text: &str) -> Outcome;
}
