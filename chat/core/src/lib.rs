//! Chat Core - Headless Chat Session Controller
//!
//! This crate provides the client-side logic of a single-conversation chat
//! client, completely independent of any UI framework. A web page, a
//! terminal UI or a test harness can drive it the same way.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       UI Surface                             │
//! │         update_draft / submit           ChatEvent            │
//! └──────────────────┬──────────────────────────▲────────────────┘
//!                    │                          │
//! ┌──────────────────┼──────────────────────────┼────────────────┐
//! │                  ▼      CHAT CORE           │                │
//! │  ┌───────────────────────────────────────────────────────┐   │
//! │  │                   ChatController                      │   │
//! │  │   ┌──────────────────┐        ┌────────────────────┐  │   │
//! │  │   │   SessionStore   │        │   ChatTransport    │  │   │
//! │  │   │ log/pending/conn │        │ (HTTP /api/chat)   │  │   │
//! │  │   └──────────────────┘        └────────────────────┘  │   │
//! │  └───────────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ChatController`]: Drives one session against a transport
//! - [`SessionStore`]: Message log, pending flag, connected flag, draft
//! - [`ChatTransport`]: One request in, one [`Outcome`] out
//! - [`HttpChatTransport`]: JSON-over-HTTP implementation
//! - [`ChatEvent`]: Change notifications for the surface
//!
//! # Quick Start
//!
//! ```ignore
//! use chat_core::{config::load_config, ChatController, HttpChatTransport};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     let transport = HttpChatTransport::from_config(&config)?;
//!     let (tx, mut rx) = mpsc::channel(100);
//!     let mut controller = ChatController::new(transport, config, tx);
//!
//!     controller.update_draft("Hello").await;
//!     controller.submit().await;
//!
//!     while let Ok(event) = rx.try_recv() {
//!         // Render event
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`config`]: Endpoint and timeout configuration (TOML, env, overrides)
//! - [`controller`]: The session driver
//! - [`events`]: Notifications from the controller to surfaces
//! - [`messages`]: Conversation messages and IDs
//! - [`session`]: The session state store
//! - [`transport`]: Chat backend abstraction and the HTTP implementation

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controller;
pub mod events;
pub mod messages;
pub mod session;
pub mod transport;

// Re-exports for convenience
pub use config::{
    default_config_path, load_config, load_config_from_path, ChatConfig, ConfigError,
    ConfigOverrides, ConfigSource,
};
pub use controller::ChatController;
pub use events::ChatEvent;
pub use messages::{Message, MessageId, Sender};
pub use session::{
    ConnectionStatus, SessionPhase, SessionSnapshot, SessionStore, APOLOGY, GREETING,
};
pub use transport::{ChatTransport, HttpChatTransport, Outcome, TransportError};
