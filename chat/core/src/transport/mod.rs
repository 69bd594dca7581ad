//! Chat Backend Transport
//!
//! Abstracted access to the chat backend through a common trait.
//!
//! # Available Transports
//!
//! - **HTTP**: JSON request, plain-text reply (default)
//!
//! # Usage
//!
//! ```ignore
//! use chat_core::transport::{ChatTransport, HttpChatTransport, Outcome};
//!
//! let transport = HttpChatTransport::new("http://localhost:8080/api/chat", timeout)?;
//! match transport.send("Hello").await {
//!     Outcome::Success(reply) => println!("{reply}"),
//!     Outcome::Failure(reason) => eprintln!("{reason}"),
//! }
//! ```

mod http;
mod traits;

pub use http::{HttpChatTransport, TransportError};
pub use traits::{ChatTransport, Outcome};
