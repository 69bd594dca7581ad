//! Headless Chat Driver
//!
//! Drives one chat session from stdin against the configured backend and
//! prints every session event. Useful for poking a backend without a UI.
//!
//! # Usage
//!
//! ```bash
//! # Default endpoint (http://localhost:8080/api/chat)
//! cargo run -p chat-core --example headless
//!
//! # Custom endpoint and verbose logging
//! CHAT_ENDPOINT=http://10.0.0.5:8080/api/chat RUST_LOG=debug \
//!     cargo run -p chat-core --example headless
//! ```

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use chat_core::{load_config, ChatController, ChatEvent, HttpChatTransport, Sender};

fn render(event: &ChatEvent) {
    match event {
        ChatEvent::Submitted { message } | ChatEvent::Resolved { message, .. } => {
            let who = match (message.sender, message.is_error) {
                (Sender::User, _) => "you",
                (Sender::Bot, false) => "bot",
                (Sender::Bot, true) => "bot (error)",
            };
            println!(
                "[{}] {who}: {}",
                message.timestamp.format("%H:%M"),
                message.text
            );
        }
        ChatEvent::DraftChanged { .. } => {}
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chat_core=info".parse()?),
        )
        .with_target(true)
        .init();

    let config = load_config()?;
    info!(endpoint = %config.endpoint, source = %config.source(), "Starting headless chat");

    let transport = HttpChatTransport::from_config(&config)?;
    let (tx, mut rx) = mpsc::channel(100);
    let mut controller = ChatController::new(transport, config, tx);

    for message in controller.session().messages() {
        println!("bot: {}", message.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        controller.update_draft(line).await;
        controller.submit().await;

        while let Ok(event) = rx.try_recv() {
            render(&event);
        }
        println!("status: {}", controller.snapshot().status());
    }

    Ok(())
}
