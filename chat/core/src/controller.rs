//! Chat Controller - The Session Driver
//!
//! The controller ties the session store to a transport:
//! - Applies user submissions to the session
//! - Runs the single outstanding request against the backend
//! - Resolves the session with the request's outcome
//! - Notifies the surface of every applied transition
//!
//! # Request Lifecycle
//!
//! ```text
//!  surface            controller                 transport
//!     │  submit()        │                           │
//!     │─────────────────▶│ session.submit()          │
//!     │◀──── Submitted ──│                           │
//!     │                  │ send(text) ──────────────▶│
//!     │                  │◀────────────── Outcome ───│
//!     │                  │ session.resolve(outcome)  │
//!     │◀───── Resolved ──│                           │
//! ```
//!
//! There is exactly one suspension point, between the submit and the
//! resolve. A submission while a request is outstanding is dropped, not
//! queued.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::config::ChatConfig;
use crate::events::ChatEvent;
use crate::session::{SessionSnapshot, SessionStore};
use crate::transport::{ChatTransport, Outcome};

/// Extra time granted to a transport beyond the configured request timeout
/// before the controller gives up on it
pub const RESPONSE_GRACE: Duration = Duration::from_secs(1);

/// The chat controller - owns one session and drives its requests
pub struct ChatController<T: ChatTransport> {
    /// Configuration
    config: ChatConfig,
    /// Chat backend transport
    transport: Arc<T>,
    /// The conversation
    session: SessionStore,
    /// Channel to send events to the surface
    tx: mpsc::Sender<ChatEvent>,
    /// Outcome of a request started with `begin_submit`
    in_flight: Option<oneshot::Receiver<Outcome>>,
}

impl<T: ChatTransport + 'static> ChatController<T> {
    /// Create a controller with a freshly seeded session
    pub fn new(transport: T, config: ChatConfig, tx: mpsc::Sender<ChatEvent>) -> Self {
        Self::with_session(transport, config, SessionStore::new(), tx)
    }

    /// Create a controller around an existing session
    pub fn with_session(
        transport: T,
        config: ChatConfig,
        session: SessionStore,
        tx: mpsc::Sender<ChatEvent>,
    ) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            session,
            tx,
            in_flight: None,
        }
    }

    /// Get the session
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Copy the whole session state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Get the configuration
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Whether a request is in flight
    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }

    /// Replace the draft
    pub async fn update_draft(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.session.update_draft(text.clone());
        self.emit(ChatEvent::DraftChanged { text }).await;
    }

    /// Submit the draft and wait for the reply
    ///
    /// Returns `false` without side effects when the draft is blank or a
    /// request is already in flight.
    pub async fn submit(&mut self) -> bool {
        match self.start(None).await {
            Some(text) => {
                self.run_to_completion(text).await;
                true
            }
            None => false,
        }
    }

    /// Submit `text` directly, bypassing the draft, and wait for the reply
    pub async fn submit_text(&mut self, text: impl Into<String>) -> bool {
        match self.start(Some(text.into())).await {
            Some(text) => {
                self.run_to_completion(text).await;
                true
            }
            None => false,
        }
    }

    /// Submit the draft without waiting for the reply
    ///
    /// The request runs on the tokio runtime; call [`Self::poll_outcome`] or
    /// [`Self::wait_outcome`] to apply its result.
    pub async fn begin_submit(&mut self) -> bool {
        let Some(text) = self.start(None).await else {
            return false;
        };

        let (outcome_tx, outcome_rx) = oneshot::channel();
        let transport = Arc::clone(&self.transport);
        let deadline = self.response_deadline();

        tokio::spawn(async move {
            let outcome = guarded_send(transport.as_ref(), &text, deadline).await;
            if outcome_tx.send(outcome).is_err() {
                tracing::debug!("Controller gone, dropping late outcome");
            }
        });

        self.in_flight = Some(outcome_rx);
        true
    }

    /// Apply the outcome of a `begin_submit` request if it has arrived
    ///
    /// Call this regularly from the surface's event loop.
    /// Returns true if the session was resolved.
    pub async fn poll_outcome(&mut self) -> bool {
        let outcome = {
            let Some(rx) = self.in_flight.as_mut() else {
                return false;
            };
            match rx.try_recv() {
                Ok(outcome) => outcome,
                Err(oneshot::error::TryRecvError::Empty) => return false,
                Err(oneshot::error::TryRecvError::Closed) => lost_request(),
            }
        };

        self.in_flight = None;
        self.resolve(outcome).await
    }

    /// Wait for the outcome of a `begin_submit` request and apply it
    ///
    /// Returns false if no request was started with `begin_submit`.
    pub async fn wait_outcome(&mut self) -> bool {
        let Some(rx) = self.in_flight.take() else {
            return false;
        };
        let outcome = rx.await.unwrap_or_else(|_| lost_request());
        self.resolve(outcome).await
    }

    /// Resolve the in-flight request with `outcome`
    ///
    /// Returns false when nothing was pending; the outcome is discarded.
    pub async fn resolve(&mut self, outcome: Outcome) -> bool {
        let Some(message) = self.session.resolve(outcome).cloned() else {
            return false;
        };
        let connected = self.session.is_connected();

        tracing::info!(
            id = %message.id,
            connected,
            transport = self.transport.name(),
            "Request resolved"
        );
        self.emit(ChatEvent::Resolved { message, connected }).await;
        true
    }

    /// Apply a submission to the session and announce it
    async fn start(&mut self, text: Option<String>) -> Option<String> {
        let sent = match text {
            Some(text) => self.session.submit_text(text)?,
            None => self.session.submit()?,
        };

        // Anything still attached belongs to an earlier, already resolved request
        self.in_flight = None;

        if let Some(message) = self.session.last_message().cloned() {
            self.emit(ChatEvent::Submitted { message }).await;
        }
        Some(sent)
    }

    async fn run_to_completion(&mut self, text: String) {
        let deadline = self.response_deadline();
        let outcome = guarded_send(self.transport.as_ref(), &text, deadline).await;
        self.resolve(outcome).await;
    }

    fn response_deadline(&self) -> Duration {
        self.config.request_timeout.saturating_add(RESPONSE_GRACE)
    }

    /// Send an event to the surface
    async fn emit(&self, event: ChatEvent) {
        if let Err(e) = self.tx.send(event).await {
            tracing::warn!("Failed to send event to surface: {}", e);
        }
    }
}

/// Run one transport request, converting a hang into a failure
async fn guarded_send<T: ChatTransport + ?Sized>(
    transport: &T,
    text: &str,
    deadline: Duration,
) -> Outcome {
    match tokio::time::timeout(deadline, transport.send(text)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::warn!(
                transport = transport.name(),
                deadline_ms = deadline.as_millis() as u64,
                "Transport produced no outcome in time"
            );
            Outcome::Failure(format!("no outcome within {deadline:?}"))
        }
    }
}

fn lost_request() -> Outcome {
    Outcome::Failure("request task ended without an outcome".to_string())
}
