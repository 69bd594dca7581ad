//! HTTP Transport Implementation
//!
//! Talks to the chat backend's REST endpoint.
//!
//! # Backend API
//!
//! - `POST /api/chat` with JSON body `{"message": "<user text>"}`
//! - A success status carries the bot reply as a plain-text body
//! - Anything else (error status, network fault, timeout) is a failure
//!
//! The reply body is passed through untouched; it is never parsed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use super::traits::{ChatTransport, Outcome};
use crate::config::ChatConfig;

/// Errors from a single HTTP exchange
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend returned {status}: {body}")]
    Status {
        /// Response status
        status: StatusCode,
        /// Response body, if it could be read
        body: String,
    },

    /// The request did not complete within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The request could not be sent or no response arrived
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body could not be read
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// JSON payload expected by the backend
#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// HTTP chat transport
#[derive(Clone, Debug)]
pub struct HttpChatTransport {
    /// Full URL of the chat endpoint
    endpoint: String,
    /// Per-request timeout
    timeout: Duration,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpChatTransport {
    /// Create a transport for `endpoint` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Client`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            endpoint: endpoint.into(),
            timeout,
            http_client,
        })
    }

    /// Create from a loaded [`ChatConfig`]
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Client`] if the HTTP client cannot be built.
    pub fn from_config(config: &ChatConfig) -> Result<Self, TransportError> {
        Self::new(config.endpoint.clone(), config.request_timeout)
    }

    /// Endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform the exchange, keeping the failure detail
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] describing why no reply text is available.
    pub async fn exchange(&self, user_text: &str) -> Result<String, TransportError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&ChatRequest { message: user_text })
            .send()
            .await
            .map_err(|e| self.classify(e, TransportError::Request))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        response
            .text()
            .await
            .map_err(|e| self.classify(e, TransportError::Body))
    }

    fn classify(
        &self,
        err: reqwest::Error,
        otherwise: fn(reqwest::Error) -> TransportError,
    ) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            otherwise(err)
        }
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn send(&self, user_text: &str) -> Outcome {
        match self.exchange(user_text).await {
            Ok(reply) => {
                tracing::debug!(endpoint = %self.endpoint, bytes = reply.len(), "Chat reply received");
                Outcome::Success(reply)
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "Chat request failed");
                Outcome::Failure(e.to_string())
            }
        }
    }
}
