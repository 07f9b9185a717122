//! Streaming client for the three-agent decision debate service.
//!
//! The service answers `POST /debate/stream` with a server-pushed event stream
//! describing a PRO / CON / JUDGE debate. This crate decodes that stream and
//! projects it onto a single [`DebateState`] that a UI observes.
//!
//! - [`decoder`]: incremental `event:`/`data:` block decoder
//! - [`dispatch`]: maps decoded events onto state transitions
//! - [`session`]: run lifecycle, superseded-run protection, observable state
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use debate_client::{DebateClient, DebateRequest, DebateSession};
//!
//! let client = DebateClient::from_env()?;
//! let session = DebateSession::new(Arc::new(client));
//! let mut updates = session.subscribe();
//!
//! tokio::spawn(async move {
//!     while updates.changed().await.is_ok() {
//!         println!("{:?}", updates.borrow().phase);
//!     }
//! });
//!
//! session.start(DebateRequest::new("Should we rewrite the billing service?")).await;
//! let state = session.snapshot();
//! ```

pub mod config;
pub mod decoder;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod state;
pub mod streaming;
pub mod types;

pub use config::DebateConfig;
pub use decoder::{FrameDecoder, SseFrame};
pub use dispatch::{dispatch, DebateEvent};
pub use error::{DebateError, Result};
pub use session::{DebateSession, DebateTransport};
pub use state::{AgentStatuses, DebateState};
pub use streaming::{ByteStream, FrameStream};
pub use types::*;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::{header, Client};
use tracing::{debug, warn};

/// HTTP transport for the debate service.
#[derive(Clone)]
pub struct DebateClient {
    http_client: Client,
    base_url: String,
}

impl DebateClient {
    /// Create a client for the service at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create from a loaded [`DebateConfig`].
    pub fn from_config(config: &DebateConfig) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| DebateError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(&config.api_url).with_http_client(http_client))
    }

    /// Create from environment variables (see [`DebateConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::from_config(&DebateConfig::from_env()?)
    }

    /// Use a preconfigured `reqwest` client.
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint that streams a debate.
    pub fn stream_url(&self) -> String {
        format!("{}/debate/stream", self.base_url)
    }

    /// Send the debate request and return the raw event-stream body.
    pub async fn open_stream(&self, request: &DebateRequest) -> Result<ByteStream> {
        let response = self
            .http_client
            .post(self.stream_url())
            .header(header::ACCEPT, "text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Debate request failed");
                DebateError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Debate service error");
            let message = if error_text.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                error_text
            };
            return Err(DebateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(status = %status, url = %self.stream_url(), "Debate stream opened");

        Ok(response.bytes_stream().map_err(DebateError::from).boxed())
    }
}

#[async_trait]
impl DebateTransport for DebateClient {
    async fn open(&self, request: &DebateRequest) -> Result<ByteStream> {
        self.open_stream(request).await
    }
}
