//! Debate session: owns the state, drives one run from request to terminal phase.
//!
//! A run is a single sequential read loop. Frames already buffered are decoded
//! and applied before the next body fragment is awaited, so observers see every
//! intermediate state in wire order.
//!
//! State lives in a [`tokio::sync::watch`] channel. Observers call
//! [`DebateSession::subscribe`] and are woken on every mutation.
//!
//! # Superseded runs
//!
//! Every `start` and `reset` advances a run identifier. Each mutation checks,
//! under the watch lock, that its run is still current and is dropped if not,
//! so a run abandoned by `reset` or by a newer `start` can keep reading its
//! body without touching shared state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::dispatch::DebateEvent;
use crate::error::Result;
use crate::state::DebateState;
use crate::streaming::{ByteStream, FrameStream};
use crate::types::{DebateRequest, Language};

/// Opens the response body for a debate request.
///
/// Implementations return `Err` for transport-level failure: connection
/// errors, non-success status, or a response without a body.
#[async_trait]
pub trait DebateTransport: Send + Sync {
    async fn open(&self, request: &DebateRequest) -> Result<ByteStream>;
}

/// Owner of one [`DebateState`] and the lifecycle of the runs that fill it.
pub struct DebateSession {
    transport: Arc<dyn DebateTransport>,
    state: watch::Sender<DebateState>,
    run: AtomicU64,
}

impl DebateSession {
    pub fn new(transport: Arc<dyn DebateTransport>) -> Self {
        // Mutations do not need a live receiver; observers subscribe later.
        let (state, _) = watch::channel(DebateState::default());
        Self {
            transport,
            state,
            run: AtomicU64::new(0),
        }
    }

    /// Receive a notification on every state change.
    pub fn subscribe(&self) -> watch::Receiver<DebateState> {
        self.state.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> DebateState {
        self.state.borrow().clone()
    }

    /// Return the state to idle and abandon any in-flight run.
    pub fn reset(&self) {
        self.run.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(DebateState::reset);
    }

    /// Run a debate for the given inputs. See [`DebateSession::start`].
    pub async fn start_debate(
        &self,
        decision: impl Into<String>,
        context: impl Into<String>,
        model: impl Into<String>,
        language: Language,
    ) {
        let request = DebateRequest::new(decision)
            .context(context)
            .model(model)
            .language(language);
        self.start(request).await
    }

    /// Run one debate to completion. Never fails: every error ends up in
    /// [`DebateState::error`] with phase `error`.
    pub async fn start(&self, request: DebateRequest) {
        let run = self.run.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(DebateState::begin);

        info!(
            run,
            model = %request.model,
            language = request.language.as_str(),
            "Starting debate"
        );

        let body = match self.transport.open(&request).await {
            Ok(body) => body,
            Err(e) => {
                warn!(run, error = %e, "Debate request failed");
                self.apply(run, |state| state.fail(e.to_string()));
                return;
            }
        };

        let mut frames = FrameStream::new(body);
        while let Some(frame) = frames.next().await {
            match frame {
                Ok(frame) => {
                    if let Some(event) = DebateEvent::from_frame(&frame) {
                        debug!(run, event = %frame.event, "Applying debate event");
                        self.apply(run, |state| event.apply(state));
                    }
                }
                Err(e) => {
                    warn!(run, error = %e, "Debate stream interrupted");
                    self.apply(run, |state| state.fail(e.to_string()));
                    return;
                }
            }
        }

        self.apply(run, DebateState::complete);

        let phase = self.state.borrow().phase;
        info!(run, ?phase, "Debate stream finished");
    }

    /// Mutate the state on behalf of `run`. Returns false if the run is stale.
    fn apply(&self, run: u64, f: impl FnOnce(&mut DebateState)) -> bool {
        let applied = self.state.send_if_modified(|state| {
            if self.run.load(Ordering::SeqCst) != run {
                return false;
            }
            f(state);
            true
        });
        if !applied {
            debug!(run, "Discarding update from superseded debate run");
        }
        applied
    }
}
