//! Event dispatcher: maps decoded stream events onto [`DebateState`].
//!
//! | event      | payload            | effect                                   |
//! |------------|--------------------|------------------------------------------|
//! | `progress` | `{agent}`          | agent status -> thinking                 |
//! | `result`   | `{agent, data}`    | store arguments / verdict, status -> done |
//! | `done`     | `{}`               | phase -> done                            |
//! | `error`    | `{message}`        | record error, phase -> error             |
//!
//! Anything else, including unknown agents, is a no-op. A payload that is not
//! JSON, or a `result` whose data does not fit the agent's shape, drops that
//! one event and leaves the state untouched.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::decoder::SseFrame;
use crate::state::DebateState;
use crate::types::{AgentRole, AgentStatus, Argument, Phase, Verdict};

/// Message recorded when an `error` event carries no `message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "debate service reported an error";

/// A decoded and typed stream event.
#[derive(Debug, Clone, PartialEq)]
pub enum DebateEvent {
    Progress(AgentRole),
    ProArguments(Vec<Argument>),
    ConArguments(Vec<Argument>),
    Verdict(Verdict),
    Done,
    Error(String),
}

#[derive(Debug, Deserialize)]
struct AgentPayload {
    agent: String,
}

#[derive(Debug, Deserialize)]
struct ResultPayload {
    agent: String,
    data: Value,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
}

impl DebateEvent {
    /// Type a parsed payload. `None` means "ignore this event".
    pub fn parse(event_type: &str, payload: Value) -> Option<Self> {
        match event_type {
            "progress" => {
                let payload: AgentPayload = from_payload(event_type, payload)?;
                let role = known_agent(event_type, &payload.agent)?;
                Some(DebateEvent::Progress(role))
            }
            "result" => {
                let payload: ResultPayload = from_payload(event_type, payload)?;
                match known_agent(event_type, &payload.agent)? {
                    AgentRole::Pro => {
                        from_payload(event_type, payload.data).map(DebateEvent::ProArguments)
                    }
                    AgentRole::Con => {
                        from_payload(event_type, payload.data).map(DebateEvent::ConArguments)
                    }
                    AgentRole::Judge => {
                        from_payload(event_type, payload.data).map(DebateEvent::Verdict)
                    }
                }
            }
            "done" => Some(DebateEvent::Done),
            "error" => {
                let message = serde_json::from_value::<ErrorPayload>(payload)
                    .ok()
                    .and_then(|p| p.message)
                    .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
                Some(DebateEvent::Error(message))
            }
            other => {
                debug!(event = other, "Ignoring unknown debate event");
                None
            }
        }
    }

    /// Parse a frame's payload text and type it.
    pub fn from_frame(frame: &SseFrame) -> Option<Self> {
        match serde_json::from_str::<Value>(&frame.data) {
            Ok(payload) => Self::parse(&frame.event, payload),
            Err(e) => {
                debug!(
                    event = %frame.event,
                    error = %e,
                    data = %frame.data.chars().take(200).collect::<String>(),
                    "Dropping malformed debate frame"
                );
                None
            }
        }
    }

    /// Apply this event to the state.
    pub fn apply(self, state: &mut DebateState) {
        match self {
            DebateEvent::Progress(role) => {
                state.agent_status.advance(role, AgentStatus::Thinking);
            }
            DebateEvent::ProArguments(arguments) => {
                state.pro_arguments = arguments;
                state.agent_status.advance(AgentRole::Pro, AgentStatus::Done);
            }
            DebateEvent::ConArguments(arguments) => {
                state.con_arguments = arguments;
                state.agent_status.advance(AgentRole::Con, AgentStatus::Done);
            }
            DebateEvent::Verdict(verdict) => {
                state.verdict = Some(verdict);
                state.agent_status.advance(AgentRole::Judge, AgentStatus::Done);
            }
            DebateEvent::Done => {
                if state.phase != Phase::Error {
                    state.phase = Phase::Done;
                }
            }
            DebateEvent::Error(message) => state.fail(message),
        }
    }
}

/// Apply one parsed stream event to `state`.
pub fn dispatch(event_type: &str, payload: Value, state: &mut DebateState) {
    if let Some(event) = DebateEvent::parse(event_type, payload) {
        event.apply(state);
    }
}

fn known_agent(event_type: &str, agent: &str) -> Option<AgentRole> {
    let role = AgentRole::parse(agent);
    if role.is_none() {
        debug!(event = event_type, agent, "Ignoring event for unknown agent");
    }
    role
}

fn from_payload<T: serde::de::DeserializeOwned>(event_type: &str, payload: Value) -> Option<T> {
    match serde_json::from_value(payload) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(event = event_type, error = %e, "Dropping debate event with unexpected shape");
            None
        }
    }
}
