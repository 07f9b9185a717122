//! The single mutable debate state observed by the UI.

use serde::Serialize;

use crate::types::{AgentRole, AgentStatus, Argument, Phase, Verdict};

/// Per-role agent status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentStatuses {
    pub pro: AgentStatus,
    pub con: AgentStatus,
    pub judge: AgentStatus,
}

impl AgentStatuses {
    pub fn get(&self, role: AgentRole) -> AgentStatus {
        match role {
            AgentRole::Pro => self.pro,
            AgentRole::Con => self.con,
            AgentRole::Judge => self.judge,
        }
    }

    /// Move `role` forward to `status`. Never regresses.
    pub fn advance(&mut self, role: AgentRole, status: AgentStatus) {
        let slot = match role {
            AgentRole::Pro => &mut self.pro,
            AgentRole::Con => &mut self.con,
            AgentRole::Judge => &mut self.judge,
        };
        if status > *slot {
            *slot = status;
        }
    }
}

/// Typed projection of one debate run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DebateState {
    pub phase: Phase,
    pub agent_status: AgentStatuses,
    pub pro_arguments: Vec<Argument>,
    pub con_arguments: Vec<Argument>,
    pub verdict: Option<Verdict>,
    pub error: Option<String>,
}

impl DebateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every field to its initial idle value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reset and enter the `debating` phase.
    pub fn begin(&mut self) {
        self.reset();
        self.phase = Phase::Debating;
    }

    /// Record a failure. The first message is kept; the phase becomes `error`.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(message.into());
        }
        self.phase = Phase::Error;
    }

    /// Mark the run finished unless an error was recorded.
    pub fn complete(&mut self) {
        if self.error.is_none() {
            self.phase = Phase::Done;
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Debating
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Done | Phase::Error)
    }
}
