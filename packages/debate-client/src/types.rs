//! Debate request, agent output and status types.
//!
//! Field names match the debate service's wire contract exactly. Unknown
//! fields are ignored so newer service versions stay readable.

use serde::{Deserialize, Serialize};

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

// =============================================================================
// Request
// =============================================================================

/// Language the agents answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    /// Parse a language code (`en`, `ru`), ignoring case and surrounding whitespace.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "ru" => Some(Language::Ru),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }
}

/// Body of `POST /debate/stream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateRequest {
    /// The decision under debate
    pub decision: String,

    /// Additional context and constraints
    #[serde(default)]
    pub context: String,

    /// Model identifier passed through to the service
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub language: Language,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl DebateRequest {
    /// Create a request for a decision with default context, model and language.
    pub fn new(decision: impl Into<String>) -> Self {
        Self {
            decision: decision.into(),
            context: String::new(),
            model: default_model(),
            language: Language::default(),
        }
    }

    /// Set the additional context.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Set the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the answer language.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

// =============================================================================
// Agents
// =============================================================================

/// One of the three fixed debate roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Pro,
    Con,
    Judge,
}

impl AgentRole {
    pub const ALL: [AgentRole; 3] = [AgentRole::Pro, AgentRole::Con, AgentRole::Judge];

    /// Parse a wire agent identifier. Unknown identifiers yield `None`.
    pub fn parse(agent: &str) -> Option<Self> {
        match agent {
            "pro" => Some(AgentRole::Pro),
            "con" => Some(AgentRole::Con),
            "judge" => Some(AgentRole::Judge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Pro => "pro",
            AgentRole::Con => "con",
            AgentRole::Judge => "judge",
        }
    }
}

/// Progress of a single agent. Ordered: `Idle < Thinking < Done`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Idle,
    Thinking,
    Done,
}

/// Top-level lifecycle of one debate run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Debating,
    Done,
    Error,
}

// =============================================================================
// Agent output
// =============================================================================

/// A single PRO or CON argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub claim: String,
    pub reasoning: String,
    /// Fact or observation, or an `assumption:`-prefixed statement
    pub evidence: String,
    pub risk: String,
    /// Stored as received; the service contract is 0..=1
    pub confidence: f64,
}

/// One row of the judge's scorecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardCriterion {
    pub criterion: String,
    pub weight: f64,
    pub pro_score: f64,
    pub con_score: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Go,
    NoGo,
    ConditionalGo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Pro,
    Con,
    Tie,
}

/// The judge's final structured output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub decision: Decision,
    pub winner: Winner,
    pub confidence: f64,
    pub summary: String,
    pub scorecard: Vec<ScorecardCriterion>,
    pub key_risks: Vec<String>,
    pub assumptions_to_verify: Vec<String>,
    pub next_48h_actions: Vec<String>,
    pub needs_more_info: bool,
    #[serde(default)]
    pub clarifying_questions: Vec<String>,
}
