use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::error::{DebateError, Result};
use crate::types::{Language, DEFAULT_MODEL};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct DebateConfig {
    pub api_url: String,
    pub model: String,
    pub language: Language,
    pub connect_timeout: Duration,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            language: Language::En,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl DebateConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let language = match lookup("DEBATE_LANGUAGE") {
            Some(code) => Language::parse(&code).ok_or_else(|| {
                DebateError::Config(format!("DEBATE_LANGUAGE must be en or ru, got {:?}", code))
            })?,
            None => defaults.language,
        };

        let connect_timeout = match lookup("DEBATE_CONNECT_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(secs.trim().parse().map_err(|_| {
                DebateError::Config("DEBATE_CONNECT_TIMEOUT_SECS must be a whole number".into())
            })?),
            None => defaults.connect_timeout,
        };

        Ok(Self {
            api_url: lookup("DEBATE_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            model: lookup("DEBATE_MODEL").unwrap_or(defaults.model),
            language,
            connect_timeout,
        })
    }
}
