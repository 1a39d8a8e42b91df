//! Construction-time settings for the arena services.
//!
//! Nothing here is global: an [`ArenaConfig`] value is handed to the gateway
//! and orchestrator when they are built, so tests can shrink the timeout or
//! swap personas without touching the environment.

use crate::arena::domain::{AgentSlot, ArenaDomainError, PerAgent};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the per-agent timeout, in seconds.
pub const AGENT_TIMEOUT_ENV: &str = "ARENA_AGENT_TIMEOUT_SECS";

/// Environment variable overriding the fallback dethrone defender.
pub const DEFAULT_CHAMPION_ENV: &str = "ARENA_DEFAULT_CHAMPION";

/// Default ceiling for a single agent invocation.
pub const DEFAULT_AGENT_TIMEOUT: Duration = Duration::from_secs(60);

const CLAUDE_PERSONA: &str = concat!(
    "You are Claude, the arena's dry-witted philosopher. Roast your rivals with ",
    "surgical understatement, never raise your voice, and always sound slightly ",
    "disappointed in everyone else's reasoning.",
);

const GPT_PERSONA: &str = concat!(
    "You are GPT, the arena's overconfident showman. Roast your rivals with loud ",
    "bravado, pop-culture references, and the unshakeable belief that you ",
    "invented this whole format.",
);

const GEMINI_PERSONA: &str = concat!(
    "You are Gemini, the arena's hyperactive multitasker. Roast your rivals with ",
    "rapid-fire jabs, search-engine trivia, and a habit of answering questions ",
    "nobody asked.",
);

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArenaConfigError {
    /// The timeout variable is not a positive whole number of seconds.
    #[error("ARENA_AGENT_TIMEOUT_SECS must be a positive integer, got '{0}'")]
    InvalidTimeout(String),

    /// The default champion variable names an unknown agent.
    #[error("ARENA_DEFAULT_CHAMPION is invalid: {0}")]
    InvalidDefaultChampion(#[from] ArenaDomainError),
}

/// Settings shared by the agent gateway and battle orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    agent_timeout: Duration,
    default_champion: AgentSlot,
    personas: PerAgent<String>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            agent_timeout: DEFAULT_AGENT_TIMEOUT,
            default_champion: AgentSlot::Claude,
            personas: PerAgent::new(
                CLAUDE_PERSONA.to_owned(),
                GPT_PERSONA.to_owned(),
                GEMINI_PERSONA.to_owned(),
            ),
        }
    }
}

impl ArenaConfig {
    /// Builds a configuration from defaults overridden by environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaConfigError`] when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ArenaConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration using `lookup` to resolve variables.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaConfigError`] when a variable is present but invalid.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArenaConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(AGENT_TIMEOUT_ENV) {
            let seconds = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or_else(|| ArenaConfigError::InvalidTimeout(raw.clone()))?;
            config.agent_timeout = Duration::from_secs(seconds);
        }
        if let Some(raw) = lookup(DEFAULT_CHAMPION_ENV) {
            config.default_champion = AgentSlot::try_from(raw.as_str())?;
        }
        Ok(config)
    }

    /// Sets the per-agent timeout ceiling.
    #[must_use]
    pub const fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    /// Sets the defender used by dethrone battles when nobody holds a streak.
    #[must_use]
    pub const fn with_default_champion(mut self, slot: AgentSlot) -> Self {
        self.default_champion = slot;
        self
    }

    /// Replaces the persona for one agent.
    #[must_use]
    pub fn with_persona(mut self, slot: AgentSlot, persona: impl Into<String>) -> Self {
        *self.personas.get_mut(slot) = persona.into();
        self
    }

    /// Returns the per-agent timeout ceiling.
    #[must_use]
    pub const fn agent_timeout(&self) -> Duration {
        self.agent_timeout
    }

    /// Returns the fallback dethrone defender.
    #[must_use]
    pub const fn default_champion(&self) -> AgentSlot {
        self.default_champion
    }

    /// Returns the persona text for every agent.
    #[must_use]
    pub const fn personas(&self) -> &PerAgent<String> {
        &self.personas
    }
}
