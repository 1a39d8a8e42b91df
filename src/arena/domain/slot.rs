//! The fixed three-agent roster and a total per-agent mapping.

use super::ArenaDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One seat in the fixed roster of competing agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentSlot {
    /// The Claude agent.
    Claude,
    /// The GPT (Codex) agent.
    Gpt,
    /// The Gemini agent.
    Gemini,
}

impl AgentSlot {
    /// Every roster seat in canonical order.
    pub const ALL: [Self; 3] = [Self::Claude, Self::Gpt, Self::Gemini];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gpt => "gpt",
            Self::Gemini => "gemini",
        }
    }

    /// Returns the display label used in prompts and diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Gpt => "GPT",
            Self::Gemini => "Gemini",
        }
    }
}

impl TryFrom<&str> for AgentSlot {
    type Error = ArenaDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "claude" => Ok(Self::Claude),
            "gpt" => Ok(Self::Gpt),
            "gemini" => Ok(Self::Gemini),
            _ => Err(ArenaDomainError::UnknownAgent(value.to_owned())),
        }
    }
}

impl fmt::Display for AgentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total mapping holding exactly one value per roster seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerAgent<T> {
    /// Value for [`AgentSlot::Claude`].
    pub claude: T,
    /// Value for [`AgentSlot::Gpt`].
    pub gpt: T,
    /// Value for [`AgentSlot::Gemini`].
    pub gemini: T,
}

impl<T> PerAgent<T> {
    /// Creates a mapping from explicit per-seat values.
    #[must_use]
    pub const fn new(claude: T, gpt: T, gemini: T) -> Self {
        Self {
            claude,
            gpt,
            gemini,
        }
    }

    /// Builds a mapping by evaluating `f` once per seat in canonical order.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(AgentSlot) -> T) -> Self {
        let claude = f(AgentSlot::Claude);
        let gpt = f(AgentSlot::Gpt);
        let gemini = f(AgentSlot::Gemini);
        Self::new(claude, gpt, gemini)
    }

    /// Returns the value held for `slot`.
    #[must_use]
    pub const fn get(&self, slot: AgentSlot) -> &T {
        match slot {
            AgentSlot::Claude => &self.claude,
            AgentSlot::Gpt => &self.gpt,
            AgentSlot::Gemini => &self.gemini,
        }
    }

    /// Returns a mutable reference to the value held for `slot`.
    pub const fn get_mut(&mut self, slot: AgentSlot) -> &mut T {
        match slot {
            AgentSlot::Claude => &mut self.claude,
            AgentSlot::Gpt => &mut self.gpt,
            AgentSlot::Gemini => &mut self.gemini,
        }
    }

    /// Transforms every value, keeping the seat association.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(AgentSlot, T) -> U) -> PerAgent<U> {
        PerAgent {
            claude: f(AgentSlot::Claude, self.claude),
            gpt: f(AgentSlot::Gpt, self.gpt),
            gemini: f(AgentSlot::Gemini, self.gemini),
        }
    }

    /// Iterates over `(slot, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentSlot, &T)> {
        AgentSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}
