//! The fixed three-phase round progression.

use super::ParsePhaseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a battle round.
///
/// Phases progress strictly `Opening → Rebuttal → Closer`; `Closer` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// First shots fired at the other agents.
    Opening,
    /// Direct responses to the opening round.
    Rebuttal,
    /// Final mic drop referencing both earlier rounds.
    Closer,
}

impl Phase {
    /// Every phase in battle order.
    pub const ALL: [Self; 3] = [Self::Opening, Self::Rebuttal, Self::Closer];

    /// Returns the phase every battle starts with.
    #[must_use]
    pub const fn first() -> Self {
        Self::Opening
    }

    /// Returns the phase that follows this one, or `None` after the closer.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Opening => Some(Self::Rebuttal),
            Self::Rebuttal => Some(Self::Closer),
            Self::Closer => None,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Rebuttal => "rebuttal",
            Self::Closer => "closer",
        }
    }
}

impl TryFrom<&str> for Phase {
    type Error = ParsePhaseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "opening" => Ok(Self::Opening),
            "rebuttal" => Ok(Self::Rebuttal),
            "closer" => Ok(Self::Closer),
            _ => Err(ParsePhaseError(value.to_owned())),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
