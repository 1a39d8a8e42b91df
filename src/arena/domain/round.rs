//! A single phase's outputs within a battle.

use super::{PerAgent, Phase};
use serde::{Deserialize, Serialize};

/// One phase's set of per-agent outputs.
///
/// Rounds are immutable once built; a battle appends them in phase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    phase: Phase,
    outputs: PerAgent<String>,
}

impl Round {
    /// Creates a round for `phase` holding one output per agent.
    #[must_use]
    pub const fn new(phase: Phase, outputs: PerAgent<String>) -> Self {
        Self { phase, outputs }
    }

    /// Returns the round phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the per-agent outputs.
    #[must_use]
    pub const fn outputs(&self) -> &PerAgent<String> {
        &self.outputs
    }
}
