//! Agent record aggregate.

use super::{AgentRecord, AgentSlot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A roster agent with its cumulative battle record.
///
/// Agents are created once at bootstrap; only vote resolution changes their
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    slot: AgentSlot,
    record: AgentRecord,
    created_at: DateTime<Utc>,
}

impl Agent {
    /// Creates an agent with an empty record.
    #[must_use]
    pub const fn new(slot: AgentSlot, created_at: DateTime<Utc>) -> Self {
        Self {
            slot,
            record: AgentRecord { wins: 0, losses: 0 },
            created_at,
        }
    }

    /// Reconstructs an agent from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        slot: AgentSlot,
        record: AgentRecord,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            slot,
            record,
            created_at,
        }
    }

    /// Returns the roster seat.
    #[must_use]
    pub const fn slot(&self) -> AgentSlot {
        self.slot
    }

    /// Returns the cumulative record.
    #[must_use]
    pub const fn record(&self) -> AgentRecord {
        self.record
    }

    /// Returns the seeding timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Counts a won battle.
    pub const fn record_win(&mut self) {
        self.record.wins = self.record.wins.saturating_add(1);
    }

    /// Counts a lost battle.
    pub const fn record_loss(&mut self) {
        self.record.losses = self.record.losses.saturating_add(1);
    }
}
