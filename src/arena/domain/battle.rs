//! Battle aggregate root and its summary projection.

use super::{AgentSlot, ArenaDomainError, BattleId, Matchup, Round, Topic};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Battle aggregate root: one full three-round contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    id: BattleId,
    topic: Topic,
    matchup: Matchup,
    created_at: DateTime<Utc>,
    winner: Option<AgentSlot>,
    rounds: Vec<Round>,
}

/// Parameter object for reconstructing a persisted battle aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBattleData {
    /// Persisted battle identifier.
    pub id: BattleId,
    /// Persisted topic.
    pub topic: Topic,
    /// Persisted matchup descriptor.
    pub matchup: Matchup,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted winner, if a vote has been recorded.
    pub winner: Option<AgentSlot>,
    /// Persisted rounds in phase order.
    pub rounds: Vec<Round>,
}

impl Battle {
    /// Reconstructs a battle from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBattleData) -> Self {
        Self {
            id: data.id,
            topic: data.topic,
            matchup: data.matchup,
            created_at: data.created_at,
            winner: data.winner,
            rounds: data.rounds,
        }
    }

    /// Returns the battle identifier.
    #[must_use]
    pub const fn id(&self) -> BattleId {
        self.id
    }

    /// Returns the battle topic.
    #[must_use]
    pub const fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Returns the matchup descriptor.
    #[must_use]
    pub const fn matchup(&self) -> &Matchup {
        &self.matchup
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the recorded winner, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<AgentSlot> {
        self.winner
    }

    /// Returns the rounds in phase order.
    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Returns the summary projection of this battle.
    #[must_use]
    pub fn summary(&self) -> BattleSummary {
        BattleSummary {
            id: self.id,
            topic: self.topic.clone(),
            matchup: self.matchup.clone(),
            created_at: self.created_at,
            winner: self.winner,
        }
    }

    /// Records the winning agent.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaDomainError::WinnerAlreadyRecorded`] if a winner is
    /// already set.
    pub fn record_winner(&mut self, winner: AgentSlot) -> Result<(), ArenaDomainError> {
        if self.winner.is_some() {
            return Err(ArenaDomainError::WinnerAlreadyRecorded(self.id));
        }
        self.winner = Some(winner);
        Ok(())
    }
}

/// Battle listing entry without round outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    /// Battle identifier.
    pub id: BattleId,
    /// Battle topic.
    pub topic: Topic,
    /// Matchup descriptor.
    pub matchup: Matchup,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Recorded winner, if any.
    pub winner: Option<AgentSlot>,
}
