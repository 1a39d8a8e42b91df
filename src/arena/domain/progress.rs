//! State machine driving a battle through its three phases.

use super::{
    ArenaDomainError, Battle, BattleId, BattleSummary, Matchup, PerAgent, PersistedBattleData,
    Phase, Round, Topic,
};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// In-flight battle accepting rounds strictly in phase order.
///
/// The only transitions are `Opening → Rebuttal → Closer`; after the closer
/// the progression is terminal and [`BattleProgress::finish`] yields the
/// assembled [`Battle`]. A battle cannot be finished with fewer rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleProgress {
    id: BattleId,
    topic: Topic,
    matchup: Matchup,
    created_at: DateTime<Utc>,
    rounds: Vec<Round>,
}

impl BattleProgress {
    /// Starts a new battle with a fresh identifier.
    #[must_use]
    pub fn start(topic: Topic, matchup: Matchup, clock: &impl Clock) -> Self {
        Self {
            id: BattleId::new(),
            topic,
            matchup,
            created_at: clock.utc(),
            rounds: Vec::with_capacity(Phase::ALL.len()),
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

    /// Returns the undecided battle header written before the first round.
    #[must_use]
    pub fn summary(&self) -> BattleSummary {
        BattleSummary {
            id: self.id,
            topic: self.topic.clone(),
            matchup: self.matchup.clone(),
            created_at: self.created_at,
            winner: None,
        }
    }

    /// Returns the rounds recorded so far.
    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Returns the phase expected next, or `None` once the closer is in.
    #[must_use]
    pub fn next_phase(&self) -> Option<Phase> {
        self.rounds
            .last()
            .map_or(Some(Phase::first()), |round| round.phase().next())
    }

    /// Returns the outputs recorded for `phase`, if that round is complete.
    #[must_use]
    pub fn outputs(&self, phase: Phase) -> Option<&PerAgent<String>> {
        self.rounds
            .iter()
            .find(|round| round.phase() == phase)
            .map(Round::outputs)
    }

    /// Appends the next round.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaDomainError::OutOfOrderRound`] when the round's phase is
    /// not the one expected next.
    pub fn record(&mut self, round: Round) -> Result<(), ArenaDomainError> {
        let expected = self.next_phase();
        if expected != Some(round.phase()) {
            return Err(ArenaDomainError::OutOfOrderRound {
                expected,
                actual: round.phase(),
            });
        }
        self.rounds.push(round);
        Ok(())
    }

    /// Assembles the finished battle.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaDomainError::IncompleteBattle`] unless all three rounds
    /// have been recorded.
    pub fn finish(self) -> Result<Battle, ArenaDomainError> {
        if self.next_phase().is_some() {
            return Err(ArenaDomainError::IncompleteBattle {
                battle_id: self.id,
                rounds: self.rounds.len(),
            });
        }
        Ok(Battle::from_persisted(PersistedBattleData {
            id: self.id,
            topic: self.topic,
            matchup: self.matchup,
            created_at: self.created_at,
            winner: None,
            rounds: self.rounds,
        }))
    }
}
