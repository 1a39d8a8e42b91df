//! Vote resolution for decided battles.

use super::{ArenaServiceResult, ChampionTracker};
use crate::arena::{
    domain::{AgentSlot, BattleId, Scoreboard},
    ports::ArenaRepository,
};
use std::sync::Arc;
use tracing::info;

/// Request payload for recording a battle winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRequest {
    battle_id: BattleId,
    winner: String,
}

impl VoteRequest {
    /// Creates a vote for `winner` on `battle_id`.
    #[must_use]
    pub fn new(battle_id: BattleId, winner: impl Into<String>) -> Self {
        Self {
            battle_id,
            winner: winner.into(),
        }
    }
}

/// Records battle winners and reports the refreshed scoreboard.
pub struct VoteService<R>
where
    R: ArenaRepository,
{
    repository: Arc<R>,
    tracker: ChampionTracker<R>,
}

impl<R> VoteService<R>
where
    R: ArenaRepository,
{
    /// Creates a vote service over the given repository.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            tracker: ChampionTracker::new(Arc::clone(&repository)),
            repository,
        }
    }

    /// Records the winner of a battle.
    ///
    /// The winner gains a win and every other agent a loss.
    ///
    /// # Errors
    ///
    /// Returns [`super::ArenaServiceError::Domain`] when the winner is not a
    /// roster agent, and [`super::ArenaServiceError::Repository`] when the
    /// battle is unknown, already decided, or persistence fails.
    pub async fn record_vote(&self, request: VoteRequest) -> ArenaServiceResult<Scoreboard> {
        let winner = AgentSlot::try_from(request.winner.as_str())?;
        self.repository
            .record_vote(request.battle_id, winner)
            .await?;
        info!(battle_id = %request.battle_id, %winner, "vote recorded");
        self.tracker.scoreboard().await
    }
}
