//! Read-only champion and scoreboard derivation.

use super::ArenaServiceResult;
use crate::arena::{
    domain::{AgentRecord, ChampionStreak, PerAgent, Scoreboard, derive_champion_streak},
    ports::ArenaRepository,
};
use std::sync::Arc;

/// Derives the current champion and streak from battle history.
///
/// Results are recomputed on every call because winners can be recorded at
/// any time.
pub struct ChampionTracker<R>
where
    R: ArenaRepository,
{
    repository: Arc<R>,
}

impl<R> Clone for ChampionTracker<R>
where
    R: ArenaRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> ChampionTracker<R>
where
    R: ArenaRepository,
{
    /// Creates a tracker over the given repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the current champion and its unbroken streak.
    ///
    /// Returns no champion and a streak of zero when no battle has a
    /// recorded winner.
    ///
    /// # Errors
    ///
    /// Returns [`super::ArenaServiceError::Repository`] when battle history
    /// cannot be read.
    pub async fn current_champion_and_streak(&self) -> ArenaServiceResult<ChampionStreak> {
        let battles = self.repository.list_battles(None).await?;
        Ok(derive_champion_streak(
            battles.iter().map(|battle| battle.winner),
        ))
    }

    /// Returns the champion, streak, and every roster agent's record.
    ///
    /// Agents that have not been seeded report an empty record.
    ///
    /// # Errors
    ///
    /// Returns [`super::ArenaServiceError::Repository`] when history or agent
    /// records cannot be read.
    pub async fn scoreboard(&self) -> ArenaServiceResult<Scoreboard> {
        let standing = self.current_champion_and_streak().await?;
        let mut records = PerAgent::<AgentRecord>::default();
        for agent in self.repository.list_agents().await? {
            *records.get_mut(agent.slot()) = agent.record();
        }
        Ok(Scoreboard {
            champion: standing.champion,
            streak: standing.streak,
            records,
        })
    }
}
