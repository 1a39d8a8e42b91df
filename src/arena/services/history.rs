//! Battle history queries.

use super::ArenaServiceResult;
use crate::arena::{
    domain::{Battle, BattleId, BattleSummary},
    ports::{ArenaRepository, Page},
};
use std::sync::Arc;

/// Lists and loads previously committed battles.
pub struct BattleHistoryService<R>
where
    R: ArenaRepository,
{
    repository: Arc<R>,
}

impl<R> BattleHistoryService<R>
where
    R: ArenaRepository,
{
    /// Creates a history service over the given repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns one page of battle summaries, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`super::ArenaServiceError::Repository`] when the listing
    /// cannot be read.
    pub async fn list(&self, page: Page) -> ArenaServiceResult<Vec<BattleSummary>> {
        Ok(self.repository.list_battles(Some(page)).await?)
    }

    /// Loads a battle with its rounds.
    ///
    /// Returns `Ok(None)` when the battle does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`super::ArenaServiceError::Repository`] when the lookup fails.
    pub async fn find(&self, id: BattleId) -> ArenaServiceResult<Option<Battle>> {
        Ok(self.repository.find_battle(id).await?)
    }
}
