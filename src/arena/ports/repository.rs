//! Repository port for battle persistence with per-battle transactions.

use crate::arena::domain::{
    Agent, AgentSlot, Battle, BattleId, BattleSummary, ParsePhaseError, Round,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for arena repository operations.
pub type ArenaRepositoryResult<T> = Result<T, ArenaRepositoryError>;

/// Pagination window for battle listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: u32,
    offset: u32,
}

impl Page {
    /// Default number of battles per page.
    pub const DEFAULT_LIMIT: u32 = 20;
    /// Largest accepted page size.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a page of `limit` battles after skipping `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPageLimit`] when `limit` is outside `1..=100`.
    pub const fn new(limit: u32, offset: u32) -> Result<Self, InvalidPageLimit> {
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(InvalidPageLimit(limit));
        }
        Ok(Self { limit, offset })
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of battles skipped.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Rejected page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page limit must be between 1 and {max}, got {0}", max = Page::MAX_LIMIT)]
pub struct InvalidPageLimit(pub u32);

/// Battle persistence contract.
///
/// Writes for a battle go through a [`BattleTransaction`] so that a battle is
/// either stored with all three rounds or not stored at all.
#[async_trait]
pub trait ArenaRepository: Send + Sync {
    /// Transaction type produced by [`ArenaRepository::begin`].
    type Transaction: BattleTransaction;

    /// Opens a transaction for writing one battle.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaRepositoryError::Persistence`] when the underlying store
    /// cannot open a transaction.
    async fn begin(&self) -> ArenaRepositoryResult<Self::Transaction>;

    /// Returns battle summaries ordered most recent first.
    ///
    /// Battles created at the same instant are ordered by identifier,
    /// descending. `None` returns every battle.
    async fn list_battles(&self, page: Option<Page>) -> ArenaRepositoryResult<Vec<BattleSummary>>;

    /// Finds a battle with its rounds in phase order.
    ///
    /// Returns `None` when the battle does not exist.
    async fn find_battle(&self, id: BattleId) -> ArenaRepositoryResult<Option<Battle>>;

    /// Finds an agent's record by roster seat.
    ///
    /// Returns `None` when the agent has not been seeded.
    async fn find_agent(&self, slot: AgentSlot) -> ArenaRepositoryResult<Option<Agent>>;

    /// Returns every seeded agent in canonical roster order.
    async fn list_agents(&self) -> ArenaRepositoryResult<Vec<Agent>>;

    /// Creates zero-record agents for any roster seat not yet stored.
    ///
    /// Seeding is idempotent: existing records are left untouched.
    async fn seed_agents(&self, roster: &[AgentSlot]) -> ArenaRepositoryResult<()>;

    /// Atomically records `winner` on a battle and updates agent records.
    ///
    /// The winner's wins and every other seeded agent's losses are
    /// incremented.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaRepositoryError::BattleNotFound`] for unknown battles,
    /// [`ArenaRepositoryError::WinnerAlreadyRecorded`] when the battle was
    /// already decided, and [`ArenaRepositoryError::AgentNotFound`] when the
    /// winner has not been seeded.
    async fn record_vote(&self, battle_id: BattleId, winner: AgentSlot)
    -> ArenaRepositoryResult<()>;
}

/// Unit of work covering the writes for one battle.
///
/// Dropping a transaction without committing discards its writes.
#[async_trait]
pub trait BattleTransaction: Send {
    /// Stores the battle header.
    async fn create_battle(&mut self, battle: &BattleSummary) -> ArenaRepositoryResult<()>;

    /// Appends a round to a battle created in this transaction.
    async fn create_round(&mut self, battle_id: BattleId, round: &Round)
    -> ArenaRepositoryResult<()>;

    /// Makes every write in this transaction visible.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaRepositoryError::IncompleteBattle`] when the battle does
    /// not hold exactly three rounds; nothing is stored in that case.
    async fn commit(self) -> ArenaRepositoryResult<()>;

    /// Discards every write in this transaction.
    async fn rollback(self) -> ArenaRepositoryResult<()>;
}

/// Errors returned by arena repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ArenaRepositoryError {
    /// A battle with the same identifier already exists.
    #[error("duplicate battle identifier: {0}")]
    DuplicateBattle(BattleId),

    /// The battle was not found.
    #[error("battle not found: {0}")]
    BattleNotFound(BattleId),

    /// The agent has not been seeded.
    #[error("unknown agent: {0}")]
    AgentNotFound(AgentSlot),

    /// The battle already has a recorded winner.
    #[error("battle {0} already has a winner")]
    WinnerAlreadyRecorded(BattleId),

    /// A commit was attempted for a battle without all three rounds.
    #[error("battle {battle_id} is incomplete: {rounds} of 3 rounds written")]
    IncompleteBattle {
        /// Battle identifier.
        battle_id: BattleId,
        /// Number of rounds written in the transaction.
        rounds: usize,
    },

    /// The transaction was used after it lost its connection or before a
    /// battle header was written.
    #[error("transaction is no longer usable: {0}")]
    TransactionClosed(String),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ArenaRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<ParsePhaseError> for ArenaRepositoryError {
    fn from(err: ParsePhaseError) -> Self {
        Self::invalid_persisted_data(err)
    }
}
