//! In-memory repository for battle orchestration tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::arena::{
    domain::{
        Agent, AgentSlot, ArenaDomainError, Battle, BattleId, BattleSummary, PersistedBattleData,
        Phase, Round,
    },
    ports::{
        ArenaRepository, ArenaRepositoryError, ArenaRepositoryResult, BattleTransaction, Page,
    },
};

/// Thread-safe in-memory arena repository.
///
/// Transactions stage their writes privately and publish them atomically on
/// commit, so uncommitted battles are never visible to readers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArenaRepository {
    state: Arc<RwLock<InMemoryArenaState>>,
}

#[derive(Debug, Default)]
struct InMemoryArenaState {
    battles: HashMap<BattleId, Battle>,
    agents: BTreeMap<AgentSlot, Agent>,
    failing_phase: Option<Phase>,
}

impl InMemoryArenaRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write of a `phase` round fail.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn fail_round_writes(&self, phase: Phase) -> ArenaRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.failing_phase = Some(phase);
        Ok(())
    }

    /// Stores a fully formed battle directly, bypassing transactions.
    ///
    /// Used to arrange battle history, including recorded winners.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaRepositoryError::DuplicateBattle`] when the identifier
    /// is already stored.
    pub fn insert_battle(&self, battle: Battle) -> ArenaRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.battles.contains_key(&battle.id()) {
            return Err(ArenaRepositoryError::DuplicateBattle(battle.id()));
        }
        state.battles.insert(battle.id(), battle);
        Ok(())
    }
}

fn poisoned(err: impl ToString) -> ArenaRepositoryError {
    ArenaRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ArenaRepository for InMemoryArenaRepository {
    type Transaction = InMemoryBattleTransaction;

    async fn begin(&self) -> ArenaRepositoryResult<Self::Transaction> {
        Ok(InMemoryBattleTransaction {
            state: Arc::clone(&self.state),
            staged: None,
        })
    }

    async fn list_battles(&self, page: Option<Page>) -> ArenaRepositoryResult<Vec<BattleSummary>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut summaries: Vec<BattleSummary> =
            state.battles.values().map(Battle::summary).collect();
        summaries.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.id.cmp(&left.id))
        });
        let Some(window) = page else {
            return Ok(summaries);
        };
        Ok(summaries
            .into_iter()
            .skip(usize::try_from(window.offset()).map_err(ArenaRepositoryError::persistence)?)
            .take(usize::try_from(window.limit()).map_err(ArenaRepositoryError::persistence)?)
            .collect())
    }

    async fn find_battle(&self, id: BattleId) -> ArenaRepositoryResult<Option<Battle>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.battles.get(&id).cloned())
    }

    async fn find_agent(&self, slot: AgentSlot) -> ArenaRepositoryResult<Option<Agent>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.agents.get(&slot).cloned())
    }

    async fn list_agents(&self) -> ArenaRepositoryResult<Vec<Agent>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.agents.values().cloned().collect())
    }

    async fn seed_agents(&self, roster: &[AgentSlot]) -> ArenaRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let seeded_at = Utc::now();
        for slot in roster {
            state
                .agents
                .entry(*slot)
                .or_insert_with(|| Agent::new(*slot, seeded_at));
        }
        Ok(())
    }

    async fn record_vote(
        &self,
        battle_id: BattleId,
        winner: AgentSlot,
    ) -> ArenaRepositoryResult<()> {
        let mut guard = self.state.write().map_err(poisoned)?;
        let state = &mut *guard;
        let battle = state
            .battles
            .get_mut(&battle_id)
            .ok_or(ArenaRepositoryError::BattleNotFound(battle_id))?;
        if battle.winner().is_some() {
            return Err(ArenaRepositoryError::WinnerAlreadyRecorded(battle_id));
        }
        if !state.agents.contains_key(&winner) {
            return Err(ArenaRepositoryError::AgentNotFound(winner));
        }
        battle.record_winner(winner).map_err(|err| match err {
            ArenaDomainError::WinnerAlreadyRecorded(id) => {
                ArenaRepositoryError::WinnerAlreadyRecorded(id)
            }
            other => ArenaRepositoryError::invalid_persisted_data(other),
        })?;
        for agent in state.agents.values_mut() {
            if agent.slot() == winner {
                agent.record_win();
            } else {
                agent.record_loss();
            }
        }
        Ok(())
    }
}

/// Staged writes for one battle in the in-memory repository.
#[derive(Debug)]
pub struct InMemoryBattleTransaction {
    state: Arc<RwLock<InMemoryArenaState>>,
    staged: Option<StagedBattle>,
}

#[derive(Debug)]
struct StagedBattle {
    header: BattleSummary,
    rounds: Vec<Round>,
}

#[async_trait]
impl BattleTransaction for InMemoryBattleTransaction {
    async fn create_battle(&mut self, battle: &BattleSummary) -> ArenaRepositoryResult<()> {
        if let Some(staged) = &self.staged {
            return Err(ArenaRepositoryError::TransactionClosed(format!(
                "battle {} already written in this transaction",
                staged.header.id
            )));
        }
        let state = self.state.read().map_err(poisoned)?;
        if state.battles.contains_key(&battle.id) {
            return Err(ArenaRepositoryError::DuplicateBattle(battle.id));
        }
        drop(state);
        self.staged = Some(StagedBattle {
            header: battle.clone(),
            rounds: Vec::with_capacity(Phase::ALL.len()),
        });
        Ok(())
    }

    async fn create_round(
        &mut self,
        battle_id: BattleId,
        round: &Round,
    ) -> ArenaRepositoryResult<()> {
        let failing_phase = self.state.read().map_err(poisoned)?.failing_phase;
        if failing_phase == Some(round.phase()) {
            return Err(ArenaRepositoryError::persistence(std::io::Error::other(
                format!("injected failure writing {} round", round.phase()),
            )));
        }
        let staged = self
            .staged
            .as_mut()
            .filter(|staged| staged.header.id == battle_id)
            .ok_or(ArenaRepositoryError::BattleNotFound(battle_id))?;
        staged.rounds.push(round.clone());
        Ok(())
    }

    async fn commit(self) -> ArenaRepositoryResult<()> {
        let staged = self.staged.ok_or_else(|| {
            ArenaRepositoryError::TransactionClosed("no battle written in this transaction".to_owned())
        })?;
        let battle_id = staged.header.id;
        let phases: Vec<Phase> = staged.rounds.iter().map(Round::phase).collect();
        if phases != Phase::ALL {
            return Err(ArenaRepositoryError::IncompleteBattle {
                battle_id,
                rounds: staged.rounds.len(),
            });
        }

        let mut state = self.state.write().map_err(poisoned)?;
        if state.battles.contains_key(&battle_id) {
            return Err(ArenaRepositoryError::DuplicateBattle(battle_id));
        }
        let BattleSummary {
            id,
            topic,
            matchup,
            created_at,
            winner,
        } = staged.header;
        let battle = Battle::from_persisted(PersistedBattleData {
            id,
            topic,
            matchup,
            created_at,
            winner,
            rounds: staged.rounds,
        });
        state.battles.insert(battle_id, battle);
        Ok(())
    }

    async fn rollback(self) -> ArenaRepositoryResult<()> {
        drop(self.staged);
        Ok(())
    }
}
