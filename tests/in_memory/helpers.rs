//! Shared helpers for in-memory arena integration tests.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use roast_arena::arena::{
    adapters::memory::{InMemoryArenaRepository, ScriptedAgentClient},
    config::ArenaConfig,
    domain::{AgentSlot, PerAgent},
    ports::ArenaRepository,
    services::{BattleHistoryService, BattleOrchestrator, VoteService},
};
use rstest::fixture;

/// Orchestrator type used by integration tests.
pub type TestOrchestrator =
    BattleOrchestrator<InMemoryArenaRepository, ScriptedAgentClient, DefaultClock>;

/// Every service wired over one in-memory repository.
pub struct Harness {
    /// Shared repository.
    pub repository: Arc<InMemoryArenaRepository>,
    /// Battle orchestrator.
    pub orchestrator: TestOrchestrator,
    /// Vote service.
    pub votes: VoteService<InMemoryArenaRepository>,
    /// History service.
    pub history: BattleHistoryService<InMemoryArenaRepository>,
}

/// Builds a harness around the given agents.
#[must_use]
pub fn harness_with(agents: PerAgent<ScriptedAgentClient>) -> Harness {
    let repository = Arc::new(InMemoryArenaRepository::new());
    Harness {
        orchestrator: BattleOrchestrator::new(
            Arc::clone(&repository),
            agents.map(|_, agent| Arc::new(agent)),
            ArenaConfig::default().with_agent_timeout(Duration::from_millis(250)),
            Arc::new(DefaultClock),
        ),
        votes: VoteService::new(Arc::clone(&repository)),
        history: BattleHistoryService::new(Arc::clone(&repository)),
        repository,
    }
}

/// Provides a harness whose agents answer with their label.
#[fixture]
pub fn harness() -> Harness {
    harness_with(PerAgent::from_fn(|slot| {
        ScriptedAgentClient::replying(format!("{} was here", slot.label()))
    }))
}

/// Seeds the full roster.
///
/// # Errors
///
/// Returns an error if the repository rejects the seed.
pub async fn seed_roster(harness: &Harness) -> Result<(), eyre::Report> {
    harness
        .repository
        .seed_agents(&AgentSlot::ALL)
        .await
        .map_err(|err| eyre::eyre!("seeding failed: {err}"))
}
