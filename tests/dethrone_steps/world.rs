//! Shared world state for dethrone BDD scenarios.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use roast_arena::arena::{
    adapters::memory::{InMemoryArenaRepository, ScriptedAgentClient},
    config::ArenaConfig,
    domain::{AgentSlot, Battle, PerAgent},
    services::{ArenaServiceResult, BattleOrchestrator},
};
use rstest::fixture;

/// Orchestrator type used by the BDD world.
pub type TestOrchestrator =
    BattleOrchestrator<InMemoryArenaRepository, ScriptedAgentClient, DefaultClock>;

/// Scenario world for dethrone behaviour tests.
pub struct ArenaWorld {
    /// Repository shared by every orchestrator built for the scenario.
    pub repository: Arc<InMemoryArenaRepository>,
    /// Scripted agents, replaceable until the first battle runs.
    pub agents: PerAgent<ScriptedAgentClient>,
    /// Index of the dethrone battle's opening prompt in each agent's log.
    pub opening_prompt_index: usize,
    /// Result of the last dethrone attempt.
    pub last_result: Option<ArenaServiceResult<Battle>>,
}

impl ArenaWorld {
    /// Creates a world with well-behaved agents and an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryArenaRepository::new()),
            agents: PerAgent::from_fn(|slot| {
                ScriptedAgentClient::replying(format!("{} roasts everyone", slot.label()))
            }),
            opening_prompt_index: 0,
            last_result: None,
        }
    }

    /// Builds an orchestrator over the world's repository and agents.
    #[must_use]
    pub fn orchestrator(&self) -> TestOrchestrator {
        BattleOrchestrator::new(
            Arc::clone(&self.repository),
            self.agents.clone().map(|_, agent| Arc::new(agent)),
            ArenaConfig::default()
                .with_default_champion(AgentSlot::Claude)
                .with_agent_timeout(Duration::from_secs(1)),
            Arc::new(DefaultClock),
        )
    }

    /// Returns the battle produced by the last dethrone attempt.
    ///
    /// # Errors
    ///
    /// Returns an error when no battle ran or the battle failed.
    pub fn battle(&self) -> Result<&Battle, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Ok(battle)) => Ok(battle),
            Some(Err(err)) => Err(eyre::eyre!("dethrone battle failed: {err}")),
            None => Err(eyre::eyre!("no dethrone battle in scenario world")),
        }
    }
}

impl Default for ArenaWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ArenaWorld {
    ArenaWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a roster seat named in a step.
///
/// # Errors
///
/// Returns an error for names outside the roster.
pub fn parse_slot(name: &str) -> Result<AgentSlot, eyre::Report> {
    AgentSlot::try_from(name).map_err(|err| eyre::eyre!("invalid agent in step: {err}"))
}
