//! Battle orchestration: three dependent rounds under one transaction.

use super::{
    AgentGateway, ArenaServiceResult, ChampionTracker, PromptBuilder, RoundExecutor,
};
use crate::arena::{
    config::ArenaConfig,
    domain::{
        AgentSlot, ArenaDomainError, Battle, BattleProgress, Matchup, PerAgent, Phase, Topic,
    },
    ports::{AgentClient, ArenaRepository, BattleTransaction},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Request payload for starting a battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartBattleRequest {
    topic: String,
    matchup: Option<String>,
    defender: Option<AgentSlot>,
}

impl StartBattleRequest {
    /// Creates a free-for-all request for `topic`.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            matchup: None,
            defender: None,
        }
    }

    /// Sets the matchup descriptor.
    #[must_use]
    pub fn with_matchup(mut self, matchup: impl Into<String>) -> Self {
        self.matchup = Some(matchup.into());
        self
    }

    /// Names an agent that must defend its title in the opening round.
    #[must_use]
    pub const fn with_defender(mut self, defender: AgentSlot) -> Self {
        self.defender = Some(defender);
        self
    }
}

/// Runs battles end to end and persists them all-or-nothing.
pub struct BattleOrchestrator<R, A, C>
where
    R: ArenaRepository,
    A: AgentClient + 'static,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    gateway: AgentGateway<A>,
    tracker: ChampionTracker<R>,
    prompts: PromptBuilder,
    config: ArenaConfig,
    clock: Arc<C>,
}

impl<R, A, C> BattleOrchestrator<R, A, C>
where
    R: ArenaRepository,
    A: AgentClient + 'static,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator from its collaborators and configuration.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        clients: PerAgent<Arc<A>>,
        config: ArenaConfig,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tracker: ChampionTracker::new(Arc::clone(&repository)),
            gateway: AgentGateway::from_config(clients, &config),
            repository,
            prompts: PromptBuilder::new(),
            config,
            clock,
        }
    }

    /// Returns the champion tracker sharing this orchestrator's repository.
    #[must_use]
    pub const fn tracker(&self) -> &ChampionTracker<R> {
        &self.tracker
    }

    /// Runs a full battle and returns it once committed.
    ///
    /// Rounds run strictly in order because each prompt is built from every
    /// earlier round. Any persistence failure rolls back all writes for the
    /// battle before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`super::ArenaServiceError::Domain`] for invalid topic or
    /// matchup input, [`super::ArenaServiceError::Repository`] when
    /// persistence fails, and [`super::ArenaServiceError::Prompt`] when a
    /// prompt cannot be rendered.
    pub async fn run(&self, request: StartBattleRequest) -> ArenaServiceResult<Battle> {
        let StartBattleRequest {
            topic: raw_topic,
            matchup: raw_matchup,
            defender,
        } = request;
        let topic = Topic::new(raw_topic)?;
        let matchup = raw_matchup.map_or_else(|| Ok(Matchup::free_for_all()), Matchup::new)?;
        let progress = BattleProgress::start(topic, matchup, &*self.clock);
        let battle_id = progress.id();
        info!(
            %battle_id,
            matchup = %progress.matchup(),
            defender = ?defender,
            "starting battle"
        );

        let mut transaction = self.repository.begin().await?;
        match self.drive(&mut transaction, progress, defender).await {
            Ok(battle) => {
                transaction.commit().await?;
                info!(%battle_id, "battle committed");
                Ok(battle)
            }
            Err(err) => {
                match transaction.rollback().await {
                    Ok(()) => warn!(%battle_id, error = %err, "battle rolled back"),
                    Err(rollback_err) => error!(
                        %battle_id,
                        error = %err,
                        rollback_error = %rollback_err,
                        "battle rollback failed"
                    ),
                }
                Err(err)
            }
        }
    }

    /// Runs a battle that challenges the reigning champion.
    ///
    /// The matchup is `dethrone:<champion>` when a champion exists and
    /// `dethrone` otherwise; the configured default champion defends in the
    /// latter case.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`BattleOrchestrator::run`], plus
    /// repository errors raised while reading battle history.
    pub async fn run_dethrone(&self, topic: impl Into<String>) -> ArenaServiceResult<Battle> {
        let standing = self.tracker.current_champion_and_streak().await?;
        let matchup = Matchup::dethrone(standing.champion);
        let defender = standing
            .champion
            .unwrap_or_else(|| self.config.default_champion());
        let request = StartBattleRequest::new(topic)
            .with_matchup(matchup.as_str())
            .with_defender(defender);
        self.run(request).await
    }

    async fn drive(
        &self,
        transaction: &mut R::Transaction,
        mut progress: BattleProgress,
        defender: Option<AgentSlot>,
    ) -> ArenaServiceResult<Battle> {
        transaction.create_battle(&progress.summary()).await?;
        let executor = RoundExecutor::new(&self.gateway, self.config.personas());
        while let Some(phase) = progress.next_phase() {
            let prompt = self.prompt_for(&progress, phase, defender)?;
            let round = executor
                .run(transaction, progress.id(), phase, &prompt)
                .await?;
            progress.record(round)?;
        }
        Ok(progress.finish()?)
    }

    fn prompt_for(
        &self,
        progress: &BattleProgress,
        phase: Phase,
        defender: Option<AgentSlot>,
    ) -> ArenaServiceResult<String> {
        let topic = progress.topic();
        let prompt = match phase {
            Phase::Opening => self
                .prompts
                .build_opening(topic, progress.matchup(), defender)?,
            Phase::Rebuttal => {
                let opening = completed_outputs(progress, Phase::Opening, phase)?;
                self.prompts.build_rebuttal(topic, opening)?
            }
            Phase::Closer => {
                let opening = completed_outputs(progress, Phase::Opening, phase)?;
                let rebuttal = completed_outputs(progress, Phase::Rebuttal, phase)?;
                self.prompts.build_closer(topic, opening, rebuttal)?
            }
        };
        Ok(prompt)
    }
}

fn completed_outputs(
    progress: &BattleProgress,
    required: Phase,
    requested: Phase,
) -> Result<&PerAgent<String>, ArenaDomainError> {
    progress
        .outputs(required)
        .ok_or(ArenaDomainError::OutOfOrderRound {
            expected: progress.next_phase(),
            actual: requested,
        })
}
