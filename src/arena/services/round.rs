//! Execution of a single battle round.

use super::{AgentGateway, ArenaServiceResult};
use crate::arena::{
    domain::{BattleId, PerAgent, Phase, Round},
    ports::{AgentClient, BattleTransaction},
};
use tracing::debug;

/// Runs one round: fan the prompt out, then persist the outputs.
#[derive(Debug)]
pub struct RoundExecutor<'a, A>
where
    A: AgentClient + 'static,
{
    gateway: &'a AgentGateway<A>,
    personas: &'a PerAgent<String>,
}

impl<'a, A> RoundExecutor<'a, A>
where
    A: AgentClient + 'static,
{
    /// Creates an executor over a gateway and the persona for each agent.
    #[must_use]
    pub const fn new(gateway: &'a AgentGateway<A>, personas: &'a PerAgent<String>) -> Self {
        Self { gateway, personas }
    }

    /// Runs the round for `phase` and writes it through `transaction`.
    ///
    /// Agent failures are folded into the round's outputs and never fail the
    /// call. The round only counts as complete once it has been written.
    ///
    /// # Errors
    ///
    /// Returns [`super::ArenaServiceError::Repository`] when the round cannot
    /// be persisted.
    pub async fn run<T>(
        &self,
        transaction: &mut T,
        battle_id: BattleId,
        phase: Phase,
        prompt: &str,
    ) -> ArenaServiceResult<Round>
    where
        T: BattleTransaction,
    {
        let outputs = self.gateway.invoke_all(prompt, self.personas).await;
        let round = Round::new(phase, outputs);
        transaction.create_round(battle_id, &round).await?;
        debug!(%battle_id, %phase, "round persisted");
        Ok(round)
    }
}
