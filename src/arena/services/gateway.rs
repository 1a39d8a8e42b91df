//! Concurrent fan-out of one prompt to every roster agent.

use crate::arena::{
    config::ArenaConfig,
    domain::{AgentSlot, PerAgent},
    ports::{AgentClient, AgentInvocationError, AgentInvocationResult},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Invokes all three agents concurrently with per-agent failure isolation.
///
/// Each invocation runs in its own task under the timeout ceiling. The tasks
/// live in a [`JoinSet`] and never outlive the round that started them. A
/// failure in one seat (error, timeout, or panic) never blocks or aborts the
/// others. The gateway keeps no state between calls.
#[derive(Debug)]
pub struct AgentGateway<A>
where
    A: AgentClient + 'static,
{
    clients: PerAgent<Arc<A>>,
    timeout: Duration,
}

impl<A> Clone for AgentGateway<A>
where
    A: AgentClient + 'static,
{
    fn clone(&self) -> Self {
        Self {
            clients: self.clients.clone(),
            timeout: self.timeout,
        }
    }
}

impl<A> AgentGateway<A>
where
    A: AgentClient + 'static,
{
    /// Creates a gateway with an explicit timeout ceiling.
    #[must_use]
    pub const fn new(clients: PerAgent<Arc<A>>, timeout: Duration) -> Self {
        Self { clients, timeout }
    }

    /// Creates a gateway using the configured timeout ceiling.
    #[must_use]
    pub const fn from_config(clients: PerAgent<Arc<A>>, config: &ArenaConfig) -> Self {
        Self::new(clients, config.agent_timeout())
    }

    /// Returns the timeout ceiling applied to each invocation.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Invokes every agent and returns one display string per seat.
    ///
    /// Successful seats hold the trimmed output; failed seats hold
    /// `"[<label> error] <message>"`.
    pub async fn invoke_all(&self, prompt: &str, personas: &PerAgent<String>) -> PerAgent<String> {
        self.invoke_all_outcomes(prompt, personas)
            .await
            .map(render_outcome)
    }

    /// Invokes every agent and returns the structured outcome per seat.
    ///
    /// Waits until all three invocations reach a terminal state; completion
    /// order is unconstrained. Dropping the returned future aborts every
    /// invocation still in flight.
    pub async fn invoke_all_outcomes(
        &self,
        prompt: &str,
        personas: &PerAgent<String>,
    ) -> PerAgent<AgentInvocationResult<String>> {
        let mut tasks = JoinSet::new();
        let task_ids = PerAgent::from_fn(|slot| {
            let client = Arc::clone(self.clients.get(slot));
            let prompt_text = prompt.to_owned();
            let persona = personas.get(slot).clone();
            let timeout = self.timeout;
            tasks
                .spawn(async move {
                    match tokio::time::timeout(timeout, client.invoke(&prompt_text, &persona))
                        .await
                    {
                        Ok(result) => result.map(|output| output.trim().to_owned()),
                        Err(_) => Err(AgentInvocationError::TimedOut(timeout)),
                    }
                })
                .id()
        });

        let mut outcomes = PerAgent::from_fn(|_| {
            Err(AgentInvocationError::Aborted(
                "task finished without reporting".to_owned(),
            ))
        });
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, outcome) = match joined {
                Ok((id, outcome)) => (id, outcome),
                Err(err) => (
                    err.id(),
                    Err(AgentInvocationError::Aborted(err.to_string())),
                ),
            };
            if let Some((slot, _)) = task_ids.iter().find(|(_, task_id)| **task_id == id) {
                *outcomes.get_mut(slot) = outcome;
            }
        }

        for (slot, outcome) in outcomes.iter() {
            match outcome {
                Ok(output) => debug!(agent = %slot, bytes = output.len(), "agent responded"),
                Err(err) => warn!(agent = %slot, error = %err, "agent invocation failed"),
            }
        }
        outcomes
    }
}

/// Downgrades a structured outcome to the text stored in a round slot.
#[must_use]
pub fn render_outcome(slot: AgentSlot, outcome: AgentInvocationResult<String>) -> String {
    match outcome {
        Ok(output) => output,
        Err(err) => format!("[{} error] {err}", slot.label()),
    }
}
