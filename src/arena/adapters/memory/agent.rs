//! Scripted agent client for deterministic battles.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::arena::ports::{AgentClient, AgentInvocationError, AgentInvocationResult};

/// One scripted response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    /// Answer with the given text.
    Text(String),
    /// Fail with a transport error carrying the message.
    Fail(String),
    /// Never answer.
    Hang,
}

/// Agent client that replays queued responses and records what it was asked.
///
/// When the queue is empty the fallback reply is used. The script survives a
/// poisoned lock: a panic elsewhere never discards queued replies or the
/// recorded history.
#[derive(Debug, Clone)]
pub struct ScriptedAgentClient {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug)]
struct ScriptState {
    queued: VecDeque<ScriptedReply>,
    fallback: ScriptedReply,
    prompts: Vec<String>,
    personas: Vec<String>,
}

impl ScriptedAgentClient {
    /// Creates a client that answers with `fallback` once the queue drains.
    #[must_use]
    pub fn new(fallback: ScriptedReply) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                queued: VecDeque::new(),
                fallback,
                prompts: Vec::new(),
                personas: Vec::new(),
            })),
        }
    }

    /// Client that always answers with `text`.
    #[must_use]
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(ScriptedReply::Text(text.into()))
    }

    /// Client that always fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(ScriptedReply::Fail(message.into()))
    }

    /// Client that never answers.
    #[must_use]
    pub fn hanging() -> Self {
        Self::new(ScriptedReply::Hang)
    }

    /// Queues a reply ahead of the fallback.
    #[must_use]
    pub fn then(self, reply: ScriptedReply) -> Self {
        self.state().queued.push_back(reply);
        self
    }

    /// Returns every prompt received so far, oldest first.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    /// Returns every persona received so far, oldest first.
    #[must_use]
    pub fn personas(&self) -> Vec<String> {
        self.state().personas.clone()
    }

    fn state(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AgentClient for ScriptedAgentClient {
    async fn invoke(&self, prompt: &str, persona: &str) -> AgentInvocationResult<String> {
        let reply = {
            let mut state = self.state();
            state.prompts.push(prompt.to_owned());
            state.personas.push(persona.to_owned());
            let fallback = state.fallback.clone();
            state.queued.pop_front().unwrap_or(fallback)
        };
        match reply {
            ScriptedReply::Text(text) => Ok(text),
            ScriptedReply::Fail(message) => Err(AgentInvocationError::Transport(message)),
            ScriptedReply::Hang => std::future::pending().await,
        }
    }
}
