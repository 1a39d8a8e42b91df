//! Agent port: one opaque text-generation participant.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for agent invocations.
pub type AgentInvocationResult<T> = Result<T, AgentInvocationError>;

/// External agent capability.
///
/// Implementations must be cancel-safe: the gateway drops the returned future
/// when the invocation exceeds its timeout.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Sends `prompt` to the agent under the given persona and returns its
    /// raw output.
    async fn invoke(&self, prompt: &str, persona: &str) -> AgentInvocationResult<String>;
}

/// Errors returned by agent adapters.
#[derive(Debug, Clone, Error)]
pub enum AgentInvocationError {
    /// The agent process completed with a non-zero status.
    #[error("{0}")]
    NonZeroExit(String),

    /// The agent process could not be started.
    #[error("failed to start agent: {0}")]
    Spawn(Arc<std::io::Error>),

    /// The agent did not answer within the timeout ceiling.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// The task driving the invocation panicked or was cancelled.
    #[error("invocation aborted: {0}")]
    Aborted(String),

    /// Any other transport failure.
    #[error("{0}")]
    Transport(String),
}

impl AgentInvocationError {
    /// Wraps a process spawn error.
    #[must_use]
    pub fn spawn(err: std::io::Error) -> Self {
        Self::Spawn(Arc::new(err))
    }

    /// Builds a non-zero exit error from captured stderr and the exit code.
    ///
    /// Falls back to a generic message naming the exit code when stderr is
    /// blank.
    #[must_use]
    pub fn non_zero_exit(stderr: &str, code: Option<i32>) -> Self {
        let trimmed = stderr.trim();
        if !trimmed.is_empty() {
            return Self::NonZeroExit(trimmed.to_owned());
        }
        let message = code.map_or_else(
            || "CLI terminated by signal".to_owned(),
            |exit_code| format!("CLI exited with code {exit_code}"),
        );
        Self::NonZeroExit(message)
    }
}
