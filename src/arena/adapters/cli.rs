//! Agent client that shells out to the vendor command-line tools.

use async_trait::async_trait;
use std::process::Stdio;
use tracing::debug;

use crate::arena::{
    domain::AgentSlot,
    ports::{AgentClient, AgentInvocationError, AgentInvocationResult},
};

/// How the persona reaches the vendor tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PersonaDelivery {
    /// Passed through a dedicated `--system-prompt` flag.
    SystemPromptFlag,
    /// Prepended to the prompt, separated by a blank line.
    Prefixed,
}

/// Runs one non-interactive vendor CLI per invocation.
///
/// The child process is killed if the invocation future is dropped, which
/// is how the gateway enforces its timeout ceiling.
#[derive(Debug, Clone)]
pub struct CliAgentClient {
    program: String,
    leading_args: Vec<String>,
    persona: PersonaDelivery,
}

impl CliAgentClient {
    /// Client for `claude -p --system-prompt <persona> <prompt>`.
    #[must_use]
    pub fn claude() -> Self {
        Self {
            program: "claude".to_owned(),
            leading_args: vec!["-p".to_owned(), "--system-prompt".to_owned()],
            persona: PersonaDelivery::SystemPromptFlag,
        }
    }

    /// Client for `codex exec --skip-git-repo-check <persona + prompt>`.
    #[must_use]
    pub fn codex() -> Self {
        Self {
            program: "codex".to_owned(),
            leading_args: vec!["exec".to_owned(), "--skip-git-repo-check".to_owned()],
            persona: PersonaDelivery::Prefixed,
        }
    }

    /// Client for `gemini -p <persona + prompt>`.
    #[must_use]
    pub fn gemini() -> Self {
        Self {
            program: "gemini".to_owned(),
            leading_args: vec!["-p".to_owned()],
            persona: PersonaDelivery::Prefixed,
        }
    }

    /// Returns the client for a roster seat.
    #[must_use]
    pub fn for_slot(slot: AgentSlot) -> Self {
        match slot {
            AgentSlot::Claude => Self::claude(),
            AgentSlot::Gpt => Self::codex(),
            AgentSlot::Gemini => Self::gemini(),
        }
    }

    /// Overrides the executable, keeping the argument layout.
    #[must_use]
    pub fn with_binary(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Returns the executable name or path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the argument vector for one invocation.
    #[must_use]
    pub fn arguments(&self, prompt: &str, persona: &str) -> Vec<String> {
        let mut args = self.leading_args.clone();
        match self.persona {
            PersonaDelivery::SystemPromptFlag => {
                args.push(persona.to_owned());
                args.push(prompt.to_owned());
            }
            PersonaDelivery::Prefixed => args.push(format!("{persona}\n\n{prompt}")),
        }
        args
    }
}

#[async_trait]
impl AgentClient for CliAgentClient {
    async fn invoke(&self, prompt: &str, persona: &str) -> AgentInvocationResult<String> {
        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(self.arguments(prompt, persona))
            .stdin(Stdio::null())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        debug!(program = %self.program, "spawning agent CLI");
        let output = command.output().await.map_err(AgentInvocationError::spawn)?;
        if !output.status.success() {
            return Err(AgentInvocationError::non_zero_exit(
                &String::from_utf8_lossy(&output.stderr),
                output.status.code(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
