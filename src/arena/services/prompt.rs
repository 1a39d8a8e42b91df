//! Phase-specific prompt construction.
//!
//! Prompts are rendered from fixed templates. Earlier round outputs are
//! inserted verbatim and attributed to their agent's display label.

use crate::arena::domain::{AgentSlot, Matchup, PerAgent, Phase, Topic};
use minijinja::{Environment, context};
use serde::Serialize;
use thiserror::Error;

const OPENING_TEMPLATE: &str = concat!(
    "Topic: {{ topic }}\n",
    "Matchup: {{ matchup }}\n",
    "Phase: OPENING\n",
    "Fire your first shot at the other agents with maximum personality.",
    "{% if defender %}\nCurrent champion: {{ defender }}. ",
    "If you are {{ defender }}, defend the crown and set the tone.{% endif %}",
);

const REBUTTAL_TEMPLATE: &str = concat!(
    "Topic: {{ topic }}\n",
    "Phase: REBUTTAL\n",
    "{% for entry in opening %}What {{ entry.label }} said: {{ entry.output }}\n{% endfor %}",
    "Respond directly to the burns aimed at you. Name names, keep the persona rules.",
);

const CLOSER_TEMPLATE: &str = concat!(
    "Topic: {{ topic }}\n",
    "Phase: CLOSER - final mic drop.\n",
    "Reference threads from earlier rounds.\n",
    "Opening recap: {% for entry in opening %}{{ entry.label }}={{ entry.output }}",
    "{% if not loop.last %} | {% endif %}{% endfor %}\n",
    "Rebuttal recap: {% for entry in rebuttal %}{{ entry.label }}={{ entry.output }}",
    "{% if not loop.last %} | {% endif %}{% endfor %}\n",
    "Drop the mic in at most three sentences.",
);

/// Error raised when a prompt template fails to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {phase} prompt: {reason}")]
pub struct PromptRenderError {
    /// Phase whose prompt failed to render.
    pub phase: Phase,
    /// Renderer diagnostic.
    pub reason: String,
}

/// Result type for prompt construction.
pub type PromptResult<T> = Result<T, PromptRenderError>;

#[derive(Serialize)]
struct AttributedOutput<'a> {
    label: &'static str,
    output: &'a str,
}

/// Builds the prompt text for each battle phase.
///
/// Every builder is deterministic and free of side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Creates a prompt builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the opening prompt.
    ///
    /// When a defender is named, the prompt instructs that agent to defend
    /// its title and set the tone.
    ///
    /// # Errors
    ///
    /// Returns [`PromptRenderError`] if the template fails to render.
    pub fn build_opening(
        &self,
        topic: &Topic,
        matchup: &Matchup,
        defender: Option<AgentSlot>,
    ) -> PromptResult<String> {
        let defender_label = defender.map(|slot| slot.label().to_uppercase());
        render(
            Phase::Opening,
            OPENING_TEMPLATE,
            context! {
                topic => topic.as_str(),
                matchup => matchup.as_str(),
                defender => defender_label,
            },
        )
    }

    /// Builds the rebuttal prompt quoting every opening output.
    ///
    /// # Errors
    ///
    /// Returns [`PromptRenderError`] if the template fails to render.
    pub fn build_rebuttal(
        &self,
        topic: &Topic,
        opening: &PerAgent<String>,
    ) -> PromptResult<String> {
        render(
            Phase::Rebuttal,
            REBUTTAL_TEMPLATE,
            context! {
                topic => topic.as_str(),
                opening => attribute(opening),
            },
        )
    }

    /// Builds the closer prompt recapping the opening and rebuttal rounds.
    ///
    /// # Errors
    ///
    /// Returns [`PromptRenderError`] if the template fails to render.
    pub fn build_closer(
        &self,
        topic: &Topic,
        opening: &PerAgent<String>,
        rebuttal: &PerAgent<String>,
    ) -> PromptResult<String> {
        render(
            Phase::Closer,
            CLOSER_TEMPLATE,
            context! {
                topic => topic.as_str(),
                opening => attribute(opening),
                rebuttal => attribute(rebuttal),
            },
        )
    }
}

fn attribute(outputs: &PerAgent<String>) -> Vec<AttributedOutput<'_>> {
    outputs
        .iter()
        .map(|(slot, output)| AttributedOutput {
            label: slot.label(),
            output: output.as_str(),
        })
        .collect()
}

fn render(phase: Phase, template: &str, context: minijinja::Value) -> PromptResult<String> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| PromptRenderError {
            phase,
            reason: error.to_string(),
        })
}
