//! When steps for dethrone BDD scenarios.

use super::world::{ArenaWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"a dethrone battle is fought over "{topic}""#)]
fn fight_dethrone(world: &mut ArenaWorld, topic: String) {
    world.opening_prompt_index = world.agents.claude.prompts().len();
    let orchestrator = world.orchestrator();
    world.last_result = Some(run_async(orchestrator.run_dethrone(topic)));
}
