//! Given steps for dethrone BDD scenarios.

use super::world::{ArenaWorld, parse_slot, run_async};
use eyre::WrapErr;
use roast_arena::arena::{
    adapters::memory::ScriptedAgentClient,
    domain::{AgentSlot, Phase},
    ports::ArenaRepository,
    services::{StartBattleRequest, VoteRequest, VoteService},
};
use rstest_bdd_macros::given;
use std::sync::Arc;

#[given("a fresh arena with a seeded roster")]
fn fresh_arena(world: &mut ArenaWorld) -> Result<(), eyre::Report> {
    run_async(world.repository.seed_agents(&AgentSlot::ALL)).wrap_err("seed roster")?;
    Ok(())
}

#[given(r#""{name}" has won {count:usize} battles in a row"#)]
fn winning_streak(world: &mut ArenaWorld, name: String, count: usize) -> Result<(), eyre::Report> {
    let winner = parse_slot(&name)?;
    let orchestrator = world.orchestrator();
    let votes = VoteService::new(Arc::clone(&world.repository));
    for battle_number in 0..count {
        let battle = run_async(
            orchestrator.run(StartBattleRequest::new(format!("warm-up battle {battle_number}"))),
        )
        .wrap_err("run warm-up battle")?;
        run_async(votes.record_vote(VoteRequest::new(battle.id(), winner.as_str())))
            .wrap_err("record warm-up vote")?;
    }
    Ok(())
}

#[given(r#"the "{name}" agent fails with "{message}""#)]
fn failing_agent(world: &mut ArenaWorld, name: String, message: String) -> Result<(), eyre::Report> {
    let slot = parse_slot(&name)?;
    *world.agents.get_mut(slot) = ScriptedAgentClient::failing(message);
    Ok(())
}

#[given(r#"writing the "{phase}" round fails"#)]
fn failing_round_write(world: &mut ArenaWorld, phase: String) -> Result<(), eyre::Report> {
    let failing = Phase::try_from(phase.as_str())
        .map_err(|err| eyre::eyre!("invalid phase in step: {err}"))?;
    world
        .repository
        .fail_round_writes(failing)
        .wrap_err("inject round write failure")?;
    Ok(())
}
