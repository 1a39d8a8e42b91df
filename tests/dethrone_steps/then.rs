//! Then steps for dethrone BDD scenarios.

use super::world::{ArenaWorld, parse_slot, run_async};
use roast_arena::arena::{
    domain::{Phase, Round},
    ports::{ArenaRepository, ArenaRepositoryError},
    services::ArenaServiceError,
};
use rstest_bdd_macros::then;

#[then(r#"the battle matchup is "{matchup}""#)]
fn battle_matchup(world: &ArenaWorld, matchup: String) -> Result<(), eyre::Report> {
    let battle = world.battle()?;
    eyre::ensure!(
        battle.matchup().as_str() == matchup,
        "expected matchup '{matchup}', found '{}'",
        battle.matchup()
    );
    Ok(())
}

#[then(r#"the opening prompt names "{label}" as the defending champion"#)]
fn opening_names_defender(world: &ArenaWorld, label: String) -> Result<(), eyre::Report> {
    let prompts = world.agents.claude.prompts();
    let opening = prompts
        .get(world.opening_prompt_index)
        .ok_or_else(|| eyre::eyre!("no opening prompt recorded for the dethrone battle"))?;
    let expected = format!("Current champion: {label}.");
    eyre::ensure!(
        opening.contains(&expected),
        "opening prompt does not name {label}: {opening}"
    );
    Ok(())
}

#[then("the battle holds {count:usize} rounds in phase order")]
fn rounds_in_order(world: &ArenaWorld, count: usize) -> Result<(), eyre::Report> {
    let battle = world.battle()?;
    let phases: Vec<Phase> = battle.rounds().iter().map(Round::phase).collect();
    eyre::ensure!(phases.len() == count, "expected {count} rounds, found {}", phases.len());
    eyre::ensure!(phases == Phase::ALL, "rounds out of order: {phases:?}");
    Ok(())
}

#[then(r#"the champion is "{name}" with a streak of {streak:u32}"#)]
fn champion_streak(world: &ArenaWorld, name: String, streak: u32) -> Result<(), eyre::Report> {
    let expected = parse_slot(&name)?;
    let standing = run_async(world.orchestrator().tracker().current_champion_and_streak())
        .map_err(|err| eyre::eyre!("champion lookup failed: {err}"))?;
    eyre::ensure!(
        standing.champion == Some(expected) && standing.streak == streak,
        "expected {expected} on a streak of {streak}, found {standing:?}"
    );
    Ok(())
}

#[then(r#"every "{name}" output reads "{text}""#)]
fn every_output_reads(world: &ArenaWorld, name: String, text: String) -> Result<(), eyre::Report> {
    let slot = parse_slot(&name)?;
    let battle = world.battle()?;
    for round in battle.rounds() {
        let output = round.outputs().get(slot);
        eyre::ensure!(
            *output == text,
            "{} output for {slot} was '{output}'",
            round.phase()
        );
    }
    Ok(())
}

#[then("the battle fails with a persistence error")]
fn fails_with_persistence_error(world: &ArenaWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing battle result in scenario world"))?;
    if !matches!(
        result,
        Err(ArenaServiceError::Repository(
            ArenaRepositoryError::Persistence(_)
        ))
    ) {
        return Err(eyre::eyre!("expected persistence error, got {result:?}"));
    }
    Ok(())
}

#[then("no battles are stored")]
fn no_battles_stored(world: &ArenaWorld) -> Result<(), eyre::Report> {
    let stored = run_async(world.repository.list_battles(None))
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    eyre::ensure!(stored.is_empty(), "expected no battles, found {}", stored.len());
    Ok(())
}
