//! In-memory integration tests for all-or-nothing battle persistence.

use super::helpers::{Harness, harness, harness_with, seed_roster};
use roast_arena::arena::{
    adapters::memory::ScriptedAgentClient,
    domain::{PerAgent, Phase},
    ports::{ArenaRepository, ArenaRepositoryError, Page},
    services::{ArenaServiceError, StartBattleRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_battle_does_not_disturb_earlier_battles(harness: Harness) {
    let kept = harness
        .orchestrator
        .run(StartBattleRequest::new("first battle"))
        .await
        .expect("first battle completes");
    harness
        .repository
        .fail_round_writes(Phase::Closer)
        .expect("inject failure");

    let failed = harness
        .orchestrator
        .run(StartBattleRequest::new("second battle"))
        .await;

    assert!(matches!(
        failed,
        Err(ArenaServiceError::Repository(
            ArenaRepositoryError::Persistence(_)
        ))
    ));
    let listed = harness
        .history
        .list(Page::default())
        .await
        .expect("listing succeeds");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(|summary| summary.id), Some(kept.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn battle_with_every_agent_failing_still_commits() {
    let harness = harness_with(PerAgent::new(
        ScriptedAgentClient::failing("offline"),
        ScriptedAgentClient::hanging(),
        ScriptedAgentClient::failing("offline"),
    ));
    seed_roster(&harness).await.expect("seed roster");

    let battle = harness
        .orchestrator
        .run(StartBattleRequest::new("is anyone there"))
        .await
        .expect("agent failures are not fatal");

    let stored = harness
        .repository
        .find_battle(battle.id())
        .await
        .expect("lookup succeeds")
        .expect("battle stored");
    for round in stored.rounds() {
        assert_eq!(round.outputs().claude, "[Claude error] offline");
        assert!(round.outputs().gpt.starts_with("[GPT error] timed out"));
    }
}
