//! In-memory integration tests for the battle, vote, and history cycle.

use super::helpers::{Harness, harness, seed_roster};
use roast_arena::arena::{
    domain::{AgentRecord, AgentSlot},
    ports::Page,
    services::{StartBattleRequest, VoteRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn battles_votes_and_dethrones_chain_together(harness: Harness) -> Result<(), eyre::Report> {
    seed_roster(&harness).await?;

    for topic in ["tabs versus spaces", "light versus dark themes"] {
        let battle = harness
            .orchestrator
            .run(StartBattleRequest::new(topic))
            .await?;
        harness
            .votes
            .record_vote(VoteRequest::new(battle.id(), "claude"))
            .await?;
    }
    let upset = harness
        .orchestrator
        .run(StartBattleRequest::new("recursion versus loops"))
        .await?;
    let scoreboard = harness
        .votes
        .record_vote(VoteRequest::new(upset.id(), "gemini"))
        .await?;

    eyre::ensure!(scoreboard.champion == Some(AgentSlot::Gemini), "gemini should reign");
    eyre::ensure!(scoreboard.streak == 1, "streak resets on a new champion");
    eyre::ensure!(
        scoreboard.records.claude == AgentRecord { wins: 2, losses: 1 },
        "unexpected claude record {:?}",
        scoreboard.records.claude
    );
    eyre::ensure!(
        scoreboard.records.gpt == AgentRecord { wins: 0, losses: 3 },
        "unexpected gpt record {:?}",
        scoreboard.records.gpt
    );

    let challenge = harness.orchestrator.run_dethrone("the one true brace style").await?;
    eyre::ensure!(
        challenge.matchup().as_str() == "dethrone:gemini",
        "unexpected matchup {}",
        challenge.matchup()
    );

    let recent = harness.history.list(Page::new(2, 0)?).await?;
    let ids: Vec<_> = recent.iter().map(|summary| summary.id).collect();
    eyre::ensure!(ids.first() == Some(&challenge.id()), "dethrone battle listed first");
    eyre::ensure!(ids.get(1) == Some(&upset.id()), "upset listed second");

    let stored = harness
        .history
        .find(upset.id())
        .await?
        .ok_or_else(|| eyre::eyre!("upset battle missing"))?;
    eyre::ensure!(stored.winner() == Some(AgentSlot::Gemini), "winner persisted");
    eyre::ensure!(stored.rounds().len() == 3, "all rounds persisted");
    Ok(())
}
