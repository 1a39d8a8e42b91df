//! Vote recording tests for the `PostgreSQL` repository.

use crate::postgres::helpers::{
    CleanupGuard, battle_header, ensure_template, round, setup_repository, test_runtime,
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use roast_arena::arena::{
    adapters::postgres::PostgresArenaRepository,
    domain::{AgentRecord, AgentSlot, BattleSummary, Phase},
    ports::{ArenaRepository, ArenaRepositoryError, BattleTransaction},
};
use rstest::rstest;

async fn store_battle(repo: &PostgresArenaRepository, header: &BattleSummary) {
    let mut transaction = repo.begin().await.expect("begin");
    transaction.create_battle(header).await.expect("header");
    for phase in Phase::ALL {
        transaction
            .create_round(header.id, &round(phase))
            .await
            .expect("round");
    }
    transaction.commit().await.expect("commit");
}

async fn record_of(repo: &PostgresArenaRepository, slot: AgentSlot) -> AgentRecord {
    repo.find_agent(slot)
        .await
        .expect("find_agent")
        .expect("seeded agent")
        .record()
}

#[rstest]
fn second_vote_is_rejected(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_vote_twice_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let header = battle_header("monorepos");
    let rt = test_runtime();

    rt.block_on(async {
        repo.seed_agents(&AgentSlot::ALL).await.expect("seed roster");
        store_battle(&repo, &header).await;
        repo.record_vote(header.id, AgentSlot::Gemini)
            .await
            .expect("first vote");

        let second = repo.record_vote(header.id, AgentSlot::Gpt).await;
        assert!(matches!(
            second,
            Err(ArenaRepositoryError::WinnerAlreadyRecorded(id)) if id == header.id
        ));

        let stored = repo
            .find_battle(header.id)
            .await
            .expect("find_battle")
            .expect("battle stored");
        assert_eq!(stored.winner(), Some(AgentSlot::Gemini));
        assert_eq!(
            record_of(&repo, AgentSlot::Gemini).await,
            AgentRecord { wins: 1, losses: 0 }
        );
        assert_eq!(
            record_of(&repo, AgentSlot::Gpt).await,
            AgentRecord { wins: 0, losses: 1 }
        );
    });
}

#[rstest]
fn decided_battle_is_reported_before_unseeded_agent(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_vote_order_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let header = battle_header("dark mode");
    let rt = test_runtime();

    rt.block_on(async {
        repo.seed_agents(&[AgentSlot::Claude]).await.expect("seed one");
        store_battle(&repo, &header).await;

        let unseeded = repo.record_vote(header.id, AgentSlot::Gpt).await;
        assert!(matches!(
            unseeded,
            Err(ArenaRepositoryError::AgentNotFound(AgentSlot::Gpt))
        ));

        repo.record_vote(header.id, AgentSlot::Claude)
            .await
            .expect("first vote");
        let again = repo.record_vote(header.id, AgentSlot::Gpt).await;
        assert!(matches!(
            again,
            Err(ArenaRepositoryError::WinnerAlreadyRecorded(id)) if id == header.id
        ));
    });
}
