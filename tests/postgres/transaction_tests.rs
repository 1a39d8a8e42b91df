//! Battle transaction tests for the `PostgreSQL` repository.

use crate::postgres::helpers::{
    CleanupGuard, battle_header, count_rows, ensure_template, round, setup_repository,
    test_runtime,
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use roast_arena::arena::{
    domain::{Phase, Round},
    ports::{ArenaRepository, ArenaRepositoryError, BattleTransaction},
};
use rstest::rstest;

#[rstest]
fn committed_battle_reads_back_in_phase_order(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_commit_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let header = battle_header("tabs versus spaces");
    let rt = test_runtime();

    rt.block_on(async {
        let mut transaction = repo.begin().await.expect("begin");
        transaction.create_battle(&header).await.expect("header");
        for phase in Phase::ALL {
            transaction
                .create_round(header.id, &round(phase))
                .await
                .expect("round");
        }
        transaction.commit().await.expect("commit");
    });

    let stored = rt
        .block_on(repo.find_battle(header.id))
        .expect("find_battle")
        .expect("battle stored");
    let phases: Vec<Phase> = stored.rounds().iter().map(Round::phase).collect();
    assert_eq!(phases, Phase::ALL.to_vec());
    let closer = stored.rounds().last().expect("closer round");
    assert_eq!(closer.outputs().gemini, "gemini closer");
    assert_eq!(stored.topic(), &header.topic);
    assert_eq!(stored.winner(), None);

    let listed = rt.block_on(repo.list_battles(None)).expect("list_battles");
    assert_eq!(listed.iter().map(|summary| summary.id).collect::<Vec<_>>(), vec![header.id]);
}

#[rstest]
fn rollback_after_second_round_leaves_no_rows(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_rollback_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let header = battle_header("semicolons");
    let rt = test_runtime();

    rt.block_on(async {
        let mut transaction = repo.begin().await.expect("begin");
        transaction.create_battle(&header).await.expect("header");
        for phase in [Phase::Opening, Phase::Rebuttal] {
            transaction
                .create_round(header.id, &round(phase))
                .await
                .expect("round");
        }
        transaction.rollback().await.expect("rollback");
    });

    assert_eq!(count_rows(shared_test_cluster, &db_name, "battles").expect("count"), 0);
    assert_eq!(count_rows(shared_test_cluster, &db_name, "rounds").expect("count"), 0);
    assert!(
        rt.block_on(repo.find_battle(header.id))
            .expect("find_battle")
            .is_none()
    );
}

#[rstest]
fn dropped_transaction_stores_nothing(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_dropped_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let header = battle_header("trailing commas");
    let rt = test_runtime();

    rt.block_on(async {
        let mut transaction = repo.begin().await.expect("begin");
        transaction.create_battle(&header).await.expect("header");
        transaction
            .create_round(header.id, &round(Phase::Opening))
            .await
            .expect("round");
        drop(transaction);
    });

    // The single pooled connection must not come back mid-transaction.
    assert!(
        rt.block_on(repo.find_battle(header.id))
            .expect("find_battle")
            .is_none()
    );
    assert_eq!(count_rows(shared_test_cluster, &db_name, "battles").expect("count"), 0);
    assert_eq!(count_rows(shared_test_cluster, &db_name, "rounds").expect("count"), 0);
}

#[rstest]
fn commit_with_missing_round_stores_nothing(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_incomplete_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let header = battle_header("yaml");
    let rt = test_runtime();

    let result = rt.block_on(async {
        let mut transaction = repo.begin().await.expect("begin");
        transaction.create_battle(&header).await.expect("header");
        for phase in [Phase::Opening, Phase::Rebuttal] {
            transaction
                .create_round(header.id, &round(phase))
                .await
                .expect("round");
        }
        transaction.commit().await
    });

    assert!(matches!(
        result,
        Err(ArenaRepositoryError::IncompleteBattle { rounds: 2, .. })
    ));
    assert_eq!(count_rows(shared_test_cluster, &db_name, "battles").expect("count"), 0);
    assert_eq!(count_rows(shared_test_cluster, &db_name, "rounds").expect("count"), 0);
}
