//! Battle transaction pinned to one pooled `PostgreSQL` connection.

use super::{conversion, schema::{battles, rounds}};
use crate::arena::{
    domain::{BattleId, BattleSummary, Phase, Round},
    ports::{ArenaRepositoryError, ArenaRepositoryResult, BattleTransaction},
};
use async_trait::async_trait;
use chrono::Utc;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

pub(super) type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Open database transaction covering one battle's writes.
///
/// The connection moves onto the blocking pool for each statement and back
/// again afterwards. If a blocking task is lost the transaction is closed;
/// the pool discards connections still inside a transaction, so the server
/// rolls the work back.
pub struct PostgresBattleTransaction {
    connection: Option<PooledConn>,
    battle_id: Option<BattleId>,
    rounds_written: usize,
}

impl std::fmt::Debug for PostgresBattleTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresBattleTransaction")
            .field("open", &self.connection.is_some())
            .field("battle_id", &self.battle_id)
            .field("rounds_written", &self.rounds_written)
            .finish()
    }
}

impl PostgresBattleTransaction {
    pub(super) async fn begin(mut connection: PooledConn) -> ArenaRepositoryResult<Self> {
        let opened = tokio::task::spawn_blocking(move || {
            AnsiTransactionManager::begin_transaction(&mut *connection)
                .map(|()| connection)
                .map_err(ArenaRepositoryError::persistence)
        })
        .await
        .map_err(ArenaRepositoryError::persistence)??;
        Ok(Self {
            connection: Some(opened),
            battle_id: None,
            rounds_written: 0,
        })
    }

    async fn with_connection<F, T>(&mut self, f: F) -> ArenaRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ArenaRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut connection = self.connection.take().ok_or_else(|| {
            ArenaRepositoryError::TransactionClosed("connection already released".to_owned())
        })?;
        let (returned, result) = tokio::task::spawn_blocking(move || {
            let result = f(&mut connection);
            (connection, result)
        })
        .await
        .map_err(ArenaRepositoryError::persistence)?;
        self.connection = Some(returned);
        result
    }

    async fn finish(&mut self, commit: bool) -> ArenaRepositoryResult<()> {
        let result = self
            .with_connection(move |connection| {
                let outcome = if commit {
                    AnsiTransactionManager::commit_transaction(connection)
                } else {
                    AnsiTransactionManager::rollback_transaction(connection)
                };
                outcome.map_err(ArenaRepositoryError::persistence)
            })
            .await;
        self.connection = None;
        result
    }
}

#[async_trait]
impl BattleTransaction for PostgresBattleTransaction {
    async fn create_battle(&mut self, battle: &BattleSummary) -> ArenaRepositoryResult<()> {
        if let Some(existing) = self.battle_id {
            return Err(ArenaRepositoryError::TransactionClosed(format!(
                "battle {existing} already written in this transaction"
            )));
        }
        let battle_id = battle.id;
        let row = conversion::summary_to_row(battle);
        self.with_connection(move |connection| {
            diesel::insert_into(battles::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ArenaRepositoryError::DuplicateBattle(battle_id)
                    }
                    _ => ArenaRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await?;
        self.battle_id = Some(battle_id);
        Ok(())
    }

    async fn create_round(
        &mut self,
        battle_id: BattleId,
        round: &Round,
    ) -> ArenaRepositoryResult<()> {
        if self.battle_id != Some(battle_id) {
            return Err(ArenaRepositoryError::BattleNotFound(battle_id));
        }
        let row = conversion::round_to_row(battle_id, round, Utc::now());
        self.with_connection(move |connection| {
            diesel::insert_into(rounds::table)
                .values(&row)
                .execute(connection)
                .map_err(ArenaRepositoryError::persistence)?;
            Ok(())
        })
        .await?;
        self.rounds_written += 1;
        Ok(())
    }

    async fn commit(mut self) -> ArenaRepositoryResult<()> {
        let Some(battle_id) = self.battle_id else {
            self.finish(false).await?;
            return Err(ArenaRepositoryError::TransactionClosed(
                "no battle written in this transaction".to_owned(),
            ));
        };
        if self.rounds_written != Phase::ALL.len() {
            let rounds = self.rounds_written;
            self.finish(false).await?;
            return Err(ArenaRepositoryError::IncompleteBattle { battle_id, rounds });
        }
        self.finish(true).await
    }

    async fn rollback(mut self) -> ArenaRepositoryResult<()> {
        self.finish(false).await
    }
}
