//! `PostgreSQL` repository implementation for battle storage.

use super::{
    conversion,
    models::{AgentRow, BattleRow, RoundRow},
    schema::{agents, battles, rounds},
    transaction::PostgresBattleTransaction,
};
use crate::arena::{
    domain::{Agent, AgentSlot, Battle, BattleId, BattleSummary},
    ports::{ArenaRepository, ArenaRepositoryError, ArenaRepositoryResult, Page},
};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::debug;

/// `PostgreSQL` connection pool type used by arena adapters.
pub type ArenaPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed arena repository.
#[derive(Debug, Clone)]
pub struct PostgresArenaRepository {
    pool: ArenaPgPool,
}

impl PostgresArenaRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ArenaPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ArenaRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ArenaRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ArenaRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ArenaRepositoryError::persistence)?
    }
}

impl From<diesel::result::Error> for ArenaRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl ArenaRepository for PostgresArenaRepository {
    type Transaction = PostgresBattleTransaction;

    async fn begin(&self) -> ArenaRepositoryResult<Self::Transaction> {
        let pool = self.pool.clone();
        let connection = tokio::task::spawn_blocking(move || pool.get())
            .await
            .map_err(ArenaRepositoryError::persistence)?
            .map_err(ArenaRepositoryError::persistence)?;
        PostgresBattleTransaction::begin(connection).await
    }

    async fn list_battles(&self, page: Option<Page>) -> ArenaRepositoryResult<Vec<BattleSummary>> {
        self.run_blocking(move |connection| {
            let mut query = battles::table
                .select(BattleRow::as_select())
                .order((battles::created_at.desc(), battles::id.desc()))
                .into_boxed();
            if let Some(window) = page {
                query = query
                    .limit(i64::from(window.limit()))
                    .offset(i64::from(window.offset()));
            }
            let rows = query.load::<BattleRow>(connection)?;
            rows.into_iter().map(conversion::row_to_summary).collect()
        })
        .await
    }

    async fn find_battle(&self, id: BattleId) -> ArenaRepositoryResult<Option<Battle>> {
        self.run_blocking(move |connection| {
            let Some(battle) = battles::table
                .filter(battles::id.eq(id.into_inner()))
                .select(BattleRow::as_select())
                .first::<BattleRow>(connection)
                .optional()?
            else {
                return Ok(None);
            };
            let round_rows = rounds::table
                .filter(rounds::battle_id.eq(id.into_inner()))
                .select(RoundRow::as_select())
                .load::<RoundRow>(connection)?;
            conversion::rows_to_battle(battle, round_rows).map(Some)
        })
        .await
    }

    async fn find_agent(&self, slot: AgentSlot) -> ArenaRepositoryResult<Option<Agent>> {
        self.run_blocking(move |connection| {
            let row = agents::table
                .filter(agents::slot.eq(slot.as_str()))
                .select(AgentRow::as_select())
                .first::<AgentRow>(connection)
                .optional()?;
            row.map(conversion::row_to_agent).transpose()
        })
        .await
    }

    async fn list_agents(&self) -> ArenaRepositoryResult<Vec<Agent>> {
        self.run_blocking(|connection| {
            let rows = agents::table
                .select(AgentRow::as_select())
                .load::<AgentRow>(connection)?;
            let mut roster = rows
                .into_iter()
                .map(conversion::row_to_agent)
                .collect::<ArenaRepositoryResult<Vec<_>>>()?;
            roster.sort_by_key(Agent::slot);
            Ok(roster)
        })
        .await
    }

    async fn seed_agents(&self, roster: &[AgentSlot]) -> ArenaRepositoryResult<()> {
        let seeded_at = Utc::now();
        let rows: Vec<_> = roster
            .iter()
            .map(|slot| conversion::seed_row(*slot, seeded_at))
            .collect();
        self.run_blocking(move |connection| {
            let inserted = diesel::insert_into(agents::table)
                .values(&rows)
                .on_conflict_do_nothing()
                .execute(connection)?;
            debug!(inserted, "seeded roster agents");
            Ok(())
        })
        .await
    }

    async fn record_vote(
        &self,
        battle_id: BattleId,
        winner: AgentSlot,
    ) -> ArenaRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, ArenaRepositoryError, _>(|tx| {
                let current = battles::table
                    .filter(battles::id.eq(battle_id.into_inner()))
                    .select(battles::winner)
                    .for_update()
                    .first::<Option<String>>(tx)
                    .optional()?;
                match current {
                    None => return Err(ArenaRepositoryError::BattleNotFound(battle_id)),
                    Some(Some(_)) => {
                        return Err(ArenaRepositoryError::WinnerAlreadyRecorded(battle_id));
                    }
                    Some(None) => {}
                }

                let seeded = agents::table
                    .filter(agents::slot.eq(winner.as_str()))
                    .count()
                    .get_result::<i64>(tx)?;
                if seeded == 0 {
                    return Err(ArenaRepositoryError::AgentNotFound(winner));
                }

                diesel::update(battles::table.filter(battles::id.eq(battle_id.into_inner())))
                    .set(battles::winner.eq(Some(winner.as_str())))
                    .execute(tx)?;
                diesel::update(agents::table.filter(agents::slot.eq(winner.as_str())))
                    .set(agents::wins.eq(agents::wins + 1))
                    .execute(tx)?;
                diesel::update(agents::table.filter(agents::slot.ne(winner.as_str())))
                    .set(agents::losses.eq(agents::losses + 1))
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }
}
