//! `PostgreSQL` adapters for battle persistence.

mod conversion;
mod models;
mod repository;
mod schema;
mod transaction;

pub use repository::{ArenaPgPool, PostgresArenaRepository};
pub use transaction::PostgresBattleTransaction;
