//! Diesel row models for battle persistence.

use super::schema::{agents, battles, rounds};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for agents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = agents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AgentRow {
    /// Roster seat key.
    pub slot: String,
    /// Battles won.
    pub wins: i64,
    /// Battles lost.
    pub losses: i64,
    /// Seeding timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for agents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = agents)]
pub struct NewAgentRow {
    /// Roster seat key.
    pub slot: String,
    /// Battles won.
    pub wins: i64,
    /// Battles lost.
    pub losses: i64,
    /// Seeding timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result and insert row for battles.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = battles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BattleRow {
    /// Battle identifier.
    pub id: uuid::Uuid,
    /// Roast topic.
    pub topic: String,
    /// Matchup descriptor.
    pub matchup: String,
    /// Winner seat key.
    pub winner: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for round contents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rounds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoundRow {
    /// Phase name.
    pub phase: String,
    /// Claude's output.
    pub claude_roast: String,
    /// GPT's output.
    pub gpt_roast: String,
    /// Gemini's output.
    pub gemini_roast: String,
}

/// Insert model for rounds; the surrogate key is generated.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rounds)]
pub struct NewRoundRow {
    /// Owning battle.
    pub battle_id: uuid::Uuid,
    /// Phase name.
    pub phase: String,
    /// Claude's output.
    pub claude_roast: String,
    /// GPT's output.
    pub gpt_roast: String,
    /// Gemini's output.
    pub gemini_roast: String,
    /// Write timestamp.
    pub created_at: DateTime<Utc>,
}
