//! Domain model for roast battles.
//!
//! The arena domain models the fixed agent roster, the three-phase round
//! progression, battles with their rounds, and the champion streak
//! derivation. Persistence and agent transport stay outside this boundary.

mod agent;
mod battle;
mod champion;
mod error;
mod ids;
mod phase;
mod progress;
mod round;
mod slot;
mod text;

pub use agent::Agent;
pub use battle::{Battle, BattleSummary, PersistedBattleData};
pub use champion::{AgentRecord, ChampionStreak, Scoreboard, derive_champion_streak};
pub use error::{ArenaDomainError, ParsePhaseError};
pub use ids::BattleId;
pub use phase::Phase;
pub use progress::BattleProgress;
pub use round::Round;
pub use slot::{AgentSlot, PerAgent};
pub use text::{Matchup, Topic};
