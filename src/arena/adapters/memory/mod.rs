//! In-memory adapters for arena ports.

mod agent;
mod repository;

pub use agent::{ScriptedAgentClient, ScriptedReply};
pub use repository::{InMemoryArenaRepository, InMemoryBattleTransaction};
