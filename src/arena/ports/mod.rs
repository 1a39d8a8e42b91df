//! Port contracts for battle orchestration.
//!
//! Ports define infrastructure-agnostic interfaces used by arena services:
//! the persistence collaborator and the external agent capability.

pub mod agent;
pub mod repository;

pub use agent::{AgentClient, AgentInvocationError, AgentInvocationResult};
pub use repository::{
    ArenaRepository, ArenaRepositoryError, ArenaRepositoryResult, BattleTransaction,
    InvalidPageLimit, Page,
};
