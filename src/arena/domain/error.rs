//! Error types for arena domain validation and parsing.

use super::{BattleId, Phase};
use thiserror::Error;

/// Errors returned while constructing or advancing arena domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArenaDomainError {
    /// The agent name is not part of the fixed roster.
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    /// The topic is shorter or longer than the accepted bounds.
    #[error("topic must be between 3 and 256 characters, got {0}")]
    InvalidTopic(usize),

    /// The matchup descriptor is empty after trimming.
    #[error("matchup must not be empty")]
    EmptyMatchup,

    /// The matchup descriptor exceeds the storage limit.
    #[error("matchup exceeds 256 character limit: {0}")]
    MatchupTooLong(String),

    /// A round arrived out of the fixed phase order.
    #[error("expected {expected:?} round, got {actual}")]
    OutOfOrderRound {
        /// The phase the battle expects next, or `None` when it is complete.
        expected: Option<Phase>,
        /// The phase that was supplied.
        actual: Phase,
    },

    /// A battle was finished before all three rounds were recorded.
    #[error("battle {battle_id} is incomplete: {rounds} of 3 rounds recorded")]
    IncompleteBattle {
        /// Battle identifier.
        battle_id: BattleId,
        /// Number of rounds recorded so far.
        rounds: usize,
    },

    /// The battle already has a recorded winner.
    #[error("battle {0} already has a winner")]
    WinnerAlreadyRecorded(BattleId),
}

/// Error returned while parsing battle phases from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown battle phase: {0}")]
pub struct ParsePhaseError(pub String);
