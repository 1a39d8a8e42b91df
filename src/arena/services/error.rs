//! Service-level errors for arena operations.

use super::PromptRenderError;
use crate::arena::{domain::ArenaDomainError, ports::ArenaRepositoryError};
use thiserror::Error;

/// Service-level errors for battle orchestration, voting, and history.
#[derive(Debug, Error)]
pub enum ArenaServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ArenaDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ArenaRepositoryError),
    /// Prompt rendering failed.
    #[error(transparent)]
    Prompt(#[from] PromptRenderError),
}

/// Result type for arena service operations.
pub type ArenaServiceResult<T> = Result<T, ArenaServiceError>;
