//! Session registry error types.

use thiserror::Error;

use crate::game::{GameError, GameKind};

/// Session errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SessionError {
    /// The owner already has a game of this kind open
    #[error("You already have an active {0} game")]
    Conflict(GameKind),

    /// No open game of this kind
    #[error("You have no active {0} game")]
    NotFound(GameKind),

    /// The game timed out and was discarded
    #[error("Your {0} game timed out")]
    Expired(GameKind),

    /// The game could not be built
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
