//! Casino error types.

use thiserror::Error;

use crate::{
    game::{Chips, GameError, GameKind},
    ledger::LedgerError,
    session::SessionError,
};

/// Errors returned by the casino API
#[derive(Debug, Error)]
pub enum CasinoError {
    /// Bad bet, bad parameters or a move the game does not accept
    #[error(transparent)]
    Validation(GameError),

    /// Not enough chips for the stake
    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientFunds { available: Chips, required: Chips },

    /// A game of this kind is already open
    #[error("You already have an active {0} game")]
    SessionConflict(GameKind),

    /// No open game of this kind
    #[error("You have no active {0} game")]
    SessionNotFound(GameKind),

    /// The game timed out and was discarded
    #[error("Your {0} game timed out")]
    SessionExpired(GameKind),

    /// Cash out requested before anything was won
    #[error("Nothing revealed yet; there is nothing to cash out")]
    NothingRevealed,

    /// The ledger could not be read or written
    #[error("Ledger failure: {0}")]
    Persistence(LedgerError),

    /// An engine reached a state it should never reach
    #[error("Engine invariant violated: {0}")]
    EngineInvariant(String),
}

impl CasinoError {
    /// Get a client-safe error message.
    ///
    /// Storage and engine failures are reported generically.
    pub fn client_message(&self) -> String {
        match self {
            CasinoError::Persistence(e) => e.client_message(),
            CasinoError::EngineInvariant(_) => "Something went wrong with this game".to_string(),
            _ => self.to_string(),
        }
    }

    /// Whether the error is the caller's fault rather than the server's.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            CasinoError::Persistence(_) | CasinoError::EngineInvariant(_)
        )
    }
}

impl From<GameError> for CasinoError {
    fn from(e: GameError) -> Self {
        if e.is_invariant_violation() {
            CasinoError::EngineInvariant(e.to_string())
        } else {
            CasinoError::Validation(e)
        }
    }
}

impl From<LedgerError> for CasinoError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InsufficientFunds {
                available,
                required,
            } => CasinoError::InsufficientFunds {
                available,
                required,
            },
            other => CasinoError::Persistence(other),
        }
    }
}

impl From<SessionError> for CasinoError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Conflict(kind) => CasinoError::SessionConflict(kind),
            SessionError::NotFound(kind) => CasinoError::SessionNotFound(kind),
            SessionError::Expired(kind) => CasinoError::SessionExpired(kind),
            SessionError::Game(e) => e.into(),
        }
    }
}

/// Result type for casino operations
pub type CasinoResult<T> = Result<T, CasinoError>;
