//! Game engine error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{GameKind, entities::Chips};

/// Errors produced by the game engines.
///
/// Everything except [`GameError::EmptyShoe`] is an ordinary rejection of a
/// bad request; `EmptyShoe` means an engine invariant was broken.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("bet must be at least ${min}")]
    BetTooSmall { bet: Chips, min: Chips },
    #[error("bet must be at most ${max}")]
    BetTooLarge { bet: Chips, max: Chips },
    #[error("mine count must be between {min} and {max}, got {got}")]
    InvalidMineCount { got: u8, min: u8, max: u8 },
    #[error("no tile at position {0}")]
    InvalidPosition(usize),
    #[error("tile must be between 1 and {max}, got {got}")]
    InvalidTile { got: u8, max: u8 },
    #[error("you are on level {current}, not level {got}")]
    WrongLevel { current: u8, got: u8 },
    #[error("guess must be exactly {expected} letters")]
    GuessLength { expected: usize, got: usize },
    #[error("guess must contain only letters")]
    NonAlphabeticGuess,
    #[error("you already guessed {0}")]
    DuplicateGuess(String),
    #[error("{kind} has no {action} move")]
    IllegalMove { kind: GameKind, action: String },
    #[error("{0} has no cash out")]
    CashOutUnavailable(GameKind),
    #[error("nothing to cash out yet")]
    NothingToCashOut,
    #[error("game is already over")]
    GameOver,
    #[error("invalid game state: shoe ran out of cards")]
    EmptyShoe,
}

impl GameError {
    /// Whether this error signals a broken engine invariant rather than a
    /// rejected request.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, GameError::EmptyShoe)
    }
}

/// Result type for game engine operations
pub type GameResult<T> = Result<T, GameError>;
