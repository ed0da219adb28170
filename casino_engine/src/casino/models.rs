//! Casino API result models.

use serde::{Deserialize, Serialize};

use crate::{
    game::{Chips, GameKind, GameStatus, GameView},
    ledger::AccountId,
    session::SessionId,
};

/// Result of opening a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartedGame {
    pub session_id: SessionId,
    /// Balance after the stake was taken
    pub balance: Chips,
    pub view: GameView,
    /// Present when the game resolved on the deal (Baccarat, naturals)
    pub settlement: Option<Settlement>,
}

/// Result of applying a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub view: GameView,
    /// Present when the move ended the game
    pub settlement: Option<Settlement>,
}

/// Money movement for a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub session_id: SessionId,
    pub account: AccountId,
    pub kind: GameKind,
    pub bet: Chips,
    /// Chips credited back, stake included
    pub payout: Chips,
    /// `payout - bet`
    pub net: Chips,
    /// Balance after the payout
    pub balance: Chips,
    pub status: GameStatus,
}
