//! House games: five synchronous state machines with no I/O.
//!
//! This module provides:
//! - Card, shoe and seedable RNG primitives shared by the engines
//! - Blackjack, Baccarat, Mines, Tower and Wordle rule tables and payouts
//! - [`GameState`], the closed set of engines behind the [`Wager`] trait
//! - Immutable [`GameView`] snapshots handed to the rendering layer
//!
//! Engines never touch balances. They report a terminal status and a payout
//! (stake included) and the orchestrator settles it against the ledger.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod baccarat;
pub mod blackjack;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod mines;
pub mod rng;
pub mod tower;
pub mod view;
pub mod wordle;

pub use baccarat::{Baccarat, BaccaratSide};
pub use blackjack::Blackjack;
pub use entities::{Card, Chips, Shoe, Suit};
pub use errors::{GameError, GameResult};
pub use mines::Mines;
pub use rng::GameRng;
pub use tower::Tower;
pub use view::{GameDetail, GameView};
pub use wordle::{LetterStatus, Wordle};

/// The kinds of game a user can have open, at most one of each.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Blackjack,
    Baccarat,
    Mines,
    Tower,
    Wordle,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Blackjack,
        GameKind::Baccarat,
        GameKind::Mines,
        GameKind::Tower,
        GameKind::Wordle,
    ];

    /// Whether starting this game takes a stake from the ledger.
    pub fn is_wagered(&self) -> bool {
        !matches!(self, GameKind::Wordle)
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Blackjack => "blackjack",
            Self::Baccarat => "baccarat",
            Self::Mines => "mines",
            Self::Tower => "tower",
            Self::Wordle => "wordle",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
    Push,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Push => "push",
        };
        write!(f, "{repr}")
    }
}

/// Parameters for opening a game.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum GameParams {
    Blackjack { bet: Chips },
    Baccarat { bet: Chips, side: BaccaratSide },
    Mines { bet: Chips, mines: u8 },
    Tower { bet: Chips },
    Wordle,
}

impl GameParams {
    pub fn kind(&self) -> GameKind {
        match self {
            Self::Blackjack { .. } => GameKind::Blackjack,
            Self::Baccarat { .. } => GameKind::Baccarat,
            Self::Mines { .. } => GameKind::Mines,
            Self::Tower { .. } => GameKind::Tower,
            Self::Wordle => GameKind::Wordle,
        }
    }

    /// Stake taken when the game opens.
    pub fn bet(&self) -> Chips {
        match self {
            Self::Blackjack { bet }
            | Self::Baccarat { bet, .. }
            | Self::Mines { bet, .. }
            | Self::Tower { bet } => *bet,
            Self::Wordle => 0,
        }
    }

    /// Build the engine for these parameters.
    pub fn build(&self, rng: GameRng) -> GameResult<GameState> {
        let state = match self {
            Self::Blackjack { bet } => Blackjack::new(*bet, rng)?.into(),
            Self::Baccarat { bet, side } => Baccarat::new(*bet, *side, rng)?.into(),
            Self::Mines { bet, mines } => Mines::new(*bet, *mines, rng)?.into(),
            Self::Tower { bet } => Tower::new(*bet, rng)?.into(),
            Self::Wordle => Wordle::new(rng).into(),
        };
        Ok(state)
    }
}

/// A player action against an open game.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Move {
    Hit,
    Stand,
    Reveal { position: usize },
    Climb { level: u8, tile: u8 },
    Guess { word: String },
    NewWord,
}

impl Move {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Reveal { .. } => "reveal",
            Self::Climb { .. } => "climb",
            Self::Guess { .. } => "guess",
            Self::NewWord => "new word",
        }
    }

    pub(crate) fn illegal_for(&self, kind: GameKind) -> GameError {
        GameError::IllegalMove {
            kind,
            action: self.name().to_string(),
        }
    }
}

/// Behavior shared by every engine.
#[enum_dispatch]
pub trait Wager {
    fn kind(&self) -> GameKind;

    /// Stake taken when the game opened.
    fn bet(&self) -> Chips;

    fn status(&self) -> GameStatus;

    /// Chips owed to the player, stake included. `None` while in progress.
    fn payout(&self) -> Option<Chips>;

    /// Apply a move. Moves that do not belong to this game are rejected.
    fn play(&mut self, action: Move) -> GameResult<()>;

    /// Stop early and take the current payout.
    fn cash_out(&mut self) -> GameResult<Chips>;

    fn view(&self) -> GameView;

    fn is_over(&self) -> bool {
        self.status().is_over()
    }
}

/// The live state of one session's game.
#[enum_dispatch(Wager)]
#[derive(Clone, Debug)]
pub enum GameState {
    Blackjack(Blackjack),
    Baccarat(Baccarat),
    Mines(Mines),
    Tower(Tower),
    Wordle(Wordle),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_kind_and_bet() {
        let params = GameParams::Mines { bet: 250, mines: 3 };
        assert_eq!(params.kind(), GameKind::Mines);
        assert_eq!(params.bet(), 250);
        assert_eq!(GameParams::Wordle.bet(), 0);
        assert!(!GameParams::Wordle.kind().is_wagered());
    }

    #[test]
    fn test_params_build_dispatches() {
        for params in [
            GameParams::Blackjack { bet: 100 },
            GameParams::Baccarat {
                bet: 100,
                side: BaccaratSide::Tie,
            },
            GameParams::Mines { bet: 100, mines: 5 },
            GameParams::Tower { bet: 100 },
            GameParams::Wordle,
        ] {
            let state = params.build(GameRng::seeded(5)).unwrap();
            assert_eq!(state.kind(), params.kind());
            assert_eq!(state.bet(), params.bet());
            assert_eq!(state.view().kind, params.kind());
        }
    }

    #[test]
    fn test_foreign_move_rejected() {
        let mut state: GameState = Tower::new(100, GameRng::seeded(1)).unwrap().into();
        let err = state.play(Move::Hit).unwrap_err();
        assert!(matches!(err, GameError::IllegalMove { kind: GameKind::Tower, .. }));
    }

    #[test]
    fn test_params_serde_shape() {
        let json = serde_json::to_string(&GameParams::Tower { bet: 100 }).unwrap();
        assert_eq!(json, r#"{"game":"tower","bet":100}"#);

        let mv: Move = serde_json::from_str(r#"{"action":"climb","level":1,"tile":2}"#).unwrap();
        assert_eq!(mv, Move::Climb { level: 1, tile: 2 });
    }
}
