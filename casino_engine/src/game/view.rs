//! Immutable snapshots of a game, safe to hand to the rendering layer.

use serde::{Deserialize, Serialize};

use super::{
    GameKind, GameStatus, baccarat::BaccaratView, blackjack::BlackjackView, entities::Chips,
    mines::MinesView, tower::TowerView, wordle::WordleView,
};

/// What a player is allowed to see of a game right now.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameView {
    pub kind: GameKind,
    pub bet: Chips,
    pub status: GameStatus,
    /// Chips owed once the game is over, stake included.
    pub payout: Option<Chips>,
    pub detail: GameDetail,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum GameDetail {
    Blackjack(BlackjackView),
    Baccarat(BaccaratView),
    Mines(MinesView),
    Tower(TowerView),
    Wordle(WordleView),
}
