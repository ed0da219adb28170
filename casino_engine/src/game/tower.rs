//! Tower: ten levels of three tiles, one bomb per level.
//!
//! Each cleared level adds 0.5 to the multiplier. Clearing the top level
//! wins automatically at the multiplier reached on it.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{
    GameKind, GameStatus, Move, Wager,
    constants::{TOWER_LEVELS, TOWER_STEP, TOWER_TILES},
    entities::{Chips, check_stake},
    errors::{GameError, GameResult},
    rng::GameRng,
    view::{GameDetail, GameView},
};

#[derive(Clone, Debug)]
pub struct Tower {
    bet: Chips,
    level: u8,
    multiplier: f64,
    bomb: u8,
    rng: GameRng,
    /// Bomb positions queued for upcoming levels, consumed before the RNG.
    planted: VecDeque<u8>,
    status: GameStatus,
    payout: Option<Chips>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TowerView {
    pub level: u8,
    pub max_levels: u8,
    pub tiles: u8,
    pub multiplier: f64,
    pub potential_payout: Chips,
    /// Bomb of the last level played, once the game is over.
    pub bomb: Option<u8>,
}

impl Tower {
    pub fn new(bet: Chips, rng: GameRng) -> GameResult<Self> {
        Self::with_bombs(bet, Vec::new(), rng)
    }

    /// Tower whose first levels hide their bombs at `bombs` (tiles 1-3, in
    /// level order). Levels past the list are randomized.
    pub fn with_bombs(bet: Chips, bombs: Vec<u8>, rng: GameRng) -> GameResult<Self> {
        check_stake(bet)?;
        if let Some(&bad) = bombs.iter().find(|&&t| !(1..=TOWER_TILES).contains(&t)) {
            return Err(GameError::InvalidTile {
                got: bad,
                max: TOWER_TILES,
            });
        }
        let mut tower = Self {
            bet,
            level: 1,
            multiplier: 1.0,
            bomb: 0,
            rng,
            planted: bombs.into_iter().collect(),
            status: GameStatus::InProgress,
            payout: None,
        };
        tower.plant_bomb();
        Ok(tower)
    }

    fn plant_bomb(&mut self) {
        self.bomb = match self.planted.pop_front() {
            Some(tile) => tile,
            None => self.rng.pick(1, TOWER_TILES),
        };
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    fn current_payout(&self) -> Chips {
        (self.bet as f64 * self.multiplier).floor() as Chips
    }

    /// Pick `tile` on `level`. The level must be the current one so a stale
    /// click cannot land on the next floor.
    pub fn choose(&mut self, level: u8, tile: u8) -> GameResult<()> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if !(1..=TOWER_TILES).contains(&tile) {
            return Err(GameError::InvalidTile {
                got: tile,
                max: TOWER_TILES,
            });
        }
        if level != self.level {
            return Err(GameError::WrongLevel {
                current: self.level,
                got: level,
            });
        }

        if tile == self.bomb {
            self.status = GameStatus::Lost;
            self.payout = Some(0);
        } else if self.level >= TOWER_LEVELS {
            self.status = GameStatus::Won;
            self.payout = Some(self.current_payout());
        } else {
            self.level += 1;
            self.multiplier += TOWER_STEP;
            self.plant_bomb();
        }
        Ok(())
    }
}

impl Wager for Tower {
    fn kind(&self) -> GameKind {
        GameKind::Tower
    }

    fn bet(&self) -> Chips {
        self.bet
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn payout(&self) -> Option<Chips> {
        self.payout
    }

    fn play(&mut self, action: Move) -> GameResult<()> {
        match action {
            Move::Climb { level, tile } => self.choose(level, tile),
            other => Err(other.illegal_for(GameKind::Tower)),
        }
    }

    fn cash_out(&mut self) -> GameResult<Chips> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.level <= 1 {
            return Err(GameError::NothingToCashOut);
        }
        let payout = self.current_payout();
        self.status = GameStatus::Won;
        self.payout = Some(payout);
        Ok(payout)
    }

    fn view(&self) -> GameView {
        GameView {
            kind: GameKind::Tower,
            bet: self.bet,
            status: self.status,
            payout: self.payout,
            detail: GameDetail::Tower(TowerView {
                level: self.level,
                max_levels: TOWER_LEVELS,
                tiles: TOWER_TILES,
                multiplier: self.multiplier,
                potential_payout: self.current_payout(),
                bomb: self.is_over().then_some(self.bomb),
            }),
        }
    }
}
