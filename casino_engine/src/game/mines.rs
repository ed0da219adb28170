//! Mines: a 20-tile board with 1-10 hidden mines.
//!
//! Every safe reveal raises the multiplier by `mines / safe_tiles * 0.3`.
//! Hitting a mine forfeits the stake; cashing out pays
//! `floor(bet * multiplier)`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{
    GameKind, GameStatus, Move, Wager,
    constants::{MAX_MINES, MIN_MINES, MINES_BOARD_SIZE, MINES_RISK_FACTOR},
    entities::{Chips, check_stake},
    errors::{GameError, GameResult},
    rng::GameRng,
    view::{GameDetail, GameView},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevealOutcome {
    Safe,
    Mine,
    /// Tile already open or game already over; nothing changed.
    Ignored,
}

#[derive(Clone, Debug)]
pub struct Mines {
    bet: Chips,
    mine_count: u8,
    mines: BTreeSet<usize>,
    revealed: BTreeSet<usize>,
    detonated: Option<usize>,
    multiplier: f64,
    status: GameStatus,
    payout: Option<Chips>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MinesView {
    pub board_size: usize,
    pub mine_count: u8,
    pub revealed: Vec<usize>,
    pub multiplier: f64,
    /// What cashing out right now would pay.
    pub potential_payout: Chips,
    /// Mine positions, once the game is over.
    pub mines: Option<Vec<usize>>,
    pub detonated: Option<usize>,
}

fn validate_mine_count(mine_count: u8) -> GameResult<()> {
    if !(MIN_MINES..=MAX_MINES).contains(&mine_count) {
        return Err(GameError::InvalidMineCount {
            got: mine_count,
            min: MIN_MINES,
            max: MAX_MINES,
        });
    }
    Ok(())
}

impl Mines {
    pub fn new(bet: Chips, mine_count: u8, mut rng: GameRng) -> GameResult<Self> {
        check_stake(bet)?;
        validate_mine_count(mine_count)?;
        let mines = rng.sample_distinct(MINES_BOARD_SIZE, mine_count as usize);
        Ok(Self::build(bet, mine_count, mines))
    }

    /// Board with mines at fixed positions.
    pub fn with_mines(bet: Chips, mines: BTreeSet<usize>) -> GameResult<Self> {
        check_stake(bet)?;
        let mine_count = u8::try_from(mines.len()).unwrap_or(u8::MAX);
        validate_mine_count(mine_count)?;
        if let Some(&bad) = mines.iter().find(|&&p| p >= MINES_BOARD_SIZE) {
            return Err(GameError::InvalidPosition(bad));
        }
        Ok(Self::build(bet, mine_count, mines))
    }

    fn build(bet: Chips, mine_count: u8, mines: BTreeSet<usize>) -> Self {
        Self {
            bet,
            mine_count,
            mines,
            revealed: BTreeSet::new(),
            detonated: None,
            multiplier: 1.0,
            status: GameStatus::InProgress,
            payout: None,
        }
    }

    pub fn safe_tiles(&self) -> usize {
        MINES_BOARD_SIZE - self.mine_count as usize
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn revealed(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    pub fn reveal(&mut self, position: usize) -> GameResult<RevealOutcome> {
        if position >= MINES_BOARD_SIZE {
            return Err(GameError::InvalidPosition(position));
        }
        if self.is_over() || self.revealed.contains(&position) {
            return Ok(RevealOutcome::Ignored);
        }

        if self.mines.contains(&position) {
            self.detonated = Some(position);
            self.status = GameStatus::Lost;
            self.payout = Some(0);
            return Ok(RevealOutcome::Mine);
        }

        self.revealed.insert(position);
        let density = f64::from(self.mine_count) / self.safe_tiles() as f64;
        self.multiplier = 1.0 + self.revealed.len() as f64 * density * MINES_RISK_FACTOR;
        Ok(RevealOutcome::Safe)
    }

    fn current_payout(&self) -> Chips {
        (self.bet as f64 * self.multiplier).floor() as Chips
    }
}

impl Wager for Mines {
    fn kind(&self) -> GameKind {
        GameKind::Mines
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
            Move::Reveal { position } => self.reveal(position).map(|_| ()),
            other => Err(other.illegal_for(GameKind::Mines)),
        }
    }

    fn cash_out(&mut self) -> GameResult<Chips> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.revealed.is_empty() {
            return Err(GameError::NothingToCashOut);
        }
        let payout = self.current_payout();
        self.status = GameStatus::Won;
        self.payout = Some(payout);
        Ok(payout)
    }

    fn view(&self) -> GameView {
        GameView {
            kind: GameKind::Mines,
            bet: self.bet,
            status: self.status,
            payout: self.payout,
            detail: GameDetail::Mines(MinesView {
                board_size: MINES_BOARD_SIZE,
                mine_count: self.mine_count,
                revealed: self.revealed.iter().copied().collect(),
                multiplier: self.multiplier,
                potential_payout: self.current_payout(),
                mines: self
                    .is_over()
                    .then(|| self.mines.iter().copied().collect()),
                detonated: self.detonated,
            }),
        }
    }
}
