//! Rule-table constants for the house games.

use super::entities::Chips;

/// Largest stake any game accepts. Payout arithmetic up to `bet * 195`
/// stays within `Chips` below it.
pub const MAX_STAKE: Chips = Chips::MAX / 200;

/// Blackjack deals from a single deck, rebuilt once fewer than this many
/// cards remain.
pub const BLACKJACK_DECKS: u8 = 1;
pub const BLACKJACK_RESHUFFLE_BELOW: usize = 10;
pub const BLACKJACK: u8 = 21;
pub const DEALER_STANDS_ON: u8 = 17;

/// Baccarat deals from a six-deck shoe (312 cards).
pub const BACCARAT_DECKS: u8 = 6;

/// Mines board.
pub const MINES_BOARD_SIZE: usize = 20;
pub const MIN_MINES: u8 = 1;
pub const MAX_MINES: u8 = 10;
pub const MINES_RISK_FACTOR: f64 = 0.3;

/// Tower.
pub const TOWER_LEVELS: u8 = 10;
pub const TOWER_TILES: u8 = 3;
pub const TOWER_STEP: f64 = 0.5;

/// Wordle.
pub const WORDLE_MAX_GUESSES: usize = 5;
pub const WORDLE_MIN_LEN: u8 = 1;
pub const WORDLE_MAX_LEN: u8 = 5;
