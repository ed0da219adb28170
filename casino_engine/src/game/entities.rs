use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    constants::MAX_STAKE,
    errors::{GameError, GameResult},
    rng::GameRng,
};

/// Type alias for whole chips. Balances, bets and payouts are all whole
/// chips; fractional multipliers are floored when a payout is computed.
pub type Chips = i64;

/// Reject a stake too large for the payout tables.
pub fn check_stake(bet: Chips) -> GameResult<()> {
    if bet > MAX_STAKE {
        return Err(GameError::BetTooLarge {
            bet,
            max: MAX_STAKE,
        });
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card ranks (ace=1u8 ... king=13u8).
pub type Value = u8;

pub const ACE: Value = 1;
pub const JACK: Value = 11;
pub const QUEEN: Value = 12;
pub const KING: Value = 13;

/// A card is a tuple of a rank (ace=1u8 ... king=13u8) and a suit.
/// How much a rank is worth depends on the game being played.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl Card {
    pub fn is_ace(&self) -> bool {
        self.0 == ACE
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            ACE => "A",
            JACK => "J",
            QUEEN => "Q",
            KING => "K",
            v => &v.to_string(),
        };
        let repr = format!("{value}/{}", self.1);
        write!(f, "{repr:>4}")
    }
}

/// Build `decks` unshuffled standard 52-card decks.
pub fn standard_cards(decks: u8) -> Vec<Card> {
    let mut cards = Vec::with_capacity(52 * decks as usize);
    for _ in 0..decks {
        for suit in Suit::ALL {
            for value in ACE..=KING {
                cards.push(Card(value, suit));
            }
        }
    }
    cards
}

/// A multi-deck pool of cards dealt from the top.
///
/// A shoe built with [`Shoe::new`] refills itself with fresh, shuffled
/// decks once fewer than `reshuffle_below` cards remain (an empty shoe is
/// always refilled). A stacked shoe never refills: it deals exactly the
/// cards it was given and then fails with [`GameError::EmptyShoe`].
#[derive(Clone, Debug)]
pub struct Shoe {
    /// Remaining cards; the next card dealt is the last element.
    cards: Vec<Card>,
    decks: u8,
    reshuffle_below: usize,
    refill: bool,
}

impl Shoe {
    pub fn new(decks: u8, reshuffle_below: usize, rng: &mut GameRng) -> Self {
        let mut shoe = Self {
            cards: Vec::new(),
            decks,
            reshuffle_below,
            refill: true,
        };
        shoe.reshuffle(rng);
        shoe
    }

    /// A shoe that deals `cards` in the given order.
    pub fn stacked(cards: Vec<Card>) -> Self {
        let mut cards = cards;
        cards.reverse();
        Self {
            cards,
            decks: 0,
            reshuffle_below: 0,
            refill: false,
        }
    }

    pub fn reshuffle(&mut self, rng: &mut GameRng) {
        self.cards = standard_cards(self.decks);
        rng.shuffle(&mut self.cards);
    }

    pub fn deal_card(&mut self, rng: &mut GameRng) -> GameResult<Card> {
        if self.refill && self.cards.len() < self.reshuffle_below.max(1) {
            self.reshuffle(rng);
        }
        self.cards.pop().ok_or(GameError::EmptyShoe)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
