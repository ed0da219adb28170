//! Single-deck Blackjack against a dealer who stands on 17.
//!
//! Payouts include the stake: a win pays 2x, a natural 2.5x (floored),
//! a push returns the bet and a loss pays nothing.

use serde::{Deserialize, Serialize};

use super::{
    GameKind, GameStatus, Move, Wager,
    constants::{BLACKJACK, BLACKJACK_DECKS, BLACKJACK_RESHUFFLE_BELOW, DEALER_STANDS_ON},
    entities::{ACE, Card, Chips, Shoe, check_stake},
    errors::{GameError, GameResult},
    rng::GameRng,
    view::{GameDetail, GameView},
};

/// Blackjack worth of a single card. Aces start at 11.
pub fn card_value(card: &Card) -> u8 {
    match card.0 {
        ACE => 11,
        v if v >= 10 => 10,
        v => v,
    }
}

/// Best total for a hand: aces count 11 and drop to 1, one at a time,
/// while the hand would otherwise bust.
pub fn hand_value(hand: &[Card]) -> u8 {
    let mut total: u32 = hand.iter().map(|c| u32::from(card_value(c))).sum();
    let mut soft_aces = hand.iter().filter(|c| c.is_ace()).count();
    while total > u32::from(BLACKJACK) && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    total.min(u32::from(u8::MAX)) as u8
}

#[derive(Clone, Debug)]
pub struct Blackjack {
    shoe: Shoe,
    rng: GameRng,
    player_hand: Vec<Card>,
    dealer_hand: Vec<Card>,
    bet: Chips,
    status: GameStatus,
    payout: Option<Chips>,
    natural: bool,
}

/// Player-facing snapshot. The dealer's first card stays face down until
/// the hand is over.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BlackjackView {
    pub player_hand: Vec<Card>,
    pub player_total: u8,
    pub dealer_hand: Vec<Card>,
    pub dealer_total: Option<u8>,
    pub dealer_hole_hidden: bool,
    pub natural: bool,
}

impl Blackjack {
    /// Deal a new hand from a freshly shuffled deck.
    pub fn new(bet: Chips, mut rng: GameRng) -> GameResult<Self> {
        let shoe = Shoe::new(BLACKJACK_DECKS, BLACKJACK_RESHUFFLE_BELOW, &mut rng);
        Self::with_shoe(bet, shoe, rng)
    }

    /// Deal from a prepared shoe: two cards to the player, then two to the
    /// dealer. A natural is settled immediately.
    pub fn with_shoe(bet: Chips, shoe: Shoe, rng: GameRng) -> GameResult<Self> {
        check_stake(bet)?;
        let mut game = Self {
            shoe,
            rng,
            player_hand: Vec::with_capacity(5),
            dealer_hand: Vec::with_capacity(5),
            bet,
            status: GameStatus::InProgress,
            payout: None,
            natural: false,
        };
        for _ in 0..2 {
            let card = game.deal()?;
            game.player_hand.push(card);
        }
        for _ in 0..2 {
            let card = game.deal()?;
            game.dealer_hand.push(card);
        }

        if hand_value(&game.player_hand) == BLACKJACK {
            game.natural = true;
            if hand_value(&game.dealer_hand) == BLACKJACK {
                game.finish(GameStatus::Push, bet);
            } else {
                game.finish(GameStatus::Won, bet * 5 / 2);
            }
        }
        Ok(game)
    }

    fn deal(&mut self) -> GameResult<Card> {
        self.shoe.deal_card(&mut self.rng)
    }

    fn finish(&mut self, status: GameStatus, payout: Chips) {
        self.status = status;
        self.payout = Some(payout);
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.player_hand
    }

    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer_hand
    }

    pub fn hit(&mut self) -> GameResult<()> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let card = self.deal()?;
        self.player_hand.push(card);

        match hand_value(&self.player_hand) {
            total if total > BLACKJACK => self.finish(GameStatus::Lost, 0),
            BLACKJACK => self.dealer_play()?,
            _ => {}
        }
        Ok(())
    }

    pub fn stand(&mut self) -> GameResult<()> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        self.dealer_play()
    }

    fn dealer_play(&mut self) -> GameResult<()> {
        while hand_value(&self.dealer_hand) < DEALER_STANDS_ON {
            let card = self.deal()?;
            self.dealer_hand.push(card);
        }

        let player = hand_value(&self.player_hand);
        let dealer = hand_value(&self.dealer_hand);
        if dealer > BLACKJACK || player > dealer {
            self.finish(GameStatus::Won, self.bet * 2);
        } else if player < dealer {
            self.finish(GameStatus::Lost, 0);
        } else {
            self.finish(GameStatus::Push, self.bet);
        }
        Ok(())
    }
}

impl Wager for Blackjack {
    fn kind(&self) -> GameKind {
        GameKind::Blackjack
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
            Move::Hit => self.hit(),
            Move::Stand => self.stand(),
            other => Err(other.illegal_for(GameKind::Blackjack)),
        }
    }

    fn cash_out(&mut self) -> GameResult<Chips> {
        Err(GameError::CashOutUnavailable(GameKind::Blackjack))
    }

    fn view(&self) -> GameView {
        let hidden = !self.is_over();
        let dealer_hand = if hidden {
            self.dealer_hand.iter().skip(1).copied().collect()
        } else {
            self.dealer_hand.clone()
        };
        GameView {
            kind: GameKind::Blackjack,
            bet: self.bet,
            status: self.status,
            payout: self.payout,
            detail: GameDetail::Blackjack(BlackjackView {
                player_hand: self.player_hand.clone(),
                player_total: hand_value(&self.player_hand),
                dealer_hand,
                dealer_total: (!hidden).then(|| hand_value(&self.dealer_hand)),
                dealer_hole_hidden: hidden,
                natural: self.natural,
            }),
        }
    }
}
