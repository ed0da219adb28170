//! Punto banco from a six-deck shoe, resolved in one step when the game
//! opens. The player only picks a side.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    GameKind, GameStatus, Move, Wager,
    constants::BACCARAT_DECKS,
    entities::{ACE, Card, Chips, Shoe, check_stake},
    errors::{GameError, GameResult},
    rng::GameRng,
    view::{GameDetail, GameView},
};

/// Which hand a bet backs, and which hand won.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BaccaratSide {
    Player,
    Banker,
    Tie,
}

impl fmt::Display for BaccaratSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Player => "player",
            Self::Banker => "banker",
            Self::Tie => "tie",
        };
        write!(f, "{repr}")
    }
}

/// Baccarat point value: ace is 1, tens and faces are 0.
pub fn point_value(card: &Card) -> u8 {
    match card.0 {
        ACE => 1,
        v if v >= 10 => 0,
        v => v,
    }
}

pub fn score(hand: &[Card]) -> u8 {
    let total: u32 = hand.iter().map(|c| u32::from(point_value(c))).sum();
    (total % 10) as u8
}

fn is_natural(score: u8) -> bool {
    score >= 8
}

/// Player draws on 0-5 and stands on 6-7.
pub fn player_draws(player_score: u8) -> bool {
    player_score <= 5
}

/// Third-card rule for the banker, keyed on the banker's score and the
/// value of the player's third card (if the player drew one).
pub fn banker_draws(banker_score: u8, player_third: Option<u8>) -> bool {
    match player_third {
        None => banker_score <= 5,
        Some(v) => match banker_score {
            0..=2 => true,
            3 => v != 8,
            4 => (2..=7).contains(&v),
            5 => (4..=7).contains(&v),
            6 => v == 6 || v == 7,
            _ => false,
        },
    }
}

/// Chips owed for `side` given the `outcome`, stake included. A losing
/// side pays nothing, including player/banker bets on a tie.
pub fn side_payout(bet: Chips, side: BaccaratSide, outcome: BaccaratSide) -> Chips {
    if side != outcome {
        return 0;
    }
    match side {
        BaccaratSide::Player => bet * 2,
        BaccaratSide::Banker => bet * 195 / 100,
        BaccaratSide::Tie => bet * 9,
    }
}

#[derive(Clone, Debug)]
pub struct Baccarat {
    player_hand: Vec<Card>,
    banker_hand: Vec<Card>,
    bet: Chips,
    side: BaccaratSide,
    outcome: BaccaratSide,
    payout: Chips,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BaccaratView {
    pub player_hand: Vec<Card>,
    pub player_score: u8,
    pub banker_hand: Vec<Card>,
    pub banker_score: u8,
    pub side: BaccaratSide,
    pub outcome: BaccaratSide,
}

impl Baccarat {
    pub fn new(bet: Chips, side: BaccaratSide, mut rng: GameRng) -> GameResult<Self> {
        let mut shoe = Shoe::new(BACCARAT_DECKS, 0, &mut rng);
        Self::with_shoe(bet, side, &mut shoe, &mut rng)
    }

    /// Play a full coup from `shoe`. Cards go player, player, banker,
    /// banker, then third cards as the drawing rules require.
    pub fn with_shoe(
        bet: Chips,
        side: BaccaratSide,
        shoe: &mut Shoe,
        rng: &mut GameRng,
    ) -> GameResult<Self> {
        check_stake(bet)?;
        let mut player_hand = Vec::with_capacity(3);
        let mut banker_hand = Vec::with_capacity(3);
        player_hand.push(shoe.deal_card(rng)?);
        player_hand.push(shoe.deal_card(rng)?);
        banker_hand.push(shoe.deal_card(rng)?);
        banker_hand.push(shoe.deal_card(rng)?);

        let player_natural = score(&player_hand);
        let banker_natural = score(&banker_hand);
        if !is_natural(player_natural) && !is_natural(banker_natural) {
            let mut player_third = None;
            if player_draws(player_natural) {
                let card = shoe.deal_card(rng)?;
                player_third = Some(point_value(&card));
                player_hand.push(card);
            }
            if banker_draws(banker_natural, player_third) {
                banker_hand.push(shoe.deal_card(rng)?);
            }
        }

        let (p, b) = (score(&player_hand), score(&banker_hand));
        let outcome = if p > b {
            BaccaratSide::Player
        } else if b > p {
            BaccaratSide::Banker
        } else {
            BaccaratSide::Tie
        };

        Ok(Self {
            player_hand,
            banker_hand,
            bet,
            side,
            outcome,
            payout: side_payout(bet, side, outcome),
        })
    }

    pub fn outcome(&self) -> BaccaratSide {
        self.outcome
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.player_hand
    }

    pub fn banker_hand(&self) -> &[Card] {
        &self.banker_hand
    }
}

impl Wager for Baccarat {
    fn kind(&self) -> GameKind {
        GameKind::Baccarat
    }

    fn bet(&self) -> Chips {
        self.bet
    }

    fn status(&self) -> GameStatus {
        if self.payout > 0 {
            GameStatus::Won
        } else {
            GameStatus::Lost
        }
    }

    fn payout(&self) -> Option<Chips> {
        Some(self.payout)
    }

    fn play(&mut self, _action: Move) -> GameResult<()> {
        Err(GameError::GameOver)
    }

    fn cash_out(&mut self) -> GameResult<Chips> {
        Err(GameError::CashOutUnavailable(GameKind::Baccarat))
    }

    fn view(&self) -> GameView {
        GameView {
            kind: GameKind::Baccarat,
            bet: self.bet,
            status: self.status(),
            payout: Some(self.payout),
            detail: GameDetail::Baccarat(BaccaratView {
                player_hand: self.player_hand.clone(),
                player_score: score(&self.player_hand),
                banker_hand: self.banker_hand.clone(),
                banker_score: score(&self.banker_hand),
                side: self.side,
                outcome: self.outcome,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        constants::MAX_STAKE,
        entities::{JACK, KING, QUEEN, Suit},
    };

    fn c(value: u8) -> Card {
        Card(value, Suit::Heart)
    }

    fn coup(bet: Chips, side: BaccaratSide, cards: &[u8]) -> Baccarat {
        let mut shoe = Shoe::stacked(cards.iter().map(|&v| c(v)).collect());
        Baccarat::with_shoe(bet, side, &mut shoe, &mut GameRng::seeded(0)).unwrap()
    }

    #[test]
    fn test_largest_stake_pays_without_overflow() {
        let tie = coup(MAX_STAKE, BaccaratSide::Tie, &[9, KING, 9, KING]);
        assert_eq!(tie.payout(), Some(MAX_STAKE * 9));
        let banker = coup(MAX_STAKE, BaccaratSide::Banker, &[2, 3, 9, KING]);
        assert_eq!(banker.payout(), Some(MAX_STAKE * 195 / 100));

        let mut shoe = Shoe::stacked(vec![c(9), c(KING), c(9), c(KING)]);
        let err = Baccarat::with_shoe(
            MAX_STAKE + 1,
            BaccaratSide::Tie,
            &mut shoe,
            &mut GameRng::seeded(0),
        )
        .unwrap_err();
        assert!(matches!(err, GameError::BetTooLarge { .. }));
    }

    #[test]
    fn test_point_values() {
        assert_eq!(point_value(&c(ACE)), 1);
        assert_eq!(point_value(&c(9)), 9);
        for v in [10, JACK, QUEEN, KING] {
            assert_eq!(point_value(&c(v)), 0);
        }
    }

    #[test]
    fn test_score_is_mod_ten() {
        assert_eq!(score(&[c(7), c(8)]), 5);
        assert_eq!(score(&[c(KING), c(9)]), 9);
        assert_eq!(score(&[c(5), c(5)]), 0);
    }

    #[test]
    fn test_player_draws_rule() {
        assert!(player_draws(0));
        assert!(player_draws(5));
        assert!(!player_draws(6));
        assert!(!player_draws(7));
    }

    #[test]
    fn test_banker_draws_without_player_third() {
        assert!(banker_draws(5, None));
        assert!(!banker_draws(6, None));
        assert!(!banker_draws(7, None));
    }

    #[test]
    fn test_banker_third_card_table() {
        assert!(banker_draws(2, Some(8)));
        assert!(banker_draws(3, Some(9)));
        assert!(!banker_draws(3, Some(8)));
        assert!(banker_draws(4, Some(2)));
        assert!(!banker_draws(4, Some(1)));
        assert!(!banker_draws(4, Some(8)));
        assert!(banker_draws(5, Some(4)));
        assert!(!banker_draws(5, Some(3)));
        assert!(banker_draws(6, Some(6)));
        assert!(!banker_draws(6, Some(5)));
        assert!(!banker_draws(7, Some(6)));
    }

    #[test]
    fn test_player_natural_nine_halts() {
        // Player 9 (K, 9) vs banker 6 (3, 3): nobody draws.
        let game = coup(100, BaccaratSide::Player, &[KING, 9, 3, 3]);
        assert_eq!(game.player_hand().len(), 2);
        assert_eq!(game.banker_hand().len(), 2);
        assert_eq!(game.outcome(), BaccaratSide::Player);
        assert_eq!(game.payout(), Some(200));
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_banker_natural_eight_halts() {
        let game = coup(100, BaccaratSide::Player, &[2, 2, 4, 4]);
        assert_eq!(game.player_hand().len(), 2);
        assert_eq!(game.outcome(), BaccaratSide::Banker);
        assert_eq!(game.payout(), Some(0));
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn test_banker_pays_one_ninety_five() {
        let game = coup(100, BaccaratSide::Banker, &[2, 2, 4, 4]);
        assert_eq!(game.payout(), Some(195));

        let odd = coup(101, BaccaratSide::Banker, &[2, 2, 4, 4]);
        assert_eq!(odd.payout(), Some(196));
    }

    #[test]
    fn test_tie_pays_nine_and_sides_lose() {
        let tie = coup(100, BaccaratSide::Tie, &[KING, 8, QUEEN, 8]);
        assert_eq!(tie.outcome(), BaccaratSide::Tie);
        assert_eq!(tie.payout(), Some(900));

        let player = coup(100, BaccaratSide::Player, &[KING, 8, QUEEN, 8]);
        assert_eq!(player.payout(), Some(0));
    }

    #[test]
    fn test_third_card_sequence() {
        // Player 2+3=5 draws a 4 -> 9. Banker 2+2=4 with player third 4 draws a 10 -> 4.
        let game = coup(100, BaccaratSide::Player, &[2, 3, 2, 2, 4, 10]);
        assert_eq!(game.player_hand().len(), 3);
        assert_eq!(game.banker_hand().len(), 3);
        assert_eq!(score(game.player_hand()), 9);
        assert_eq!(score(game.banker_hand()), 4);
        assert_eq!(game.outcome(), BaccaratSide::Player);
    }

    #[test]
    fn test_player_stands_banker_draws_on_five() {
        // Player 3+3=6 stands; banker 2+3=5 draws a 2 -> 7.
        let game = coup(100, BaccaratSide::Banker, &[3, 3, 2, 3, 2]);
        assert_eq!(game.player_hand().len(), 2);
        assert_eq!(game.banker_hand().len(), 3);
        assert_eq!(game.outcome(), BaccaratSide::Banker);
    }

    #[test]
    fn test_random_coup_is_resolved() {
        let mut game = Baccarat::new(100, BaccaratSide::Tie, GameRng::seeded(12)).unwrap();
        assert!(game.is_over());
        assert!(game.payout().is_some());
        assert_eq!(game.play(Move::Hit), Err(GameError::GameOver));
    }
}
