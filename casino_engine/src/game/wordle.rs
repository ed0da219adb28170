//! Wordle over random letter strings.
//!
//! The target is 1-5 uniformly random letters, not a dictionary word. The
//! player has five guesses; nothing is staked.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    GameKind, GameStatus, Move, Wager,
    constants::{WORDLE_MAX_GUESSES, WORDLE_MAX_LEN, WORDLE_MIN_LEN},
    entities::Chips,
    errors::{GameError, GameResult},
    rng::GameRng,
    view::{GameDetail, GameView},
};

/// Match status of one guessed letter. Ordered worst to best.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterStatus {
    Absent,
    Present,
    Correct,
}

/// Score `guess` against `target` (both uppercase, equal length).
///
/// Exact matches are taken first and consumed; remaining guess letters are
/// then matched left to right against whatever target letters are left.
pub fn score_guess(target: &str, guess: &str) -> Vec<LetterStatus> {
    let mut remaining: Vec<Option<char>> = target.chars().map(Some).collect();
    let guess: Vec<char> = guess.chars().collect();
    let mut result = vec![LetterStatus::Absent; guess.len()];

    for (i, &letter) in guess.iter().enumerate() {
        if remaining.get(i).copied().flatten() == Some(letter) {
            result[i] = LetterStatus::Correct;
            remaining[i] = None;
        }
    }
    for (i, &letter) in guess.iter().enumerate() {
        if result[i] == LetterStatus::Correct {
            continue;
        }
        if let Some(slot) = remaining.iter_mut().find(|slot| **slot == Some(letter)) {
            result[i] = LetterStatus::Present;
            *slot = None;
        }
    }
    result
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ScoredGuess {
    pub word: String,
    pub result: Vec<LetterStatus>,
}

#[derive(Clone, Debug)]
pub struct Wordle {
    target: String,
    guesses: Vec<ScoredGuess>,
    rng: GameRng,
    status: GameStatus,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct WordleView {
    pub word_len: usize,
    pub guesses: Vec<ScoredGuess>,
    pub remaining_guesses: usize,
    /// Best status seen for every guessed letter.
    pub hints: BTreeMap<char, LetterStatus>,
    /// The target, once the game is over.
    pub target: Option<String>,
}

impl Wordle {
    pub fn new(mut rng: GameRng) -> Self {
        let target = Self::random_target(&mut rng);
        Self::build(target, rng)
    }

    /// Game against a known target. The target is upper-cased.
    pub fn with_target(target: &str, rng: GameRng) -> Self {
        Self::build(target.to_ascii_uppercase(), rng)
    }

    fn build(target: String, rng: GameRng) -> Self {
        Self {
            target,
            guesses: Vec::with_capacity(WORDLE_MAX_GUESSES),
            rng,
            status: GameStatus::InProgress,
        }
    }

    fn random_target(rng: &mut GameRng) -> String {
        let len = rng.pick(WORDLE_MIN_LEN, WORDLE_MAX_LEN);
        (0..len).map(|_| rng.letter()).collect()
    }

    pub fn word_len(&self) -> usize {
        self.target.chars().count()
    }

    pub fn guesses(&self) -> &[ScoredGuess] {
        &self.guesses
    }

    pub fn guess(&mut self, word: &str) -> GameResult<Vec<LetterStatus>> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let word = word.trim();
        let len = word.chars().count();
        if len != self.word_len() {
            return Err(GameError::GuessLength {
                expected: self.word_len(),
                got: len,
            });
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GameError::NonAlphabeticGuess);
        }
        let word = word.to_ascii_uppercase();
        if self.guesses.iter().any(|g| g.word == word) {
            return Err(GameError::DuplicateGuess(word));
        }

        let result = score_guess(&self.target, &word);
        if word == self.target {
            self.status = GameStatus::Won;
        } else if self.guesses.len() + 1 >= WORDLE_MAX_GUESSES {
            self.status = GameStatus::Lost;
        }
        self.guesses.push(ScoredGuess {
            word,
            result: result.clone(),
        });
        Ok(result)
    }

    /// Throw away the current word and guesses and draw a fresh target.
    pub fn new_word(&mut self) {
        self.target = Self::random_target(&mut self.rng);
        self.guesses.clear();
        self.status = GameStatus::InProgress;
    }

    pub fn hints(&self) -> BTreeMap<char, LetterStatus> {
        let mut hints = BTreeMap::new();
        for guess in &self.guesses {
            for (letter, &status) in guess.word.chars().zip(&guess.result) {
                let best = hints.entry(letter).or_insert(status);
                if status > *best {
                    *best = status;
                }
            }
        }
        hints
    }
}

impl Wager for Wordle {
    fn kind(&self) -> GameKind {
        GameKind::Wordle
    }

    fn bet(&self) -> Chips {
        0
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn payout(&self) -> Option<Chips> {
        self.is_over().then_some(0)
    }

    fn play(&mut self, action: Move) -> GameResult<()> {
        match action {
            Move::Guess { word } => self.guess(&word).map(|_| ()),
            Move::NewWord => {
                self.new_word();
                Ok(())
            }
            other => Err(other.illegal_for(GameKind::Wordle)),
        }
    }

    fn cash_out(&mut self) -> GameResult<Chips> {
        Err(GameError::CashOutUnavailable(GameKind::Wordle))
    }

    fn view(&self) -> GameView {
        GameView {
            kind: GameKind::Wordle,
            bet: 0,
            status: self.status,
            payout: self.payout(),
            detail: GameDetail::Wordle(WordleView {
                word_len: self.word_len(),
                guesses: self.guesses.clone(),
                remaining_guesses: WORDLE_MAX_GUESSES - self.guesses.len(),
                hints: self.hints(),
                target: self.is_over().then(|| self.target.clone()),
            }),
        }
    }
}
