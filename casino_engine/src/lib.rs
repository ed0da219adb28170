//! # Casino Engine
//!
//! The wagering core of a shared-economy game server: many players hold a
//! persistent chip balance and play short games against house rules.
//!
//! The engine is split leaf-first:
//!
//! - **Ledger**: persistent balances with atomic debit and credit
//! - **Game engines**: Blackjack, Baccarat, Mines, Tower and Wordle as pure
//!   state machines behind the [`Wager`] trait, dispatched with
//!   `enum_dispatch` through [`GameState`]
//! - **Session registry**: at most one open game per player and kind, with
//!   inactivity expiry
//! - **Casino**: the façade that ties the three together
//!
//! ## Core Modules
//!
//! - [`ledger`]: Balance store, leaderboard and tiers
//! - [`game`]: Cards, RNG, rule tables, engines and views
//! - [`session`]: Session lifetime and locking
//! - [`casino`]: Orchestration, configuration and the error taxonomy
//!
//! ## Example
//!
//! ```
//! use casino_engine::game::{GameRng, Tower, Wager, Move};
//!
//! let mut tower = Tower::with_bombs(100, vec![3], GameRng::seeded(1)).unwrap();
//! tower.play(Move::Climb { level: 1, tile: 1 }).unwrap();
//! assert_eq!(tower.level(), 2);
//! ```

/// Game orchestration over the ledger and sessions.
pub mod casino;
pub use casino::{Casino, CasinoConfig, CasinoError, CasinoResult};

/// Engines, cards and randomness.
pub mod game;
pub use game::{GameKind, GameParams, GameState, GameStatus, GameView, Move, Wager};

/// Persistent chip balances.
pub mod ledger;
pub use ledger::{AccountId, Ledger};

/// Open game sessions.
pub mod session;
pub use session::SessionRegistry;
