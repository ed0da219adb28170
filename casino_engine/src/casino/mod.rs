//! Casino module: the single API the command layer talks to.
//!
//! This module implements:
//! - Opening games with the stake debited atomically
//! - Routing moves and cash outs to the owning session
//! - Settling finished games against the ledger exactly once
//! - Balance, account summary and leaderboard queries
//! - Background eviction of timed-out sessions
//!
//! ## Example
//!
//! ```no_run
//! use casino_engine::{
//!     casino::{Casino, CasinoConfig},
//!     game::{GameKind, GameParams, Move},
//!     ledger::{AccountId, Ledger},
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = Arc::new(Ledger::open("player_balances.json", 10_000));
//!     let casino = Casino::new(ledger, CasinoConfig::default());
//!     let player = AccountId::from(42u64);
//!
//!     casino.start_game(&player, GameParams::Tower { bet: 100 }).await?;
//!     let outcome = casino
//!         .apply_move(&player, GameKind::Tower, Move::Climb { level: 1, tile: 2 })
//!         .await?;
//!     if outcome.settlement.is_none() {
//!         let settlement = casino.cash_out(&player, GameKind::Tower).await?;
//!         println!("Paid {} chips", settlement.payout);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod manager;
pub mod models;

pub use config::{BetLimits, CasinoConfig};
pub use errors::{CasinoError, CasinoResult};
pub use manager::Casino;
pub use models::{MoveOutcome, Settlement, StartedGame};
