//! Ledger module providing persistent chip balances.
//!
//! This module implements:
//! - Lazy account creation at a fixed starting balance
//! - Atomic read-modify-persist balance updates under a single lock
//! - Debit/credit primitives that never let a balance go negative
//! - Pluggable backing stores (flat JSON file, in-memory)
//! - Leaderboard snapshots with balance tiers
//!
//! ## Example
//!
//! ```no_run
//! use casino_engine::ledger::{AccountId, Ledger};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = Ledger::open("player_balances.json", 10_000);
//!     let player = AccountId::from(42u64);
//!
//!     let balance = ledger.debit(&player, 100).await?;
//!     println!("Balance after stake: {balance}");
//!
//!     for entry in ledger.leaderboard(10).await? {
//!         println!("#{} {} {}", entry.rank, entry.account, entry.balance);
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod store;

pub use errors::{LedgerError, LedgerResult};
pub use manager::Ledger;
pub use models::{AccountId, AccountSummary, BalanceTier, LeaderboardEntry};
pub use store::{BalanceStore, Balances, JsonFileStore, MemoryStore};
