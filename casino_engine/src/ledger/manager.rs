//! Ledger manager: the single authority over account balances.

use log::{error, info};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

use super::{
    errors::{LedgerError, LedgerResult},
    models::{AccountId, AccountSummary, BalanceTier, LeaderboardEntry},
    store::{BalanceStore, Balances, JsonFileStore, MemoryStore},
};
use crate::game::Chips;

/// Balance ledger.
///
/// One lock guards the cached balance map for the whole read, mutate and
/// persist sequence, so concurrent updates never lose writes. The cache is
/// only replaced after the store accepted the new map.
pub struct Ledger {
    store: Arc<dyn BalanceStore>,
    starting_balance: Chips,
    cache: Mutex<Option<Balances>>,
}

impl Ledger {
    /// Create a new ledger
    ///
    /// # Arguments
    ///
    /// * `store` - Backing store for the balance map
    /// * `starting_balance` - Balance given to accounts on first access
    pub fn new(store: Arc<dyn BalanceStore>, starting_balance: Chips) -> Self {
        Self {
            store,
            starting_balance,
            cache: Mutex::new(None),
        }
    }

    /// Ledger persisted to a JSON file at `path`.
    pub fn open(path: impl Into<PathBuf>, starting_balance: Chips) -> Self {
        Self::new(Arc::new(JsonFileStore::new(path)), starting_balance)
    }

    /// Ledger that lives only in memory.
    pub fn in_memory(starting_balance: Chips) -> Self {
        Self::new(Arc::new(MemoryStore::new()), starting_balance)
    }

    pub fn starting_balance(&self) -> Chips {
        self.starting_balance
    }

    async fn loaded<'a>(&self, slot: &'a mut Option<Balances>) -> LedgerResult<&'a mut Balances> {
        if slot.is_none() {
            let balances = self.store.load().await?;
            info!("Loaded {} account balances", balances.len());
            *slot = Some(balances);
        }
        Ok(slot.get_or_insert_with(Balances::new))
    }

    async fn commit(&self, cache: &mut Balances, next: Balances) -> LedgerResult<()> {
        if let Err(e) = self.store.save(&next).await {
            error!("Failed to persist balances: {e}");
            return Err(e);
        }
        *cache = next;
        Ok(())
    }

    /// Get the balance for an account, opening it at the starting balance
    /// if it has never been seen.
    ///
    /// # Errors
    ///
    /// * `LedgerError::Io` / `LedgerError::Corrupt` - Store could not be read
    ///   or the new account could not be persisted
    pub async fn get_balance(&self, id: &AccountId) -> LedgerResult<Chips> {
        let mut guard = self.cache.lock().await;
        let cache = self.loaded(&mut guard).await?;
        if let Some(&balance) = cache.get(id.as_str()) {
            return Ok(balance);
        }

        let mut next = cache.clone();
        next.insert(id.to_string(), self.starting_balance);
        self.commit(cache, next).await?;
        info!("Opened account {id} with {} chips", self.starting_balance);
        Ok(self.starting_balance)
    }

    /// Apply `delta` to an account and return the new balance.
    ///
    /// A delta that would leave the balance below zero is rejected with
    /// `InsufficientFunds` and nothing is written.
    pub async fn update_balance(&self, id: &AccountId, delta: Chips) -> LedgerResult<Chips> {
        let mut guard = self.cache.lock().await;
        let cache = self.loaded(&mut guard).await?;
        let current = cache
            .get(id.as_str())
            .copied()
            .unwrap_or(self.starting_balance);
        let balance = current
            .checked_add(delta)
            .ok_or(LedgerError::BalanceOverflow)?;
        if balance < 0 {
            return Err(LedgerError::InsufficientFunds {
                available: current,
                required: delta.saturating_neg(),
            });
        }

        let mut next = cache.clone();
        next.insert(id.to_string(), balance);
        self.commit(cache, next).await?;
        Ok(balance)
    }

    /// Whether the account holds at least `amount`.
    ///
    /// Only a snapshot: use [`Ledger::debit`] to check and deduct in one step.
    pub async fn can_afford(&self, id: &AccountId, amount: Chips) -> LedgerResult<bool> {
        Ok(self.get_balance(id).await? >= amount)
    }

    /// Deduct `amount` if the account can afford it.
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidAmount` - Amount is not positive
    /// * `LedgerError::InsufficientFunds` - Balance below `amount`; nothing written
    pub async fn debit(&self, id: &AccountId, amount: Chips) -> LedgerResult<Chips> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.update_balance(id, -amount).await
    }

    /// Add `amount` to the account.
    pub async fn credit(&self, id: &AccountId, amount: Chips) -> LedgerResult<Chips> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.update_balance(id, amount).await
    }

    /// Top `limit` accounts by balance, ties ordered by account id.
    pub async fn leaderboard(&self, limit: usize) -> LedgerResult<Vec<LeaderboardEntry>> {
        let mut guard = self.cache.lock().await;
        let cache = self.loaded(&mut guard).await?;

        let mut rows: Vec<(&String, Chips)> = cache.iter().map(|(id, &b)| (id, b)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        Ok(rows
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, (id, balance))| LeaderboardEntry {
                rank: i + 1,
                account: AccountId::new(id.as_str()),
                balance,
                net_gain: balance - self.starting_balance,
                tier: BalanceTier::from_balance(balance),
            })
            .collect())
    }

    /// Balance, tier and net gain for one account.
    pub async fn account_summary(&self, id: &AccountId) -> LedgerResult<AccountSummary> {
        let balance = self.get_balance(id).await?;
        Ok(AccountSummary {
            account: id.clone(),
            balance,
            net_gain: balance - self.starting_balance,
            tier: BalanceTier::from_balance(balance),
        })
    }

    /// Number of accounts ever opened.
    pub async fn account_count(&self) -> LedgerResult<usize> {
        let mut guard = self.cache.lock().await;
        Ok(self.loaded(&mut guard).await?.len())
    }

    /// Sum of every balance.
    ///
    /// # Errors
    ///
    /// * `LedgerError::BalanceOverflow` - The sum does not fit in `Chips`
    pub async fn total_chips(&self) -> LedgerResult<Chips> {
        let mut guard = self.cache.lock().await;
        self.loaded(&mut guard)
            .await?
            .values()
            .try_fold(0 as Chips, |total, &balance| total.checked_add(balance))
            .ok_or(LedgerError::BalanceOverflow)
    }
}
