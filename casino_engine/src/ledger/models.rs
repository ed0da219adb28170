//! Ledger data models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::Chips;

/// Account identifier. Persisted as the string key of the balance map.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AccountId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Standing of an account by balance.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceTier {
    Broke,
    Hustler,
    Comfortable,
    HighRoller,
    Tycoon,
}

impl BalanceTier {
    pub fn from_balance(balance: Chips) -> Self {
        match balance {
            b if b >= 50_000 => Self::Tycoon,
            b if b >= 25_000 => Self::HighRoller,
            b if b >= 10_000 => Self::Comfortable,
            b if b >= 1_000 => Self::Hustler,
            _ => Self::Broke,
        }
    }
}

impl fmt::Display for BalanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Broke => "broke",
            Self::Hustler => "hustler",
            Self::Comfortable => "comfortable",
            Self::HighRoller => "high roller",
            Self::Tycoon => "tycoon",
        };
        write!(f, "{repr}")
    }
}

/// One row of the leaderboard.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub account: AccountId,
    pub balance: Chips,
    /// Balance minus the starting balance.
    pub net_gain: Chips,
    pub tier: BalanceTier,
}

/// Balance overview for a single account.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AccountSummary {
    pub account: AccountId,
    pub balance: Chips,
    pub net_gain: Chips,
    pub tier: BalanceTier,
}
