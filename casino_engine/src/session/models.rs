//! Session data models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration as StdDuration};
use uuid::Uuid;

use crate::{
    game::{GameKind, GameState, Wager},
    ledger::AccountId,
};

/// Session ID type
pub type SessionId = Uuid;

/// Registry key: one session per owner and game kind.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SessionKey {
    pub owner: AccountId,
    pub kind: GameKind,
}

impl SessionKey {
    pub fn new(owner: AccountId, kind: GameKind) -> Self {
        Self { owner, kind }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.kind)
    }
}

/// Inactivity timeout per game kind.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionTimeouts {
    pub blackjack: StdDuration,
    pub baccarat: StdDuration,
    pub mines: StdDuration,
    pub tower: StdDuration,
    pub wordle: StdDuration,
}

impl SessionTimeouts {
    pub fn for_kind(&self, kind: GameKind) -> StdDuration {
        match kind {
            GameKind::Blackjack => self.blackjack,
            GameKind::Baccarat => self.baccarat,
            GameKind::Mines => self.mines,
            GameKind::Tower => self.tower,
            GameKind::Wordle => self.wordle,
        }
    }

    /// Same timeout for every kind.
    pub fn uniform(timeout: StdDuration) -> Self {
        Self {
            blackjack: timeout,
            baccarat: timeout,
            mines: timeout,
            tower: timeout,
            wordle: timeout,
        }
    }
}

impl Default for SessionTimeouts {
    fn default() -> Self {
        Self {
            blackjack: StdDuration::from_secs(120),
            baccarat: StdDuration::from_secs(120),
            mines: StdDuration::from_secs(300),
            tower: StdDuration::from_secs(300),
            wordle: StdDuration::from_secs(300),
        }
    }
}

/// One open game owned by the registry.
#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub owner: AccountId,
    pub kind: GameKind,
    pub state: GameState,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    ttl: Duration,
    /// Payout has been credited.
    pub(crate) settled: bool,
    /// Removed from the registry; holders of a stale handle must not use it.
    pub(crate) closed: bool,
}

impl Session {
    pub fn new(owner: AccountId, kind: GameKind, state: GameState, ttl: StdDuration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or(Duration::MAX);
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner,
            kind,
            state,
            created_at,
            expires_at: created_at.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            ttl,
            settled: false,
            closed: false,
        }
    }

    pub fn key(&self) -> SessionKey {
        SessionKey::new(self.owner.clone(), self.kind)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Push the expiry out by a full timeout from `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
    }

    /// Finished with winnings that have not been credited yet.
    pub fn owes_payout(&self) -> bool {
        !self.settled && self.state.is_over() && self.state.payout().is_some_and(|p| p > 0)
    }

    /// Whether the registry may drop this session. A session that owes a
    /// payout never times out; only an unfinished game's stake is forfeited.
    pub fn is_evictable(&self, now: DateTime<Utc>) -> bool {
        self.closed || (self.is_expired(now) && !self.owes_payout())
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
