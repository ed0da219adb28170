//! Session registry: the one open game per owner and kind.

use chrono::Utc;
use log::{debug, info};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use super::{
    errors::{SessionError, SessionResult},
    models::{Session, SessionKey, SessionTimeouts},
};
use crate::{
    game::{GameKind, GameResult, GameState},
    ledger::AccountId,
};

/// Exclusive handle on a live session. Held for the duration of one
/// operation; other operations on the same key wait for it.
pub type SessionGuard = OwnedMutexGuard<Session>;

type SessionCell = Arc<Mutex<Session>>;

/// In-memory index of open sessions.
///
/// The map lock is only held for lookups and inserts; game work happens
/// under the per-session lock so different sessions never block each other.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionKey, SessionCell>>,
    timeouts: SessionTimeouts,
}

impl SessionRegistry {
    pub fn new(timeouts: SessionTimeouts) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            timeouts,
        }
    }

    pub fn timeouts(&self) -> &SessionTimeouts {
        &self.timeouts
    }

    /// Open a session for `owner` built by `factory`.
    ///
    /// The conflict check and the insert happen under one write lock. An
    /// expired or closed session in the slot is replaced; a live one, one
    /// still owing a payout, or one busy with another operation is a
    /// conflict.
    ///
    /// # Errors
    ///
    /// * `SessionError::Conflict` - A session of this kind is already open
    /// * `SessionError::Game` - `factory` rejected the parameters
    pub async fn start<F>(
        &self,
        owner: &AccountId,
        kind: GameKind,
        factory: F,
    ) -> SessionResult<SessionGuard>
    where
        F: FnOnce() -> GameResult<GameState>,
    {
        let key = SessionKey::new(owner.clone(), kind);
        let mut sessions = self.sessions.write().await;

        if let Some(existing) = sessions.get(&key) {
            match existing.try_lock() {
                Ok(mut stale) if stale.is_evictable(Utc::now()) => {
                    stale.closed = true;
                    debug!("Replacing stale session {}", stale.id);
                }
                _ => return Err(SessionError::Conflict(kind)),
            }
            sessions.remove(&key);
        }

        let state = factory()?;
        let session = Session::new(owner.clone(), kind, state, self.timeouts.for_kind(kind));
        let cell = Arc::new(Mutex::new(session));
        let guard = Arc::clone(&cell).lock_owned().await;
        sessions.insert(key, cell);
        Ok(guard)
    }

    /// Lock the open session for `owner` and `kind`.
    ///
    /// Expiry is checked here as well as by the sweeper, so a timed-out game
    /// is never played even if the sweeper has not run yet. A finished game
    /// still owing a payout is returned regardless of its expiry.
    ///
    /// # Errors
    ///
    /// * `SessionError::NotFound` - No open session
    /// * `SessionError::Expired` - The session timed out; it is discarded
    pub async fn get(&self, owner: &AccountId, kind: GameKind) -> SessionResult<SessionGuard> {
        let key = SessionKey::new(owner.clone(), kind);
        let cell = {
            let sessions = self.sessions.read().await;
            sessions.get(&key).cloned()
        }
        .ok_or(SessionError::NotFound(kind))?;

        let mut guard = cell.lock_owned().await;
        if guard.closed {
            return Err(SessionError::NotFound(kind));
        }
        if guard.is_evictable(Utc::now()) {
            info!("Session {} for {key} expired", guard.id);
            self.finish(&mut guard).await;
            return Err(SessionError::Expired(kind));
        }
        Ok(guard)
    }

    /// Close the session behind `guard` and drop it from the index.
    pub async fn finish(&self, guard: &mut SessionGuard) {
        guard.closed = true;
        let key = guard.key();
        let cell = OwnedMutexGuard::mutex(guard);
        let mut sessions = self.sessions.write().await;
        if sessions.get(&key).is_some_and(|c| Arc::ptr_eq(c, cell)) {
            sessions.remove(&key);
        }
    }

    /// Discard the session for `owner` and `kind`, if any. Idempotent.
    ///
    /// Waits for an in-flight operation on the session to finish first.
    pub async fn end(&self, owner: &AccountId, kind: GameKind) -> bool {
        let key = SessionKey::new(owner.clone(), kind);
        let removed = self.sessions.write().await.remove(&key);
        match removed {
            Some(cell) => {
                let mut session = cell.lock().await;
                let existed = !session.closed;
                session.closed = true;
                existed
            }
            None => false,
        }
    }

    /// Evict every expired session and return how many were dropped.
    ///
    /// Sessions busy with an operation are skipped; they are checked again
    /// on the next sweep or on their next access. Sessions owing a payout
    /// are kept.
    pub async fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|key, cell| match cell.try_lock() {
            Ok(mut session) if session.is_evictable(now) => {
                debug!("Evicting session {} for {key}", session.id);
                session.closed = true;
                false
            }
            _ => true,
        });
        before - sessions.len()
    }

    pub async fn contains(&self, owner: &AccountId, kind: GameKind) -> bool {
        let key = SessionKey::new(owner.clone(), kind);
        self.sessions.read().await.contains_key(&key)
    }

    /// Kinds of game `owner` currently has open.
    pub async fn active_kinds(&self, owner: &AccountId) -> Vec<GameKind> {
        let mut kinds: Vec<GameKind> = self
            .sessions
            .read()
            .await
            .keys()
            .filter(|key| &key.owner == owner)
            .map(|key| key.kind)
            .collect();
        kinds.sort();
        kinds
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionTimeouts::default())
    }
}
