//! Casino manager binding the ledger, the session registry and the engines.

use chrono::Utc;
use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::{task::JoinHandle, time::interval};

use super::{
    config::CasinoConfig,
    errors::{CasinoError, CasinoResult},
    models::{MoveOutcome, Settlement, StartedGame},
};
use crate::{
    game::{Chips, GameError, GameKind, GameParams, GameRng, GameState, GameView, Move, Wager},
    ledger::{AccountId, AccountSummary, LeaderboardEntry, Ledger},
    session::{SessionError, SessionGuard, SessionRegistry},
};

/// Casino manager.
///
/// Stakes are debited when a game opens; the payout (stake included) is
/// credited when it ends. A session whose credit failed stays open in its
/// finished state and the credit is retried on the next call for it.
pub struct Casino {
    /// Chip balances
    ledger: Arc<Ledger>,

    /// Open games
    sessions: Arc<SessionRegistry>,

    config: CasinoConfig,

    /// Source of per-game seeds
    seeder: Mutex<GameRng>,
}

impl Casino {
    /// Create a new casino
    ///
    /// # Arguments
    ///
    /// * `ledger` - Balance ledger
    /// * `config` - Bet limits and session timeouts
    ///
    /// # Returns
    ///
    /// * `Casino` - New casino with OS-seeded randomness
    pub fn new(ledger: Arc<Ledger>, config: CasinoConfig) -> Self {
        Self::with_rng(ledger, config, GameRng::from_os())
    }

    /// Casino whose every game derives from `seed`.
    pub fn with_seed(ledger: Arc<Ledger>, config: CasinoConfig, seed: u64) -> Self {
        Self::with_rng(ledger, config, GameRng::seeded(seed))
    }

    fn with_rng(ledger: Arc<Ledger>, config: CasinoConfig, seeder: GameRng) -> Self {
        let sessions = Arc::new(SessionRegistry::new(config.timeouts.clone()));
        Self {
            ledger,
            sessions,
            config,
            seeder: Mutex::new(seeder),
        }
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    pub fn config(&self) -> &CasinoConfig {
        &self.config
    }

    fn game_rng(&self) -> GameRng {
        let seed = self
            .seeder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_seed();
        GameRng::seeded(seed)
    }

    fn engine_error(&self, kind: GameKind, e: GameError) -> CasinoError {
        if e.is_invariant_violation() {
            log::error!("{kind} engine invariant violated: {e}");
        }
        e.into()
    }

    fn session_error(&self, kind: GameKind, e: SessionError) -> CasinoError {
        match e {
            SessionError::Game(e) => self.engine_error(kind, e),
            other => other.into(),
        }
    }

    fn check_bet(&self, kind: GameKind, bet: Chips) -> CasinoResult<()> {
        match self.config.bet_limits(kind) {
            Some(limits) => limits.check(bet).map_err(CasinoError::Validation),
            None => Ok(()),
        }
    }

    /// Open a game for `owner`.
    ///
    /// # Errors
    ///
    /// * `CasinoError::Validation` - Bet out of bounds or bad parameters
    /// * `CasinoError::SessionConflict` - A game of this kind is already open
    /// * `CasinoError::InsufficientFunds` - Balance below the stake
    /// * `CasinoError::Persistence` - The stake could not be recorded
    pub async fn start_game(
        &self,
        owner: &AccountId,
        params: GameParams,
    ) -> CasinoResult<StartedGame> {
        let kind = params.kind();
        self.check_bet(kind, params.bet())?;
        let rng = self.game_rng();
        let guard = self
            .sessions
            .start(owner, kind, || params.build(rng))
            .await
            .map_err(|e| self.session_error(kind, e))?;
        self.open(owner, guard).await
    }

    /// Open a game from an already built state, e.g. a stacked shoe or a
    /// fixed mine layout.
    pub async fn start_prepared(
        &self,
        owner: &AccountId,
        state: GameState,
    ) -> CasinoResult<StartedGame> {
        let kind = state.kind();
        self.check_bet(kind, state.bet())?;
        let guard = self
            .sessions
            .start(owner, kind, || Ok(state))
            .await
            .map_err(|e| self.session_error(kind, e))?;
        self.open(owner, guard).await
    }

    async fn open(&self, owner: &AccountId, mut guard: SessionGuard) -> CasinoResult<StartedGame> {
        let kind = guard.kind;
        let bet = guard.state.bet();
        let taken = if kind.is_wagered() {
            self.ledger.debit(owner, bet).await
        } else {
            self.ledger.get_balance(owner).await
        };
        let balance = match taken {
            Ok(balance) => balance,
            Err(e) => {
                log::debug!("Could not open {kind} for {owner}: {e}");
                self.sessions.finish(&mut guard).await;
                return Err(e.into());
            }
        };
        log::info!(
            "{owner} opened {kind} session {} with a {bet} chip stake",
            guard.id
        );

        let settlement = if guard.state.is_over() {
            Some(self.settle(&mut guard).await?)
        } else {
            None
        };
        let balance = settlement.as_ref().map_or(balance, |s| s.balance);

        Ok(StartedGame {
            session_id: guard.id,
            balance,
            view: guard.state.view(),
            settlement,
        })
    }

    /// Pay out a finished game and close its session.
    ///
    /// On a failed credit the session is left open and unsettled so the
    /// next call retries.
    async fn settle(&self, guard: &mut SessionGuard) -> CasinoResult<Settlement> {
        let bet = guard.state.bet();
        let payout = guard.state.payout().unwrap_or(0);
        let balance = if payout > 0 && !guard.settled {
            self.ledger.credit(&guard.owner, payout).await?
        } else {
            self.ledger.get_balance(&guard.owner).await?
        };
        guard.settled = true;
        self.sessions.finish(guard).await;

        let settlement = Settlement {
            session_id: guard.id,
            account: guard.owner.clone(),
            kind: guard.kind,
            bet,
            payout,
            net: payout - bet,
            balance,
            status: guard.state.status(),
        };
        log::info!(
            "{} {} {}: bet {}, paid {}, balance {}",
            settlement.account,
            settlement.status,
            settlement.kind,
            settlement.bet,
            settlement.payout,
            settlement.balance
        );
        Ok(settlement)
    }

    /// Apply a move to the open game of `kind`.
    ///
    /// Every accepted move pushes the session's expiry out again. A move on
    /// a finished game whose payout is still pending retries the payout.
    pub async fn apply_move(
        &self,
        owner: &AccountId,
        kind: GameKind,
        action: Move,
    ) -> CasinoResult<MoveOutcome> {
        let mut guard = self.sessions.get(owner, kind).await?;
        if guard.state.is_over() {
            let settlement = self.settle(&mut guard).await?;
            return Ok(MoveOutcome {
                view: guard.state.view(),
                settlement: Some(settlement),
            });
        }

        log::debug!("{owner} plays {} in {kind}", action.name());
        guard
            .state
            .play(action)
            .map_err(|e| self.engine_error(kind, e))?;
        guard.touch(Utc::now());

        let view = guard.state.view();
        let settlement = if guard.state.is_over() {
            Some(self.settle(&mut guard).await?)
        } else {
            None
        };
        Ok(MoveOutcome { view, settlement })
    }

    /// Stop the open game of `kind` and take its current payout.
    ///
    /// # Errors
    ///
    /// * `CasinoError::SessionNotFound` - No open game of this kind
    /// * `CasinoError::NothingRevealed` - Nothing won yet to cash out
    /// * `CasinoError::Validation` - The game has no cash out
    pub async fn cash_out(&self, owner: &AccountId, kind: GameKind) -> CasinoResult<Settlement> {
        let mut guard = self.sessions.get(owner, kind).await?;
        if !guard.state.is_over() {
            match guard.state.cash_out() {
                Ok(_) => {}
                Err(GameError::NothingToCashOut) => return Err(CasinoError::NothingRevealed),
                Err(e) => return Err(self.engine_error(kind, e)),
            }
        }
        self.settle(&mut guard).await
    }

    /// Current snapshot of the open game of `kind`.
    pub async fn view(&self, owner: &AccountId, kind: GameKind) -> CasinoResult<GameView> {
        let guard = self.sessions.get(owner, kind).await?;
        Ok(guard.state.view())
    }

    /// Discard the open game of `kind` without touching the ledger.
    pub async fn clear_session(&self, owner: &AccountId, kind: GameKind) -> bool {
        let cleared = self.sessions.end(owner, kind).await;
        if cleared {
            log::info!("{owner} cleared their {kind} session");
        }
        cleared
    }

    pub async fn query_balance(&self, owner: &AccountId) -> CasinoResult<Chips> {
        Ok(self.ledger.get_balance(owner).await?)
    }

    pub async fn account_summary(&self, owner: &AccountId) -> CasinoResult<AccountSummary> {
        Ok(self.ledger.account_summary(owner).await?)
    }

    pub async fn leaderboard_snapshot(&self, limit: usize) -> CasinoResult<Vec<LeaderboardEntry>> {
        Ok(self.ledger.leaderboard(limit).await?)
    }

    /// Evict expired sessions. Stakes of evicted games are not refunded.
    pub async fn sweep_expired(&self) -> usize {
        let evicted = self.sessions.sweep_expired().await;
        if evicted > 0 {
            log::info!("Evicted {evicted} expired sessions");
        }
        evicted
    }

    /// Run [`Casino::sweep_expired`] every `period` until the task is aborted.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let casino = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                casino.sweep_expired().await;
            }
        })
    }
}
