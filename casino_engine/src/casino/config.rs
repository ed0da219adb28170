//! Casino configuration models.

use std::time::Duration;

use crate::{
    game::{Chips, GameError, GameKind, GameResult, constants::MAX_STAKE},
    session::SessionTimeouts,
};

/// Stake bounds for one game kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetLimits {
    /// Smallest stake accepted
    pub min: Chips,

    /// Largest stake accepted, if bounded
    pub max: Option<Chips>,
}

impl BetLimits {
    pub const fn new(min: Chips, max: Option<Chips>) -> Self {
        Self { min, max }
    }

    /// Check `bet` against the bounds. A bet is never below one chip nor
    /// above [`MAX_STAKE`], whatever the configured limits.
    pub fn check(&self, bet: Chips) -> GameResult<()> {
        let min = self.min.max(1);
        if bet < min {
            return Err(GameError::BetTooSmall { bet, min });
        }
        let max = self.max.map_or(MAX_STAKE, |max| max.min(MAX_STAKE));
        if bet > max {
            return Err(GameError::BetTooLarge { bet, max });
        }
        Ok(())
    }
}

/// Casino configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CasinoConfig {
    /// Balance granted to an account on first access (default: 10,000)
    pub starting_balance: Chips,

    /// Blackjack stake bounds (default: 100 to 10,000)
    pub blackjack: BetLimits,

    /// Baccarat stake bounds (default: at least 100)
    pub baccarat: BetLimits,

    /// Mines stake bounds (default: at least 100)
    pub mines: BetLimits,

    /// Tower stake bounds (default: at least 100)
    pub tower: BetLimits,

    /// Inactivity timeout per game kind
    pub timeouts: SessionTimeouts,

    /// How often the sweeper evicts expired sessions (default: 30s)
    pub sweep_interval: Duration,
}

impl Default for CasinoConfig {
    fn default() -> Self {
        Self {
            starting_balance: 10_000,
            blackjack: BetLimits::new(100, Some(10_000)),
            baccarat: BetLimits::new(100, None),
            mines: BetLimits::new(100, None),
            tower: BetLimits::new(100, None),
            timeouts: SessionTimeouts::default(),
            sweep_interval: Duration::from_secs(30),
        }
    }
}

impl CasinoConfig {
    /// Stake bounds for `kind`. Wordle takes no stake.
    pub fn bet_limits(&self, kind: GameKind) -> Option<&BetLimits> {
        match kind {
            GameKind::Blackjack => Some(&self.blackjack),
            GameKind::Baccarat => Some(&self.baccarat),
            GameKind::Mines => Some(&self.mines),
            GameKind::Tower => Some(&self.tower),
            GameKind::Wordle => None,
        }
    }

    /// Set the same minimum bet on every wagering game.
    pub fn with_min_bet(mut self, min: Chips) -> Self {
        for limits in [
            &mut self.blackjack,
            &mut self.baccarat,
            &mut self.mines,
            &mut self.tower,
        ] {
            limits.min = min;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.starting_balance < 0 {
            return Err("Starting balance cannot be negative".to_string());
        }

        for kind in GameKind::ALL {
            let Some(limits) = self.bet_limits(kind) else {
                continue;
            };
            if limits.min <= 0 {
                return Err(format!("Minimum {kind} bet must be positive"));
            }
            if limits.max.is_some_and(|max| max < limits.min) {
                return Err(format!("Maximum {kind} bet is below the minimum"));
            }
        }

        if self.sweep_interval.is_zero() {
            return Err("Sweep interval must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CasinoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.starting_balance, 10_000);
        assert!(config.bet_limits(GameKind::Wordle).is_none());
    }

    #[test]
    fn test_blackjack_bounds() {
        let limits = CasinoConfig::default().blackjack;
        assert_eq!(
            limits.check(99),
            Err(GameError::BetTooSmall { bet: 99, min: 100 })
        );
        assert!(limits.check(100).is_ok());
        assert!(limits.check(10_000).is_ok());
        assert_eq!(
            limits.check(10_001),
            Err(GameError::BetTooLarge {
                bet: 10_001,
                max: 10_000
            })
        );
    }

    #[test]
    fn test_unbounded_max() {
        let limits = CasinoConfig::default().tower;
        assert!(limits.check(1_000_000).is_ok());
        assert!(limits.check(MAX_STAKE).is_ok());
        assert_eq!(
            limits.check(MAX_STAKE + 1),
            Err(GameError::BetTooLarge {
                bet: MAX_STAKE + 1,
                max: MAX_STAKE
            })
        );
        assert!(BetLimits::new(100, Some(Chips::MAX)).check(Chips::MAX).is_err());
    }

    #[test]
    fn test_invalid_configs() {
        let config = CasinoConfig::default().with_min_bet(0);
        assert!(config.validate().is_err());

        let mut config = CasinoConfig::default();
        config.blackjack.max = Some(50);
        assert!(config.validate().is_err());

        let config = CasinoConfig {
            sweep_interval: Duration::ZERO,
            ..CasinoConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
