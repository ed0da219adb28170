//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use casino_engine::{CasinoConfig, casino::BetLimits};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path of the JSON balance file
    pub ledger_path: PathBuf,
    /// Prometheus exporter bind address, if metrics are enabled
    pub metrics_bind: Option<SocketAddr>,
    /// Fixed seed for every game, for reproducible runs
    pub rng_seed: Option<u64>,
    /// Engine configuration
    pub casino: CasinoConfig,
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub ledger_path: Option<PathBuf>,
    pub metrics_bind: Option<SocketAddr>,
    pub sweep_secs: Option<u64>,
    pub rng_seed: Option<u64>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values from CLI args
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but malformed
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let ledger_path = overrides
            .ledger_path
            .or_else(|| std::env::var("LEDGER_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("player_balances.json"));

        let metrics_bind = match overrides.metrics_bind {
            Some(addr) => Some(addr),
            None => parse_env_strict("METRICS_BIND")?,
        };

        let rng_seed = match overrides.rng_seed {
            Some(seed) => Some(seed),
            None => parse_env_strict("RNG_SEED")?,
        };

        let defaults = CasinoConfig::default();
        let min_bet = parse_env_or("MIN_BET", defaults.blackjack.min);
        let blackjack_max = parse_env_or("BLACKJACK_MAX_BET", defaults.blackjack.max.unwrap_or(0));
        let sweep_secs = overrides
            .sweep_secs
            .unwrap_or_else(|| parse_env_or("SESSION_SWEEP_SECS", defaults.sweep_interval.as_secs()));

        let mut casino = CasinoConfig {
            starting_balance: parse_env_or("STARTING_BALANCE", defaults.starting_balance),
            sweep_interval: Duration::from_secs(sweep_secs),
            ..defaults
        }
        .with_min_bet(min_bet);
        casino.blackjack = BetLimits::new(min_bet, (blackjack_max > 0).then_some(blackjack_max));

        Ok(ServerConfig {
            ledger_path,
            metrics_bind,
            rng_seed,
            casino,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "LEDGER_PATH".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.casino.starting_balance < 0 {
            return Err(ConfigError::Invalid {
                var: "STARTING_BALANCE".to_string(),
                reason: "Must not be negative".to_string(),
            });
        }

        if self.casino.sweep_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "SESSION_SWEEP_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        self.casino.validate().map_err(|reason| ConfigError::Invalid {
            var: "MIN_BET/BLACKJACK_MAX_BET".to_string(),
            reason,
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parse an optional environment variable, rejecting malformed values.
fn parse_env_strict<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::Invalid {
                    var: key.to_string(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(None),
    }
}
