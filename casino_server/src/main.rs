//! Process host for the casino wagering engine.
//!
//! Opens the balance ledger, builds the casino and keeps its background
//! work running: the expired-session sweeper and the stats reporter. The
//! command layer that feeds games in embeds `casino_engine` directly.

mod config;
mod logging;
mod metrics;

use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Error};
use casino_engine::{AccountId, Casino, Ledger};
use log::{info, warn};
use pico_args::Arguments;
use tokio::{task::JoinHandle, time::interval};

use crate::config::{CliOverrides, ServerConfig};

const HELP: &str = "\
Run the casino wagering engine

USAGE:
  casino_server [OPTIONS]

OPTIONS:
  --ledger       PATH      Balance file                [default: env LEDGER_PATH or player_balances.json]
  --metrics      IP:PORT   Prometheus exporter address [default: env METRICS_BIND or disabled]
  --sweep-secs   N         Session sweep interval      [default: env SESSION_SWEEP_SECS or 30]
  --seed         N         Fixed RNG seed              [default: env RNG_SEED or random]
  --balance      ID        Print one account summary as JSON and exit
  --leaderboard  N         Print the top N accounts as JSON and exit

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  STARTING_BALANCE         Chips given to a new account   [default: 10000]
  MIN_BET                  Minimum stake for every game   [default: 100]
  BLACKJACK_MAX_BET        Maximum blackjack stake        [default: 10000]
  RUST_LOG                 Log filter                     [default: info]
  (See .env file for all configuration options)
";

struct Args {
    overrides: CliOverrides,
    balance: Option<String>,
    leaderboard: Option<usize>,
}

fn parse_args() -> Result<Args, Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        overrides: CliOverrides {
            ledger_path: pargs.opt_value_from_str::<_, PathBuf>("--ledger")?,
            metrics_bind: pargs.opt_value_from_str("--metrics")?,
            sweep_secs: pargs.opt_value_from_str("--sweep-secs")?,
            rng_seed: pargs.opt_value_from_str("--seed")?,
        },
        balance: pargs.opt_value_from_str("--balance")?,
        leaderboard: pargs.opt_value_from_str("--leaderboard")?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("Ignoring unrecognized arguments: {remaining:?}");
    }
    Ok(args)
}

/// Publish ledger and session gauges every `period` until aborted.
fn spawn_reporter(casino: Arc<Casino>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        loop {
            ticker.tick().await;
            let start = Instant::now();

            let sessions = casino.sessions().len().await;
            metrics::active_sessions(sessions);

            let ledger = casino.ledger();
            match (ledger.account_count().await, ledger.total_chips().await) {
                (Ok(accounts), Ok(chips)) => {
                    metrics::ledger_accounts(accounts);
                    metrics::chips_total(chips);
                    logging::log_ledger_snapshot(accounts, chips, sessions);
                }
                (Err(e), _) | (_, Err(e)) => {
                    metrics::ledger_errors_total();
                    warn!("Stats snapshot could not read the ledger: {e}");
                }
            }

            let elapsed = start.elapsed();
            metrics::snapshot_duration_ms(elapsed.as_secs_f64() * 1000.0);
            logging::log_performance("stats_snapshot", elapsed.as_millis() as u64, None);
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    logging::init();
    let args = parse_args()?;

    let config = ServerConfig::from_env(args.overrides)?;
    config.validate()?;

    logging::log_startup(
        &config.ledger_path,
        config.casino.starting_balance,
        config.rng_seed.is_some(),
    );

    let ledger = Arc::new(Ledger::open(
        config.ledger_path.clone(),
        config.casino.starting_balance,
    ));

    // One-shot admin queries.
    if let Some(id) = args.balance {
        let summary = ledger
            .account_summary(&AccountId::new(id))
            .await
            .context("Failed to read the balance ledger")?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    if let Some(limit) = args.leaderboard {
        let board = ledger
            .leaderboard(limit)
            .await
            .context("Failed to read the balance ledger")?;
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    let accounts = ledger
        .account_count()
        .await
        .context("Failed to read the balance ledger")?;
    info!(
        "Ledger {} opened with {accounts} accounts",
        config.ledger_path.display()
    );

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(Error::msg)?;
        info!("Metrics exporter listening on {addr}");
    }

    let sweep_interval = config.casino.sweep_interval;
    let casino = Arc::new(match config.rng_seed {
        Some(seed) => {
            warn!("Running with fixed RNG seed {seed}; game outcomes are reproducible");
            Casino::with_seed(ledger, config.casino, seed)
        }
        None => Casino::new(ledger, config.casino),
    });

    let sweeper = casino.spawn_sweeper(sweep_interval);
    let reporter = spawn_reporter(Arc::clone(&casino), sweep_interval);
    info!("Casino running; sweeping sessions every {sweep_interval:?}");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Shutting down");
    sweeper.abort();
    reporter.abort();
    let open = casino.sessions().len().await;
    if open > 0 {
        info!("Discarding {open} open sessions");
    }
    Ok(())
}
