//! Structured logging setup for the server process.
//!
//! The engine logs through the `log` facade; those records reach the
//! subscriber installed here through its `log` bridge.

use std::path::Path;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Background work slower than this is logged as a warning.
const SLOW_OPERATION_MS: u64 = 500;

/// Install the global subscriber. `RUST_LOG` selects levels (default `info`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Record the effective startup settings once.
pub fn log_startup(ledger_path: &Path, starting_balance: i64, seeded: bool) {
    tracing::info!(
        ledger = %ledger_path.display(),
        starting_balance = starting_balance,
        seeded = seeded,
        "Casino engine starting"
    );
}

/// Timing of a background operation; slow runs are warnings.
pub fn log_performance(operation: &str, duration_ms: u64, metadata: Option<&str>) {
    if duration_ms > SLOW_OPERATION_MS {
        tracing::warn!(
            operation = operation,
            duration_ms = duration_ms,
            metadata = metadata,
            "Slow background operation"
        );
    } else {
        tracing::trace!(operation = operation, duration_ms = duration_ms, "Operation timing");
    }
}

/// Periodic stats line from the reporter.
pub fn log_ledger_snapshot(accounts: usize, chips: i64, active_sessions: usize) {
    tracing::debug!(
        accounts = accounts,
        chips = chips,
        active_sessions = active_sessions,
        "Ledger snapshot"
    );
}
