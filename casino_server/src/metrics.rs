//! Prometheus metrics for monitoring the casino.
//!
//! Metrics are exposed in Prometheus text format at `http://<addr>/metrics`.
//!
//! # Metrics
//!
//! - `casino_active_sessions`: open game sessions
//! - `casino_ledger_accounts`: accounts in the ledger
//! - `casino_chips_total`: chips held across all accounts
//! - `casino_snapshot_duration_ms`: time taken to gather the above

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// # Arguments
///
/// - `addr`: Address to bind the metrics server to (e.g., `0.0.0.0:9090`)
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))
}

/// Set current open session count.
pub fn active_sessions(count: usize) {
    metrics::gauge!("casino_active_sessions").set(count as f64);
}

/// Set current account count.
pub fn ledger_accounts(count: usize) {
    metrics::gauge!("casino_ledger_accounts").set(count as f64);
}

/// Set chips held across all accounts.
pub fn chips_total(chips: i64) {
    metrics::gauge!("casino_chips_total").set(chips as f64);
}

/// Record how long a stats snapshot took.
pub fn snapshot_duration_ms(duration_ms: f64) {
    metrics::histogram!("casino_snapshot_duration_ms").record(duration_ms);
}

/// Count a failed ledger read while reporting.
pub fn ledger_errors_total() {
    metrics::counter!("casino_ledger_errors_total").increment(1);
}
