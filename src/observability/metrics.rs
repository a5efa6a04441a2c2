//! Metrics collection and exposition.
//!
//! # Metrics
//! - `updater_cycles_total` (counter): cycles by outcome (success, failure)
//! - `updater_cycle_errors_total` (counter): aborted cycles by error kind
//! - `updater_reload_failures_total` (counter): rejected or unreachable reloads
//! - `updater_last_success_timestamp_seconds` (gauge): unix time of last written config
//! - `updater_cycle_duration_seconds` (histogram): wall time per cycle
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_cycle_success(duration: Duration) {
    counter!("updater_cycles_total", "outcome" => "success").increment(1);
    histogram!("updater_cycle_duration_seconds").record(duration.as_secs_f64());

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64();
    gauge!("updater_last_success_timestamp_seconds").set(now);
}

pub fn record_cycle_failure(kind: &'static str, duration: Duration) {
    counter!("updater_cycles_total", "outcome" => "failure").increment(1);
    counter!("updater_cycle_errors_total", "kind" => kind).increment(1);
    histogram!("updater_cycle_duration_seconds").record(duration.as_secs_f64());
}

pub fn record_reload_failure() {
    counter!("updater_reload_failures_total").increment(1);
}
