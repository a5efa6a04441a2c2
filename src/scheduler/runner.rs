//! Periodic cycle runner.

use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::config::{validation::parse_interval, ConfigError};
use crate::error::UpdateResult;
use crate::observability::metrics;
use crate::scheduler::cycle::UpdateCycle;

/// Runs one cycle immediately, then one per interval, never two at once.
pub struct Scheduler {
    cycle: UpdateCycle,
    interval: Duration,
}

impl Scheduler {
    /// Build a scheduler from the cycle's configured interval string.
    ///
    /// An unparseable interval is a startup [`ConfigError`].
    pub fn new(cycle: UpdateCycle) -> UpdateResult<Self> {
        let interval =
            parse_interval(&cycle.settings().update_interval).map_err(ConfigError::from)?;
        Ok(Self { cycle, interval })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Loop until a shutdown signal arrives.
    ///
    /// The cycle runs inline in the tick handler, so a slow cycle delays the
    /// next tick instead of overlapping it. Missed ticks are skipped. Shutdown
    /// is observed between cycles only.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval = %humantime::format_duration(self.interval),
            "Config updater started"
        );

        // First tick completes immediately.
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut cycles: u64 = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let phase = if cycles == 0 { "initial" } else { "scheduled" };
                    self.run_cycle(phase).await;
                    cycles += 1;
                }
                _ = shutdown.recv() => {
                    tracing::info!(cycles, "Updater received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Run one cycle and contain its failure. Returns whether it succeeded.
    pub async fn run_cycle(&self, phase: &'static str) -> bool {
        let started = Instant::now();
        match self.cycle.run_once().await {
            Ok(report) => {
                metrics::record_cycle_success(started.elapsed());
                tracing::info!(
                    phase,
                    path = %report.output_path.display(),
                    fields = report.fields,
                    reloaded = report.reloaded(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Config update succeeded"
                );
                true
            }
            Err(e) => {
                metrics::record_cycle_failure(e.kind(), started.elapsed());
                tracing::error!(phase, kind = e.kind(), error = %e, "Config update failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::error::UpdateError;
    use std::sync::Arc;

    fn cycle_with_interval(interval: &str) -> UpdateCycle {
        let settings = Settings {
            subscribe_url: "http://127.0.0.1:1/sub".into(),
            base_config_path: "/nonexistent/base.yaml".into(),
            update_interval: interval.into(),
            ..Default::default()
        };
        UpdateCycle::new(Arc::new(settings), reqwest::Client::new())
    }

    #[test]
    fn test_malformed_interval_fails_fast() {
        let err = Scheduler::new(cycle_with_interval("abc")).err().unwrap();
        assert!(matches!(err, UpdateError::Config(_)));
        assert!(err.to_string().contains("update_interval"));
    }

    #[test]
    fn test_interval_parsed() {
        let scheduler = Scheduler::new(cycle_with_interval("30m")).ok().unwrap();
        assert_eq!(scheduler.interval(), Duration::from_secs(1800));
    }

    #[tokio::test]
    async fn test_failed_cycle_is_contained() {
        let scheduler = Scheduler::new(cycle_with_interval("1h")).ok().unwrap();
        assert!(!scheduler.run_cycle("initial").await);
    }

    #[tokio::test]
    async fn test_shutdown_stops_loop() {
        let scheduler = Scheduler::new(cycle_with_interval("1h")).ok().unwrap();
        let (tx, rx) = broadcast::channel(1);
        let handle = tokio::spawn(scheduler.run(rx));

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(()).unwrap();

        time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("scheduler did not stop")
            .unwrap();
    }
}
