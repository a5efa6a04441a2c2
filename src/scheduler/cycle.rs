//! A single update cycle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Settings;
use crate::daemon::{ReloadNotifier, ReloadStatus};
use crate::document::{fetcher::Fetcher, merger, reader, writer};
use crate::error::{UpdateError, UpdateResult};
use crate::observability::metrics;

/// What a completed cycle did.
#[derive(Debug)]
pub struct CycleReport {
    /// File the merged configuration was written to.
    pub output_path: PathBuf,
    /// Number of top-level fields written.
    pub fields: usize,
    /// Reload outcome. An error here does not fail the cycle.
    pub reload: Result<ReloadStatus, UpdateError>,
}

impl CycleReport {
    pub fn reloaded(&self) -> bool {
        matches!(self.reload, Ok(ReloadStatus::Reloaded))
    }
}

/// fetch → read → merge → write → notify.
pub struct UpdateCycle {
    settings: Arc<Settings>,
    fetcher: Fetcher,
    notifier: ReloadNotifier,
}

impl UpdateCycle {
    pub fn new(settings: Arc<Settings>, client: reqwest::Client) -> Self {
        Self {
            settings,
            fetcher: Fetcher::new(client.clone()),
            notifier: ReloadNotifier::new(client),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the steps in order.
    ///
    /// Fetch, read or write failures abort the cycle before the reload. A
    /// reload failure is logged and reported in [`CycleReport::reload`]; the
    /// written file stays in place.
    pub async fn run_once(&self) -> UpdateResult<CycleReport> {
        let settings = &*self.settings;
        tracing::info!(url = %settings.subscribe_url, "Updating config");

        let incoming = self.fetcher.fetch(&settings.subscribe_url).await?;
        let base = reader::read(&settings.base_config_path).await?;

        let merged = merger::merge(&base, &incoming, &settings.update_fields);
        writer::write(&settings.output_config_path, &merged, &settings.update_fields).await?;

        let reload_path = absolute(&settings.output_config_path);
        let reload = self
            .notifier
            .notify(&settings.mihomo_api_url, &settings.mihomo_api_token, &reload_path)
            .await;

        if let Err(e) = &reload {
            metrics::record_reload_failure();
            tracing::warn!(error = %e, "Config written but daemon reload failed");
        }

        Ok(CycleReport {
            output_path: settings.output_config_path.clone(),
            fields: merged.len(),
            reload,
        })
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
