//! Startup orchestration.
//!
//! # Order
//! settings → logging → metrics → banner → daemon launch → scheduler
//!
//! Any failure before the scheduler starts is fatal.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::{UpdateError, UpdateResult};
use crate::resilience::timeouts::build_http_client;
use crate::scheduler::{Scheduler, UpdateCycle};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit id stamped at build time, if any.
pub const COMMIT_ID: Option<&str> = option_env!("MIHOMO_UPDATER_COMMIT");

/// Secrets and endpoints are only reported as present or absent.
pub fn presence(value: &str) -> &'static str {
    if value.is_empty() {
        "not configured"
    } else {
        "configured"
    }
}

/// Log the effective settings. Tokens are never printed.
pub fn log_banner(settings: &Settings) {
    tracing::info!(version = VERSION, commit = COMMIT_ID.unwrap_or("unknown"), "mihomo-updater starting");
    tracing::info!(
        base_config_path = %settings.base_config_path.display(),
        output_config_path = %settings.output_config_path.display(),
        update_interval = %settings.update_interval,
        update_fields = %settings.update_fields.join(", "),
        api_url = presence(&settings.mihomo_api_url),
        api_token = presence(&settings.mihomo_api_token),
        "Settings loaded"
    );
}

/// Build the cycle and scheduler from settings.
pub fn build_scheduler(settings: Arc<Settings>) -> UpdateResult<Scheduler> {
    let client = build_http_client().map_err(|source| UpdateError::Network {
        url: settings.subscribe_url.clone(),
        source,
    })?;
    Scheduler::new(UpdateCycle::new(settings, client))
}
