//! Settings schema definitions.
//!
//! Field names follow the keys of `mihomo-updater.yaml`.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Default location the daemon reads its configuration from.
pub const DEFAULT_OUTPUT_CONFIG_PATH: &str = "/root/.config/mihomo/config.yaml";

/// Default daemon executable.
pub const DEFAULT_MIHOMO_BINARY: &str = "/mihomo";

/// Default refresh interval.
pub const DEFAULT_UPDATE_INTERVAL: &str = "1h";

/// Root settings for the updater.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Optional log file; logs go to stderr when unset.
    pub log_file: Option<PathBuf>,

    /// Base URL of the daemon control API. Empty disables reload.
    pub mihomo_api_url: String,

    /// Bearer token for the control API. Empty sends no auth header.
    pub mihomo_api_token: String,

    /// Remote subscription document URL.
    pub subscribe_url: String,

    /// Local base configuration file.
    pub base_config_path: PathBuf,

    /// Refresh interval in humantime form ("1h", "30m", "1h 30m").
    pub update_interval: String,

    /// Top-level fields taken from the subscription, in output order.
    pub update_fields: Vec<String>,

    /// Where the merged configuration is written.
    pub output_config_path: PathBuf,

    /// Daemon executable started at boot.
    pub mihomo_binary: PathBuf,

    /// Prometheus exporter bind address (e.g. "0.0.0.0:9090").
    pub metrics_address: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_file: None,
            mihomo_api_url: String::new(),
            mihomo_api_token: String::new(),
            subscribe_url: String::new(),
            base_config_path: PathBuf::new(),
            update_interval: DEFAULT_UPDATE_INTERVAL.to_string(),
            update_fields: Vec::new(),
            output_config_path: PathBuf::from(DEFAULT_OUTPUT_CONFIG_PATH),
            mihomo_binary: PathBuf::from(DEFAULT_MIHOMO_BINARY),
            metrics_address: None,
        }
    }
}

impl Settings {
    /// Whether the daemon can be asked to reload.
    pub fn reload_enabled(&self) -> bool {
        !self.mihomo_api_url.is_empty()
    }

    /// Fill in defaults for keys that were present but left blank, and drop
    /// repeated `update_fields` entries (first occurrence wins).
    pub(crate) fn normalize(&mut self) {
        let mut seen = HashSet::new();
        self.update_fields.retain(|field| seen.insert(field.clone()));

        if self.update_interval.trim().is_empty() {
            self.update_interval = DEFAULT_UPDATE_INTERVAL.to_string();
        }
        if self.output_config_path.as_os_str().is_empty() {
            self.output_config_path = PathBuf::from(DEFAULT_OUTPUT_CONFIG_PATH);
        }
        if self.mihomo_binary.as_os_str().is_empty() {
            self.mihomo_binary = PathBuf::from(DEFAULT_MIHOMO_BINARY);
        }
        if self.log_file.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            self.log_file = None;
        }
        if self.metrics_address.as_ref().is_some_and(|a| a.trim().is_empty()) {
            self.metrics_address = None;
        }
    }
}
