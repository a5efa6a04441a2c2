//! Reload notification via the daemon control API.

use std::path::Path;

use reqwest::StatusCode;
use serde::Serialize;

use crate::error::{UpdateError, UpdateResult};

/// Outcome of a reload request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadStatus {
    /// The daemon accepted the new config (204).
    Reloaded,
    /// No control API is configured.
    Skipped,
}

#[derive(Serialize)]
struct ReloadRequest<'a> {
    path: &'a str,
}

/// Asks the running daemon to re-read its configuration file.
#[derive(Clone)]
pub struct ReloadNotifier {
    client: reqwest::Client,
}

impl ReloadNotifier {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// PUT `{"path": config_path}` to `<endpoint>/configs`.
    ///
    /// An empty `endpoint` is a valid "no live reload" setup and succeeds with
    /// [`ReloadStatus::Skipped`]. Only `204 No Content` counts as success.
    pub async fn notify(
        &self,
        endpoint: &str,
        token: &str,
        config_path: &Path,
    ) -> UpdateResult<ReloadStatus> {
        if endpoint.is_empty() {
            tracing::info!("No daemon API configured, skipping reload");
            return Ok(ReloadStatus::Skipped);
        }

        let url = format!("{}/configs", endpoint.trim_end_matches('/'));
        let path = config_path.to_string_lossy();

        let mut request = self
            .client
            .put(&url)
            .json(&ReloadRequest { path: &path });
        if !token.is_empty() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| UpdateError::Network {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            return Err(UpdateError::Reload {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(url = %url, path = %path, "Daemon reloaded config");
        Ok(ReloadStatus::Reloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_endpoint_skips() {
        let notifier = ReloadNotifier::new(reqwest::Client::new());
        let status = notifier
            .notify("", "token", Path::new("/root/.config/mihomo/config.yaml"))
            .await
            .unwrap();
        assert_eq!(status, ReloadStatus::Skipped);
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_string(&ReloadRequest { path: "/a/config.yaml" }).unwrap();
        assert_eq!(body, r#"{"path":"/a/config.yaml"}"#);
    }
}
