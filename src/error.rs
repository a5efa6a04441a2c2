//! Error taxonomy for the update cycle.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::daemon::LaunchError;

/// Errors that can occur while running the updater.
///
/// Startup callers treat any of these as fatal. Inside the scheduler they
/// abort the current cycle only.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Settings were missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The daemon binary could not be started.
    #[error("daemon launch failed: {0}")]
    Launch(#[from] LaunchError),

    /// Transport failure talking to a remote endpoint.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote endpoint answered with an unexpected status.
    #[error("{url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Local file read, write or directory creation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be parsed or serialized.
    #[error("failed to parse {origin}: {reason}")]
    Parse { origin: String, reason: String },

    /// The daemon refused the reload request.
    #[error("reload rejected with status {status}: {body}")]
    Reload { status: u16, body: String },
}

impl UpdateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(origin: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }

    /// Short label used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Launch(_) => "launch",
            Self::Network { .. } => "network",
            Self::HttpStatus { .. } => "http_status",
            Self::Io { .. } => "io",
            Self::Parse { .. } => "parse",
            Self::Reload { .. } => "reload",
        }
    }
}

/// Result type for updater operations.
pub type UpdateResult<T> = Result<T, UpdateError>;
