//! Timeout enforcement for outbound HTTP.
//!
//! # Design Decisions
//! - One client is shared by the fetcher and the reload notifier
//! - Every request carries a 30 second deadline covering connect, send and body read
//! - Timeout errors surface as network errors; nothing is retried within a cycle

use std::time::Duration;

/// Deadline for each outbound request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client used by every cycle.
pub fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("mihomo-updater/", env!("CARGO_PKG_VERSION")))
        .build()
}
