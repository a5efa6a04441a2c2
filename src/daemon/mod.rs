//! Collaboration with the proxy daemon.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     launcher.rs → spawn daemon binary (fire-and-forget, inherited stdio)
//!
//! After every successful write:
//!     reload.rs → PUT <api>/configs {"path": ...} → expect 204
//! ```
//!
//! # Design Decisions
//! - Launch is a capability behind a trait; cycles never depend on it
//! - No readiness wait: the first reload may race daemon startup and then
//!   simply fails with a logged network error
//! - A failed reload never rolls back the written file

pub mod launcher;
pub mod reload;

pub use launcher::{CommandLauncher, LaunchError, ProcessHandle, ProcessLauncher};
pub use reload::{ReloadNotifier, ReloadStatus};
