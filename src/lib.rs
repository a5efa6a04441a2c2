//! Subscription-driven config updater for the mihomo proxy daemon.

pub mod config;
pub mod daemon;
pub mod document;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod scheduler;

pub use config::Settings;
pub use error::{UpdateError, UpdateResult};
pub use lifecycle::Shutdown;
pub use scheduler::{Scheduler, UpdateCycle};
