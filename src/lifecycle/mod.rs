//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load settings → Init logging → Banner → Launch daemon → Start scheduler
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → shutdown.rs broadcast → scheduler exits between cycles
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Steady-state cycle errors never stop the process

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
