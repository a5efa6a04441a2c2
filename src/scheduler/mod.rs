//! Update scheduling subsystem.
//!
//! # States
//! ```text
//! Idle ──tick──▶ Running (one cycle) ──done/failed──▶ Idle
//! ```
//! No terminal state: the loop ends only on the shutdown signal.
//!
//! # Design Decisions
//! - First cycle runs at startup, then on a fixed-period timer
//! - At most one cycle executes at any instant
//! - Cycle errors are logged and counted, never fatal
//! - No retry inside a cycle; the next tick is the retry

pub mod cycle;
pub mod runner;

pub use cycle::{CycleReport, UpdateCycle};
pub use runner::Scheduler;
