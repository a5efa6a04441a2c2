//! Resilience subsystem.
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No in-cycle retries: the next scheduled tick is the retry

pub mod timeouts;
