//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every component produces:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (cycle counters, last success gauge)
//!
//! Consumers:
//!     → stderr or the configured log file
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
