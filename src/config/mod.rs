//! Updater settings subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (YAML/TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (required fields, URLs, interval)
//!     → Settings (validated, immutable)
//!     → shared via Arc to every cycle component
//! ```
//!
//! # Design Decisions
//! - Settings are loaded once at startup and never mutated
//! - All optional fields have defaults to allow minimal files
//! - Validation reports every problem at once, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, ConfigError};
pub use schema::Settings;
