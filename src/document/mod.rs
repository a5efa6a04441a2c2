//! Generic configuration documents.
//!
//! # Data Flow
//! ```text
//! subscription URL ──▶ fetcher.rs ─┐
//!                                  ├─▶ merger.rs ──▶ writer.rs ──▶ output file
//! base config file ──▶ reader.rs  ─┘
//! ```
//!
//! # Design Decisions
//! - Documents have no fixed schema; the root is a YAML mapping of arbitrary values
//! - Mapping order is preserved, so output layout follows the base file
//! - Only structural parseability is checked, never semantics

pub mod fetcher;
pub mod merger;
pub mod reader;
pub mod writer;

use serde_yaml::{Mapping, Value};

use crate::error::{UpdateError, UpdateResult};

/// A configuration document: top-level keys mapped to arbitrary YAML values.
pub type Document = Mapping;

/// Parse YAML text into a document.
///
/// An empty or `null` document yields an empty mapping. Any other non-mapping
/// root is rejected. `origin` names the source in error messages.
pub fn parse_document(text: &str, origin: &str) -> UpdateResult<Document> {
    if text.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(text).map_err(|e| UpdateError::parse(origin, e))?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(UpdateError::parse(origin, "document root is not a mapping")),
    }
}

/// Parse raw bytes into a document. Invalid UTF-8 is a parse error.
pub fn parse_document_bytes(bytes: &[u8], origin: &str) -> UpdateResult<Document> {
    let text = std::str::from_utf8(bytes).map_err(|e| UpdateError::parse(origin, e))?;
    parse_document(text, origin)
}
