//! Base configuration reader.

use std::path::Path;

use crate::document::{parse_document_bytes, Document};
use crate::error::{UpdateError, UpdateResult};

/// Read and parse the local base configuration.
///
/// The file is read on every call so edits are picked up on the next cycle.
pub async fn read(path: &Path) -> UpdateResult<Document> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| UpdateError::io(path, e))?;

    let document = parse_document_bytes(&bytes, &format!("base config {}", path.display()))?;

    tracing::debug!(path = %path.display(), fields = document.len(), "Base config read");
    Ok(document)
}
