//! Ordered document writer.
//!
//! # Output Layout
//! ```text
//! <every field not in the allow-list, one YAML mapping, base order>
//! <allow-listed field #1>
//! <allow-listed field #2>
//! ...
//! ```
//!
//! Managed fields stay grouped at the end in allow-list order, independent of
//! how the merged mapping happens to be ordered. The file is written to a
//! sibling temp file and renamed into place.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::document::Document;
use crate::error::{UpdateError, UpdateResult};

/// Render `merged` in the ordered block layout.
pub fn render(merged: &Document, allow_list: &[String]) -> UpdateResult<String> {
    let mut out = String::new();

    let passthrough: Mapping = merged
        .iter()
        .filter(|(key, _)| !is_allow_listed(key, allow_list))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if !passthrough.is_empty() {
        out.push_str(&to_yaml(&passthrough)?);
    }

    let mut written = HashSet::new();
    for field in allow_list {
        if !written.insert(field.as_str()) {
            continue;
        }
        if let Some(value) = merged.get(field.as_str()) {
            let mut block = Mapping::new();
            block.insert(Value::String(field.clone()), value.clone());
            out.push_str(&to_yaml(&block)?);
        }
    }

    Ok(out)
}

/// Write `merged` to `path`, creating parent directories as needed.
pub async fn write(path: &Path, merged: &Document, allow_list: &[String]) -> UpdateResult<()> {
    let rendered = render(merged, allow_list)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir).await.map_err(|e| UpdateError::io(dir, e))?;
    }

    let tmp = temp_path(path);
    if let Err(e) = write_file(&tmp, rendered.as_bytes()).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(UpdateError::io(&tmp, e));
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(UpdateError::io(path, e));
    }

    tracing::debug!(path = %path.display(), bytes = rendered.len(), "Merged config written");
    Ok(())
}

fn is_allow_listed(key: &Value, allow_list: &[String]) -> bool {
    key.as_str()
        .is_some_and(|k| allow_list.iter().any(|field| field == k))
}

fn to_yaml(mapping: &Mapping) -> UpdateResult<String> {
    serde_yaml::to_string(mapping).map_err(|e| UpdateError::parse("merged config", e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

async fn create_dir_all(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);

    builder.create(dir).await
}
