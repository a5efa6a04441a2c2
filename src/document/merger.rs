//! Selective field merge.

use serde_yaml::Value;

use crate::document::Document;

/// Merge `incoming` into a copy of `base`, taking only allow-listed fields.
///
/// Allow-listed fields present in `incoming` replace (or are appended to) the
/// base value; absent ones keep the base value. Every other field of
/// `incoming` is ignored. Base key order is preserved.
pub fn merge(base: &Document, incoming: &Document, allow_list: &[String]) -> Document {
    let mut merged = base.clone();

    for field in allow_list {
        if let Some(value) = incoming.get(field.as_str()) {
            merged.insert(Value::String(field.clone()), value.clone());
        }
    }

    merged
}
