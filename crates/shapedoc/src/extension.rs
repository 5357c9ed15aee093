//! Specification extensions

use serde_json::Value;
use std::collections::BTreeMap;

/// Whether `key` names a specification extension (`x-` prefix)
#[must_use]
pub fn is_specification_extension(key: &str) -> bool {
    key.starts_with("x-")
}

/// Copy the `x-` prefixed entries of `extensions`.
///
/// Other keys would collide with the fields of the object they are flattened
/// into, so they are dropped with a warning.
#[must_use]
pub fn specification_extensions(
    extensions: &BTreeMap<String, Value>,
) -> BTreeMap<String, Value> {
    extensions
        .iter()
        .filter(|(key, _)| {
            let keep = is_specification_extension(key);
            if !keep {
                tracing::warn!(%key, "dropping non-extension key");
            }
            keep
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
