//! Per-collection record validation.

use super::{Collection, Record};
use serde_json::Value;

/// Check that every required field of `collection` is present and non-blank.
///
/// Only strings and numbers count as values; booleans, arrays and objects
/// are treated as missing. Invalid records are expected in hand-maintained
/// data files; callers drop them silently.
pub fn is_valid(record: &Record, collection: Collection) -> bool {
    collection
        .required_fields()
        .iter()
        .all(|field| has_value(record.get(*field)))
}

fn has_value(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    }
}
