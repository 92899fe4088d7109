//! Canonical value helpers shared across the pipeline.
//!
//! Every transformation stage operates on [`serde_json::Value`]; records
//! keep their members in deterministic (alphabetical) order because the
//! canonical map type is a `BTreeMap`.

use serde::Serialize;
use serde_json::Value;

use crate::error::RenderResult;

/// Convert any serializable domain value into canonical form.
///
/// This is the single entry point into the pipeline; domain types never
/// reach a renderer directly.
pub fn normalize<T: Serialize + ?Sized>(input: &T) -> RenderResult<Value> {
    Ok(serde_json::to_value(input)?)
}

/// True for null, booleans, numbers, and strings.
pub fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

/// Render a value as unquoted display text.
///
/// Scalars print bare (null prints as empty); containers fall back to
/// their compact JSON encoding.
pub fn default_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Recursively drop null and empty-container members from records.
///
/// Sequences keep their length; only record members disappear. Children
/// are stripped first, so a member that becomes empty once its own
/// members are gone drops as well.
pub fn strip_empty(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let stripped = map
                .into_iter()
                .map(|(k, v)| (k, strip_empty(v)))
                .filter(|(_, v)| !is_empty_member(v))
                .collect();
            Value::Object(stripped)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(strip_empty).collect()),
        other => other,
    }
}

fn is_empty_member(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// True when a value carries no results worth showing: an empty
/// sequence, or a record whose `results` or `items` member is an empty
/// sequence.
pub fn is_structurally_empty(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => ["results", "items"].iter().any(|key| {
            matches!(map.get(*key), Some(Value::Array(items)) if items.is_empty())
        }),
        _ => false,
    }
}
