//! List-envelope handling and `_meta` injection.
//!
//! A list envelope is a record carrying a `results` sequence plus
//! sibling metadata members (`has_more`, `next_cursor`, ...); detection
//! is structural, no type tag involved. Machine-readable formats get a
//! `_meta` member recording how many results were fetched and when; the
//! underscore prefix keeps it clear of real payload members. Injection
//! alone additionally requires the record to say `"object": "list"`.

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};

/// The `results` sequence of a list envelope.
///
/// Detection is structural: any record with a `results` member bound
/// to a sequence qualifies, tagged or not.
pub fn envelope_results(value: &Value) -> Option<&Vec<Value>> {
    value.as_object()?.get("results").and_then(Value::as_array)
}

/// True when the value is a list envelope.
pub fn is_list_envelope(value: &Value) -> bool {
    envelope_results(value).is_some()
}

/// Add `_meta` (fetched count plus fetch timestamp) to a tagged list
/// envelope, one whose `object` member is exactly `"list"`. Anything
/// else is left untouched. An existing `_meta` is replaced; payload
/// members never use the underscore prefix.
pub fn inject_meta(value: &mut Value) {
    let Some(map) = value.as_object_mut() else {
        return;
    };
    if map.get("object").and_then(Value::as_str) != Some("list") {
        return;
    }
    let Some(count) = map.get("results").and_then(Value::as_array).map(Vec::len) else {
        return;
    };
    map.insert(
        "_meta".to_string(),
        json!({
            "fetched_count": count,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }),
    );
}

/// Re-count `results` into an existing `_meta.fetched_count` after the
/// sequence was truncated. Envelopes without `_meta` are left alone.
pub(crate) fn refresh_fetched_count(envelope: &mut Map<String, Value>) {
    let Some(count) = envelope.get("results").and_then(Value::as_array).map(Vec::len) else {
        return;
    };
    if let Some(meta) = envelope.get_mut("_meta").and_then(Value::as_object_mut) {
        if let Some(fetched) = meta.get_mut("fetched_count") {
            *fetched = Value::from(count);
        }
    }
}

/// Unwrap a record's `results` sequence, discarding the envelope.
/// Values without a `results` sequence pass through unchanged.
pub fn extract_results(value: Value) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };
    match map.remove("results") {
        Some(results @ Value::Array(_)) => results,
        Some(other) => {
            map.insert("results".to_string(), other);
            Value::Object(map)
        }
        None => Value::Object(map),
    }
}
