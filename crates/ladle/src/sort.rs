//! Sorting and truncation of result sequences.
//!
//! Both operate on a bare sequence or on a list envelope's `results`
//! member and leave any other shape untouched. Sorting is stable, so
//! elements without the sort key keep their relative order while
//! sinking below elements that have it.

use std::cmp::Ordering;

use chrono::DateTime;
use serde_json::Value;

use crate::alias;
use crate::meta;
use crate::value;

/// Sort the value's result sequence by a dotted member path.
pub fn apply_sort(input: &Value, path: &str, descending: bool) -> Value {
    let normalized = alias::normalize_sort_path(path);
    let segments: Vec<&str> = normalized.split('.').filter(|s| !s.is_empty()).collect();

    let mut sorted = input.clone();
    if let Some(results) = results_mut(&mut sorted) {
        sort_elements(results, &segments, descending);
    }
    sorted
}

/// Truncate the result sequence to at most `limit` elements; zero
/// means unlimited. Envelope counts are refreshed on truncation.
pub fn apply_limit(mut input: Value, limit: usize) -> Value {
    if limit == 0 {
        return input;
    }

    if let Some(obj) = input.as_object_mut() {
        let truncated = match obj.get_mut("results").and_then(Value::as_array_mut) {
            Some(results) if results.len() > limit => {
                results.truncate(limit);
                true
            }
            _ => false,
        };
        if truncated {
            meta::refresh_fetched_count(obj);
        }
        return input;
    }

    if let Some(items) = input.as_array_mut() {
        if items.len() > limit {
            items.truncate(limit);
        }
    }
    input
}

fn results_mut(value: &mut Value) -> Option<&mut Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get_mut("results").and_then(Value::as_array_mut),
        _ => None,
    }
}

fn sort_elements(elements: &mut [Value], segments: &[&str], descending: bool) {
    elements.sort_by(|a, b| {
        let ka = extract(a, segments);
        let kb = extract(b, segments);
        match (ka, kb) {
            (Some(a), Some(b)) => {
                let ordering = compare_values(a, b);
                if descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
            // Keyless elements sink regardless of direction.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

fn extract<'a>(element: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    let mut current = element;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Ordering for sort keys. Strings that both parse as RFC 3339
/// timestamps compare as instants, so offsets are honored; everything
/// else falls back to lexicographic or numeric comparison.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(sa), Value::String(sb)) => {
            match (
                DateTime::parse_from_rfc3339(sa),
                DateTime::parse_from_rfc3339(sb),
            ) {
                (Ok(ta), Ok(tb)) => ta.cmp(&tb),
                _ => sa.cmp(sb),
            }
        }
        (Value::Bool(ba), Value::Bool(bb)) => ba.cmp(bb),
        (Value::Number(na), Value::Number(nb)) => {
            match (na.as_f64(), nb.as_f64()) {
                (Some(fa), Some(fb)) => fa.partial_cmp(&fb).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            }
        }
        _ => value::default_string(a).cmp(&value::default_string(b)),
    }
}
