//! JSONPath selection over canonical values.
//!
//! Entries accept the relaxed forms users actually type: a bare member
//! path (`results[0].id`), a dotted path with leading `.`, or a full
//! `$`-rooted expression. Aliases expand before the path is parsed.

use serde_json::Value;
use serde_json_path::JsonPath;

use crate::alias;
use crate::error::{RenderError, RenderResult};

/// Evaluate a JSONPath entry against a value.
///
/// Exactly one match returns that value; several matches return a
/// sequence of them; zero matches is an error, because an empty
/// selection almost always means a typo in the path.
pub fn select(value: &Value, entry: &str) -> RenderResult<Value> {
    let normalized = normalize_entry(entry);
    let expanded = alias::expand_path_aliases(&normalized);

    let path = JsonPath::parse(&expanded)
        .map_err(|e| RenderError::jsonpath(format!("could not parse `{expanded}`: {e}")))?;

    let matches = path.query(value).all();
    match matches.len() {
        0 => Err(RenderError::jsonpath(format!(
            "no values matched `{expanded}`"
        ))),
        1 => Ok(matches[0].clone()),
        _ => Ok(Value::Array(matches.into_iter().cloned().collect())),
    }
}

/// Root a relaxed entry at `$`.
fn normalize_entry(entry: &str) -> String {
    let trimmed = entry.trim();
    if trimmed.starts_with('$') || trimmed.starts_with('@') {
        trimmed.to_string()
    } else if trimmed.starts_with('.') || trimmed.starts_with('[') {
        format!("${trimmed}")
    } else {
        format!("$.{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("$.a.b", "$.a.b"; "rooted stays")]
    #[test_case(".a.b", "$.a.b"; "leading dot gains root")]
    #[test_case("[0]", "$[0]"; "leading bracket gains root")]
    #[test_case("a.b", "$.a.b"; "bare path gains root and dot")]
    fn test_normalize_entry(input: &str, expected: &str) {
        assert_eq!(normalize_entry(input), expected);
    }

    #[test]
    fn test_entry_preprocessing_idempotent() {
        let once = alias::expand_path_aliases(&normalize_entry("res[*].props.title"));
        let twice = alias::expand_path_aliases(&normalize_entry(&once));
        assert_eq!(twice, once);
        assert_eq!(once, "$.results[*].properties.title");
    }

    #[test]
    fn test_single_match_returns_value() {
        let value = json!({"results": [{"id": "abc"}]});
        assert_eq!(select(&value, "$.results[0].id").unwrap(), json!("abc"));
    }

    #[test]
    fn test_relaxed_entry_with_alias() {
        let value = json!({"results": [{"properties": {"title": "T"}}]});
        assert_eq!(
            select(&value, "results[0].props.title").unwrap(),
            json!("T")
        );
    }

    #[test]
    fn test_multiple_matches_become_sequence() {
        let value = json!({"results": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(
            select(&value, "$.results[*].id").unwrap(),
            json!(["a", "b"])
        );
    }

    #[test]
    fn test_no_match_is_error() {
        let value = json!({"results": []});
        let err = select(&value, "$.results[*].id").unwrap_err();
        assert!(matches!(err, RenderError::JsonPath(_)));
        assert!(err.to_string().contains("no values matched"));
    }

    #[test]
    fn test_unparseable_entry_is_error() {
        let err = select(&json!({}), "$.[===").unwrap_err();
        assert!(matches!(err, RenderError::JsonPath(_)));
    }
}
