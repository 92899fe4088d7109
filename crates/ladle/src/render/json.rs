//! JSON and NDJSON rendering.

use std::io::Write;

use serde_json::Value;

use crate::error::RenderResult;
use crate::query::CompiledQuery;

/// Pretty or compact JSON. With a query, every emission renders as its
/// own document in order.
pub(super) fn render_json<W: Write>(
    out: &mut W,
    value: &Value,
    query: Option<&CompiledQuery>,
    compact: bool,
) -> RenderResult<()> {
    match query {
        Some(query) => query.run(value, |emission| write_value(&mut *out, &emission, compact)),
        None => write_value(out, value, compact),
    }
}

/// Newline-delimited JSON. Query emissions take precedence; without a
/// query a sequence renders one element per line and anything else
/// renders as a single line.
pub(super) fn render_ndjson<W: Write>(
    out: &mut W,
    value: &Value,
    query: Option<&CompiledQuery>,
) -> RenderResult<()> {
    if let Some(query) = query {
        return query.run(value, |emission| write_line(&mut *out, &emission));
    }
    match value {
        Value::Array(items) => {
            for item in items {
                write_line(out, item)?;
            }
            Ok(())
        }
        other => write_line(out, other),
    }
}

fn write_value<W: Write>(out: &mut W, value: &Value, compact: bool) -> RenderResult<()> {
    if compact {
        serde_json::to_writer(&mut *out, value)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, value)?;
    }
    out.write_all(b"\n")?;
    Ok(())
}

fn write_line<W: Write>(out: &mut W, value: &Value) -> RenderResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::compile_query;
    use serde_json::json;

    fn rendered(value: &Value, query: Option<&str>, compact: bool) -> String {
        let compiled = query.map(|q| compile_query(q).unwrap());
        let mut out = Vec::new();
        render_json(&mut out, value, compiled.as_ref(), compact).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_pretty_json_ends_with_newline() {
        let text = rendered(&json!({"id": "a"}), None, false);
        assert_eq!(text, "{\n  \"id\": \"a\"\n}\n");
    }

    #[test]
    fn test_compact_json() {
        let text = rendered(&json!({"id": "a", "n": 1}), None, true);
        assert_eq!(text, "{\"id\":\"a\",\"n\":1}\n");
    }

    #[test]
    fn test_query_emissions_render_as_documents() {
        let text = rendered(&json!([1, 2]), Some(".[]"), true);
        assert_eq!(text, "1\n2\n");
    }

    #[test]
    fn test_ndjson_sequence_per_line() {
        let mut out = Vec::new();
        render_ndjson(&mut out, &json!([{"id": "a"}, {"id": "b"}]), None).unwrap();
        assert_eq!(out, b"{\"id\":\"a\"}\n{\"id\":\"b\"}\n");
    }

    #[test]
    fn test_ndjson_single_value_one_line() {
        let mut out = Vec::new();
        render_ndjson(&mut out, &json!({"id": "a"}), None).unwrap();
        assert_eq!(out, b"{\"id\":\"a\"}\n");
    }

    #[test]
    fn test_ndjson_query_overrides_per_element_lines() {
        let compiled = compile_query(".[] | .id").unwrap();
        let mut out = Vec::new();
        render_ndjson(
            &mut out,
            &json!([{"id": "a"}, {"id": "b"}]),
            Some(&compiled),
        )
        .unwrap();
        assert_eq!(out, b"\"a\"\n\"b\"\n");
    }
}
