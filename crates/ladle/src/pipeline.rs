//! The fixed transformation pipeline behind [`write_output`].
//!
//! Stage order is part of the output contract: normalize, inject
//! `_meta` (machine formats only), strip empties, sort, limit, unwrap
//! results, project fields, apply JSONPath, check fail-empty, render.
//! Expressions are parsed and compiled up front so a bad flag can
//! never leave partial output in the sink.

use std::io::Write;

use serde::Serialize;

use crate::error::{RenderError, RenderResult};
use crate::fields::{self, FieldSpec};
use crate::jsonpath;
use crate::meta;
use crate::options::{OutputFormat, RenderOptions};
use crate::query::{self, CompiledQuery};
use crate::render;
use crate::sort;
use crate::value;

/// Transform a domain value per `options` and render it into `out`.
///
/// Nothing is written until every expression in the options has parsed
/// and compiled; after that, the only failures are query evaluation,
/// JSONPath selection, fail-empty, and the sink itself.
pub fn write_output<T: Serialize + ?Sized, W: Write>(
    out: &mut W,
    input: &T,
    options: &RenderOptions,
) -> RenderResult<()> {
    let plan = Plan::prepare(options)?;

    let mut value = value::normalize(input)?;
    tracing::debug!(format = ?options.format, limit = options.limit, "rendering value");

    if options.format.is_machine_readable() {
        meta::inject_meta(&mut value);
    }
    if options.light {
        value = value::strip_empty(value);
    }
    if let Some(path) = options.sort_by.as_deref() {
        value = sort::apply_sort(&value, path, options.descending);
    }
    value = sort::apply_limit(value, options.limit);
    if options.results_only {
        value = meta::extract_results(value);
    }
    if let Some(specs) = plan.field_specs.as_deref() {
        value = fields::project(&value, specs);
    }
    if let Some(entry) = options.jsonpath.as_deref() {
        value = jsonpath::select(&value, entry)?;
    }
    if options.fail_empty && value::is_structurally_empty(&value) {
        return Err(RenderError::empty());
    }

    render::render(out, &value, options, plan.query.as_ref())
}

/// Pre-validated expression state for one run.
struct Plan {
    field_specs: Option<Vec<FieldSpec>>,
    query: Option<CompiledQuery>,
}

impl Plan {
    fn prepare(options: &RenderOptions) -> RenderResult<Self> {
        // Table cells come straight from record members; reshaped
        // values have nothing to align.
        if options.format == OutputFormat::Table
            && (options.fields.is_some() || options.jsonpath.is_some())
        {
            return Err(RenderError::UnsupportedCombination);
        }

        let field_specs = options
            .fields
            .as_deref()
            .map(fields::parse_field_specs)
            .transpose()?;

        let query = options
            .query
            .as_deref()
            .map(query::compile_query)
            .transpose()?;

        if query.is_some() && !consumes_query(options.format) {
            tracing::debug!(format = ?options.format, "query ignored by this output format");
        }

        Ok(Self { field_specs, query })
    }
}

fn consumes_query(format: OutputFormat) -> bool {
    matches!(format, OutputFormat::Json | OutputFormat::Ndjson)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(format: OutputFormat) -> RenderOptions {
        RenderOptions {
            format,
            ..Default::default()
        }
    }

    #[test]
    fn test_table_with_fields_fails_before_writing() {
        let options = RenderOptions {
            fields: Some("id".to_string()),
            ..opts(OutputFormat::Table)
        };
        let mut out = Vec::new();
        let err = write_output(&mut out, &json!([{"id": "a"}]), &options).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedCombination));
        assert!(out.is_empty());
    }

    #[test]
    fn test_bad_query_fails_before_writing() {
        let options = RenderOptions {
            query: Some("select(".to_string()),
            ..opts(OutputFormat::Json)
        };
        let mut out = Vec::new();
        let err = write_output(&mut out, &json!({"id": "a"}), &options).unwrap_err();
        assert!(matches!(err, RenderError::Compile { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_bad_query_fails_even_when_format_ignores_it() {
        let options = RenderOptions {
            query: Some("nonsense_filter".to_string()),
            ..opts(OutputFormat::Yaml)
        };
        let mut out = Vec::new();
        assert!(write_output(&mut out, &json!({}), &options).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_meta_injected_for_machine_formats_only() {
        let envelope = json!({"object": "list", "results": [{"id": "a"}]});

        let mut out = Vec::new();
        write_output(&mut out, &envelope, &opts(OutputFormat::Json)).unwrap();
        let machine = String::from_utf8(out).unwrap();
        assert!(machine.contains("_meta"));
        assert!(machine.contains("fetched_count"));

        let mut out = Vec::new();
        write_output(&mut out, &envelope, &opts(OutputFormat::Table)).unwrap();
        let human = String::from_utf8(out).unwrap();
        assert!(!human.contains("_meta"));
    }

    #[test]
    fn test_sort_runs_before_limit() {
        let input = json!([
            {"id": "c", "rank": 3},
            {"id": "a", "rank": 1},
            {"id": "b", "rank": 2}
        ]);
        let options = RenderOptions {
            sort_by: Some("rank".to_string()),
            limit: 1,
            compact: true,
            ..opts(OutputFormat::Json)
        };
        let mut out = Vec::new();
        write_output(&mut out, &input, &options).unwrap();
        assert_eq!(out, b"[{\"id\":\"a\",\"rank\":1}]\n");
    }

    #[test]
    fn test_fail_empty_checks_transformed_value() {
        let envelope = json!({"object": "list", "results": []});
        let options = RenderOptions {
            fail_empty: true,
            results_only: true,
            ..opts(OutputFormat::Json)
        };
        let mut out = Vec::new();
        let err = write_output(&mut out, &envelope, &options).unwrap_err();
        assert!(matches!(err, RenderError::Empty));
        assert!(out.is_empty());
    }
}
