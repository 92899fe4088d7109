//! Indented human-readable text.
//!
//! Records render as `key: value` lines with two-space indents per
//! nesting level; list envelopes render their results as a table, or
//! their remaining members plus a `No results` line when empty.

use std::io::Write;

use serde_json::{Map, Value};

use super::{scalar_text, table};
use crate::error::RenderResult;
use crate::meta;
use crate::value;

const INDENT: &str = "  ";
const NO_RESULTS: &str = "No results";

pub(super) fn render_text<W: Write>(out: &mut W, value: &Value) -> RenderResult<()> {
    match value {
        Value::Object(map) => {
            if meta::is_list_envelope(value) {
                render_envelope(out, map)
            } else {
                write_record(out, map, 0)
            }
        }
        Value::Array(items) => write_sequence_items(out, items, 0),
        scalar => {
            writeln!(out, "{}", scalar_line(scalar))?;
            Ok(())
        }
    }
}

fn render_envelope<W: Write>(out: &mut W, map: &Map<String, Value>) -> RenderResult<()> {
    let results = map
        .get("results")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if results.is_empty() {
        for (key, value) in map {
            if key == "results" {
                continue;
            }
            write_member(out, key, value, 0)?;
        }
        writeln!(out, "{NO_RESULTS}")?;
        return Ok(());
    }
    table::write_records(out, results)
}

fn write_record<W: Write>(out: &mut W, map: &Map<String, Value>, depth: usize) -> RenderResult<()> {
    for (key, value) in map {
        write_member(out, key, value, depth)?;
    }
    Ok(())
}

fn write_member<W: Write>(
    out: &mut W,
    key: &str,
    value: &Value,
    depth: usize,
) -> RenderResult<()> {
    let pad = INDENT.repeat(depth);
    match value {
        Value::Object(map) if map.is_empty() => writeln!(out, "{pad}{key}: {{}}")?,
        Value::Object(map) => {
            writeln!(out, "{pad}{key}:")?;
            write_record(out, map, depth + 1)?;
        }
        Value::Array(items) if items.is_empty() => writeln!(out, "{pad}{key}: []")?,
        Value::Array(items) if items.iter().all(value::is_scalar) => {
            let joined: Vec<String> = items.iter().map(scalar_line).collect();
            writeln!(out, "{pad}{key}: {}", joined.join(", "))?;
        }
        Value::Array(items) => {
            writeln!(out, "{pad}{key}:")?;
            write_sequence_items(out, items, depth + 1)?;
        }
        scalar => writeln!(out, "{pad}{key}: {}", scalar_line(scalar))?,
    }
    Ok(())
}

fn write_sequence_items<W: Write>(
    out: &mut W,
    items: &[Value],
    depth: usize,
) -> RenderResult<()> {
    let pad = INDENT.repeat(depth);
    for item in items {
        match item {
            Value::Object(map) if !map.is_empty() => {
                writeln!(out, "{pad}-")?;
                write_record(out, map, depth + 1)?;
            }
            Value::Array(inner) if !inner.is_empty() => {
                writeln!(out, "{pad}-")?;
                write_sequence_items(out, inner, depth + 1)?;
            }
            other => writeln!(out, "{pad}- {}", scalar_line(other))?,
        }
    }
    Ok(())
}

/// One-line display for leaves: null prints `-`, empty containers
/// print their JSON shape.
fn scalar_line(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        other => scalar_text(other).unwrap_or_default(),
    }
}
