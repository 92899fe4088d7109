//! Renderers for each output format.
//!
//! Every renderer takes the fully transformed canonical value and a
//! sink; by the time control reaches here all validation has happened,
//! so a renderer only fails on sink errors or query evaluation.

mod json;
mod table;
mod text;
mod yaml;

use std::io::Write;

use serde_json::Value;

use crate::error::RenderResult;
use crate::options::{OutputFormat, RenderOptions};
use crate::query::CompiledQuery;

pub(crate) fn render<W: Write>(
    out: &mut W,
    value: &Value,
    options: &RenderOptions,
    query: Option<&CompiledQuery>,
) -> RenderResult<()> {
    match options.format {
        OutputFormat::Json => json::render_json(out, value, query, options.compact),
        OutputFormat::Ndjson => json::render_ndjson(out, value, query),
        OutputFormat::Yaml => yaml::render_yaml(out, value),
        OutputFormat::Table => table::render_table(out, value),
        OutputFormat::Text => text::render_text(out, value),
    }
}

/// Display text for a non-null scalar.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Flatten a rich-text sequence to its concatenated plain text.
///
/// Qualifies when the value is a non-empty sequence whose every
/// element is a record carrying a string `plain_text` member.
pub(crate) fn flatten_rich_text(value: &Value) -> Option<String> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }
    let mut text = String::new();
    for item in items {
        text.push_str(item.as_object()?.get("plain_text")?.as_str()?);
    }
    Some(text)
}
