//! Aligned plain-text tables.
//!
//! Columns are the alphabetically sorted union of the input's
//! displayable members: anything scalar in at least one row, anything
//! that flattens as rich text, plus the allowlisted identity columns.
//! Cells that cannot display print as `-` so rows keep their width.

use std::collections::BTreeSet;
use std::io::Write;

use serde_json::{Map, Value};

use super::{flatten_rich_text, scalar_text};
use crate::error::{RenderError, RenderResult};
use crate::meta;

/// Columns kept even when no row has a scalar under them.
const COLUMN_ALLOWLIST: &[&str] = &["name", "title"];
const MISSING_CELL: &str = "-";
const COLUMN_GAP: &str = "  ";

pub(super) fn render_table<W: Write>(out: &mut W, value: &Value) -> RenderResult<()> {
    if let Value::Array(items) = value {
        return write_records(out, items);
    }
    if let Some(results) = meta::envelope_results(value) {
        return write_records(out, results);
    }
    Err(RenderError::validation(
        "table output needs a sequence of records or a list response",
    ))
}

/// Render records as header plus one aligned row each. An empty slice
/// writes nothing at all, not even the header.
pub(super) fn write_records<W: Write>(out: &mut W, rows: &[Value]) -> RenderResult<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(record) = row.as_object() else {
            return Err(RenderError::validation("table rows must be records"));
        };
        records.push(record);
    }

    let columns = column_union(&records);
    if columns.is_empty() {
        return Ok(());
    }

    let header: Vec<String> = columns.iter().map(|c| c.to_uppercase()).collect();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();

    let mut grid = Vec::with_capacity(records.len());
    for record in &records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| cell_text(record.get(column.as_str())))
            .collect();
        for (width, cell) in widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.chars().count());
        }
        grid.push(row);
    }

    write_row(out, &header, &widths)?;
    for row in &grid {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn column_union(records: &[&Map<String, Value>]) -> Vec<String> {
    let mut columns = BTreeSet::new();
    for record in records {
        for (key, value) in record.iter() {
            if column_qualifies(key, value) {
                columns.insert(key.clone());
            }
        }
    }
    columns.into_iter().collect()
}

fn column_qualifies(key: &str, value: &Value) -> bool {
    COLUMN_ALLOWLIST.contains(&key)
        || scalar_text(value).is_some()
        || flatten_rich_text(value).is_some()
}

fn cell_text(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return MISSING_CELL.to_string();
    };
    if let Some(text) = scalar_text(value) {
        return text;
    }
    if let Some(text) = flatten_rich_text(value) {
        return text;
    }
    if let Some(text) = flatten_titled_record(value) {
        return text;
    }
    MISSING_CELL.to_string()
}

/// Title-property shape: a record whose `title` or `rich_text` member
/// flattens as rich text.
fn flatten_titled_record(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    ["title", "rich_text"]
        .iter()
        .find_map(|key| map.get(*key).and_then(flatten_rich_text))
}

/// Pad every column but the last to its width, two spaces between.
fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> RenderResult<()> {
    let mut line = String::new();
    let last = cells.len().saturating_sub(1);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        line.push_str(cell);
        if i < last {
            for _ in cell.chars().count()..*width {
                line.push(' ');
            }
            line.push_str(COLUMN_GAP);
        }
    }
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}
