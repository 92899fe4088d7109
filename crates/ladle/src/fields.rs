//! Field projection: pluck named paths out of records.
//!
//! A field spec list like `id,title=props.title.rt[0].pt` selects one
//! output member per spec. Paths navigate records by member name and
//! sequences by index; bare names pass through alias expansion, while
//! bracket-quoted names (`['Due Date']`) are taken literally.

use std::collections::HashSet;

use serde_json::Value;

use crate::alias;
use crate::error::{RenderError, RenderResult};

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    /// Record member lookup.
    Field(String),
    /// Sequence element lookup.
    Index(usize),
}

/// A parsed projection: output key plus the path that fills it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Member name in the projected record. Defaults to the spec text
    /// exactly as the user wrote it.
    pub key: String,
    /// Navigation steps from the record root.
    pub path: Vec<PathToken>,
}

/// Parse a comma-separated field spec list.
///
/// Commas inside quotes or brackets do not split. Each spec is either
/// `path` or `key=path`; output keys must be unique.
pub fn parse_field_specs(raw: &str) -> RenderResult<Vec<FieldSpec>> {
    let mut specs = Vec::new();
    let mut seen = HashSet::new();

    for part in split_specs(raw)? {
        let part = part.trim();
        if part.is_empty() {
            return Err(RenderError::validation("field spec must not be empty"));
        }

        let (key, path_text) = match find_unquoted_equals(part) {
            Some(idx) => {
                let key = part[..idx].trim();
                if key.is_empty() {
                    return Err(RenderError::validation(format!(
                        "field spec `{part}` has an empty output key"
                    )));
                }
                (key, part[idx + 1..].trim())
            }
            None => (part, part),
        };

        if !seen.insert(key.to_string()) {
            return Err(RenderError::validation(format!(
                "duplicate output key `{key}` in field specs"
            )));
        }

        specs.push(FieldSpec {
            key: key.to_string(),
            path: parse_path(path_text)?,
        });
    }

    Ok(specs)
}

/// Apply field specs to a value.
///
/// Sequences are projected element-wise; anything else is projected as
/// a single record. Paths that match nothing fill their member with
/// null, so every projected record has the same shape.
pub fn project(value: &Value, specs: &[FieldSpec]) -> Value {
    match value {
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| project_one(item, specs)).collect())
        }
        other => project_one(other, specs),
    }
}

fn project_one(value: &Value, specs: &[FieldSpec]) -> Value {
    let mut record = serde_json::Map::new();
    for spec in specs {
        let found = walk(value, &spec.path).cloned().unwrap_or(Value::Null);
        record.insert(spec.key.clone(), found);
    }
    Value::Object(record)
}

fn walk<'a>(value: &'a Value, path: &[PathToken]) -> Option<&'a Value> {
    let mut current = value;
    for token in path {
        current = match token {
            PathToken::Field(name) => current.as_object()?.get(name)?,
            PathToken::Index(i) => current.as_array()?.get(*i)?,
        };
    }
    Some(current)
}

/// Split a spec list on commas outside quotes and brackets.
fn split_specs(raw: &str) -> RenderResult<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    parts.push(&raw[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    if quote.is_some() {
        return Err(RenderError::validation("unclosed quote in field spec"));
    }
    parts.push(&raw[start..]);
    Ok(parts)
}

fn find_unquoted_equals(part: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in part.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '=' if depth == 0 => return Some(i),
                _ => {}
            },
        }
    }
    None
}

fn parse_path(text: &str) -> RenderResult<Vec<PathToken>> {
    if text.is_empty() {
        return Err(RenderError::validation("field path must not be empty"));
    }

    let mut tokens = Vec::new();
    // Tolerate a jq-style leading dot.
    let mut rest = text.strip_prefix('.').unwrap_or(text);
    if rest.is_empty() {
        return Err(RenderError::validation(format!(
            "field path `{text}` has no segments"
        )));
    }

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('[') {
            let end = bracket_end(tail, text)?;
            tokens.push(bracket_token(&tail[..end], text)?);
            rest = &tail[end + 1..];
        } else {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            let segment = &rest[..end];
            if segment.is_empty() {
                return Err(RenderError::validation(format!(
                    "field path `{text}` has an empty segment"
                )));
            }
            if segment.contains(']') {
                return Err(RenderError::validation(format!(
                    "field path `{text}` has a stray `]`"
                )));
            }
            tokens.push(bare_token(segment, text)?);
            rest = &rest[end..];
        }

        // Between segments: `.` before a name, optional before `[`.
        if let Some(tail) = rest.strip_prefix('.') {
            if tail.is_empty() {
                return Err(RenderError::validation(format!(
                    "field path `{text}` ends with `.`"
                )));
            }
            rest = tail;
        } else if !rest.is_empty() && !rest.starts_with('[') {
            return Err(RenderError::validation(format!(
                "field path `{text}` expects `.` or `[` after a segment"
            )));
        }
    }

    Ok(tokens)
}

fn bracket_end(tail: &str, path: &str) -> RenderResult<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in tail.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                ']' => return Ok(i),
                _ => {}
            },
        }
    }
    Err(RenderError::validation(format!(
        "field path `{path}` has an unclosed `[`"
    )))
}

fn bracket_token(content: &str, path: &str) -> RenderResult<PathToken> {
    if let Some(inner) = strip_matching_quotes(content) {
        return Ok(PathToken::Field(inner.to_string()));
    }
    if content.is_empty() {
        return Err(RenderError::validation(format!(
            "field path `{path}` has an empty `[]`"
        )));
    }
    content
        .parse::<usize>()
        .map(PathToken::Index)
        .map_err(|_| {
            RenderError::validation(format!(
                "field path `{path}`: `[{content}]` must be a numeric index or quoted key"
            ))
        })
}

fn strip_matching_quotes(content: &str) -> Option<&str> {
    let first = content.chars().next()?;
    if (first == '\'' || first == '"') && content.len() >= 2 && content.ends_with(first) {
        Some(&content[1..content.len() - 1])
    } else {
        None
    }
}

fn bare_token(segment: &str, path: &str) -> RenderResult<PathToken> {
    if segment.chars().all(|c| c.is_ascii_digit()) {
        return segment.parse::<usize>().map(PathToken::Index).map_err(|_| {
            RenderError::validation(format!(
                "field path `{path}`: index `{segment}` is out of range"
            ))
        });
    }
    Ok(PathToken::Field(
        alias::canonicalize_token(segment).to_string(),
    ))
}
