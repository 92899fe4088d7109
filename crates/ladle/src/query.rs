//! jq-style query compilation and evaluation.
//!
//! Expressions are preprocessed (negation unescaping, alias expansion)
//! and compiled once per pipeline run; a compiled query can then be
//! evaluated against any canonical value. Evaluation is streaming: each
//! output the filter produces is handed to an emit callback, so a
//! renderer can write the first emission before the last one exists.

use jaq_core::load::{Arena, File, Loader};
use jaq_core::{compile, load, Compiler, Ctx, Filter, FilterT, Native, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::alias;
use crate::error::{RenderError, RenderResult};

/// Runtime error messages embed offending values; clip them so a huge
/// payload cannot flood the terminal.
const MAX_ERROR_LEN: usize = 256;

const TRUNCATED_HINT: &str = "the expression may have been cut short by the shell; \
     quote it in full with single quotes, or load it from a file with --query-file";

/// A query expression compiled against the standard library.
pub struct CompiledQuery {
    filter: Filter<Native<Val>>,
}

/// Preprocess and compile a query expression.
///
/// `\!` sequences outside string literals are rewritten to `!` (shell
/// history-expansion fallout), then field-access aliases are expanded,
/// then the result is handed to the filter compiler. Compile failures
/// that look like a shell-truncated expression carry a quoting hint.
pub fn compile_query(raw: &str) -> RenderResult<CompiledQuery> {
    let (unescaped, changed) = alias::unescape_negation(raw);
    if changed {
        tracing::warn!("rewrote `\\!` to `!` in query expression");
    }
    let expanded = alias::expand_path_aliases(&unescaped);

    let program = File {
        code: expanded.as_str(),
        path: (),
    };
    let loader = Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = Arena::default();
    let modules = loader.load(&arena, program).map_err(load_error)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(compile_error)?;

    Ok(CompiledQuery { filter })
}

impl CompiledQuery {
    /// Evaluate against one input value, feeding every output to
    /// `emit` in order. Stops at the first runtime or emit error.
    pub fn run(
        &self,
        input: &Value,
        mut emit: impl FnMut(Value) -> RenderResult<()>,
    ) -> RenderResult<()> {
        let inputs = RcIter::new(core::iter::empty());
        let ctx = Ctx::new([], &inputs);
        for output in self.filter.run((ctx, Val::from(input.clone()))) {
            let val = output
                .map_err(|e| RenderError::query_runtime(clip_error_message(&e.to_string())))?;
            emit(Value::from(val))?;
        }
        Ok(())
    }
}

fn load_error(errors: load::Errors<&str, ()>) -> RenderError {
    let mut parts = Vec::new();
    let mut truncated = false;
    for (_, error) in errors {
        match error {
            load::Error::Io(errs) => {
                for (path, message) in errs {
                    parts.push(format!("could not load {path}: {message}"));
                }
            }
            load::Error::Lex(errs) => {
                for (expected, found) in errs {
                    truncated |= found.is_empty();
                    parts.push(expect_message(expected.as_str(), found));
                }
            }
            load::Error::Parse(errs) => {
                for (expected, found) in errs {
                    truncated |= found.is_empty();
                    parts.push(expect_message(expected.as_str(), found));
                }
            }
        }
    }
    let hint = truncated.then(|| TRUNCATED_HINT.to_string());
    RenderError::compile(parts.join("; "), hint)
}

fn compile_error(errors: compile::Errors<&str, ()>) -> RenderError {
    let mut parts = Vec::new();
    for (_, errs) in errors {
        for (name, undefined) in errs {
            parts.push(format!("undefined {} `{}`", undefined.as_str(), name));
        }
    }
    RenderError::compile(parts.join("; "), None)
}

fn expect_message(expected: &str, found: &str) -> String {
    if found.is_empty() {
        format!("expected {expected}, found end of input")
    } else {
        format!("expected {expected}, found `{}`", clip_found(found))
    }
}

/// First 24 characters of the offending input, newlines flattened.
fn clip_found(found: &str) -> String {
    let mut clipped: String = found
        .chars()
        .take(24)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if found.chars().count() > 24 {
        clipped.push_str("...");
    }
    clipped
}

fn clip_error_message(message: &str) -> String {
    if message.len() <= MAX_ERROR_LEN {
        return message.to_string();
    }
    // Oversized messages usually embed the offending value in
    // parentheses; cut there when possible.
    if let Some(cut) = message.find('(') {
        let head = message[..cut].trim_end();
        if !head.is_empty() && head.len() <= MAX_ERROR_LEN {
            return format!("{head}...");
        }
    }
    let mut end = MAX_ERROR_LEN;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}
