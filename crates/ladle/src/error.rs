//! Error taxonomy for the transformation and rendering pipeline.

use thiserror::Error;

/// Errors surfaced while transforming or rendering a value.
///
/// Everything except JSON/YAML encoding and sink I/O is a user-facing
/// configuration or data problem carrying an actionable message; see
/// [`RenderError::is_user_error`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// Malformed field spec, path, or renderer input.
    #[error("{0}")]
    Validation(String),

    /// The query expression failed to parse or compile.
    #[error("Invalid query: {message}{}", format_hint(.hint))]
    Compile {
        /// Flattened parser/compiler diagnostics.
        message: String,
        /// Extra guidance, set when the expression looks truncated.
        hint: Option<String>,
    },

    /// The query failed against this particular value mid-iteration.
    #[error("Query evaluation failed: {0}")]
    QueryRuntime(String),

    /// JSONPath parse failure, or a path that matched nothing.
    #[error("JSONPath failed: {0} (example: '$.results[0].id')")]
    JsonPath(String),

    /// Field or JSONPath selection cannot feed the table renderer.
    #[error("Field and JSONPath selection cannot be combined with table output; render as json, yaml, or text instead")]
    UnsupportedCombination,

    /// Fail-empty was requested and the transformed value has no results.
    #[error("No results")]
    Empty,

    /// Serialization into or out of canonical JSON failed.
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding failure.
    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Sink write failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_hint(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!("\nhint: {hint}"),
        None => String::new(),
    }
}

/// Specialized Result type for pipeline operations.
pub type RenderResult<T> = Result<T, RenderError>;

impl RenderError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a query compile error, optionally hinted
    pub fn compile(message: impl Into<String>, hint: Option<String>) -> Self {
        Self::Compile {
            message: message.into(),
            hint,
        }
    }

    /// Create a query runtime error
    pub fn query_runtime(msg: impl Into<String>) -> Self {
        Self::QueryRuntime(msg.into())
    }

    /// Create a JSONPath error
    pub fn jsonpath(msg: impl Into<String>) -> Self {
        Self::JsonPath(msg.into())
    }

    /// Create a fail-empty error
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Check if this error is a recoverable user mistake (bad flags,
    /// bad expression, empty result) rather than an internal failure.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Json(_) | Self::Yaml(_) | Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_without_hint() {
        let err = RenderError::compile("expected `]`, found end of input", None);
        assert_eq!(
            err.to_string(),
            "Invalid query: expected `]`, found end of input"
        );
    }

    #[test]
    fn test_compile_error_with_hint() {
        let err = RenderError::compile("expected `]`", Some("quote the expression".to_string()));
        let rendered = err.to_string();
        assert!(rendered.starts_with("Invalid query: expected `]`"));
        assert!(rendered.ends_with("hint: quote the expression"));
    }

    #[test]
    fn test_jsonpath_error_carries_example() {
        let err = RenderError::jsonpath("no values matched `$.missing`");
        assert!(err.to_string().contains("$.results[0].id"));
    }

    #[test]
    fn test_user_error_classification() {
        assert!(RenderError::validation("bad spec").is_user_error());
        assert!(RenderError::empty().is_user_error());
        assert!(RenderError::UnsupportedCombination.is_user_error());

        let io = RenderError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));
        assert!(!io.is_user_error());
    }
}
