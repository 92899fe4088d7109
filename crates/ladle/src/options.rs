//! Output format and pipeline options.

/// Output format types supported by the rendering pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON, the default
    #[default]
    Json,
    /// Newline-delimited JSON, one value per line
    Ndjson,
    /// YAML document
    Yaml,
    /// Aligned plain-text table
    Table,
    /// Indented human-readable text
    Text,
}

impl OutputFormat {
    /// Parse format from string
    #[allow(clippy::should_implement_trait)] // Infallible parsing with default, not FromStr semantics
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ndjson" | "jsonl" => OutputFormat::Ndjson,
            "yaml" | "yml" => OutputFormat::Yaml,
            "table" => OutputFormat::Table,
            "text" | "plain" => OutputFormat::Text,
            _ => OutputFormat::Json,
        }
    }

    /// Check if format is machine-readable. Machine-readable output
    /// carries the `_meta` envelope member; human formats drop it.
    pub fn is_machine_readable(&self) -> bool {
        matches!(
            self,
            OutputFormat::Json | OutputFormat::Ndjson | OutputFormat::Yaml
        )
    }
}

impl From<String> for OutputFormat {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

/// Everything the pipeline needs to know about one rendering run.
///
/// The zero value renders pretty JSON with no transformations.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Output format.
    pub format: OutputFormat,
    /// jq-style query expression, applied at render time.
    pub query: Option<String>,
    /// Comma-separated field projection specs.
    pub fields: Option<String>,
    /// JSONPath selection entry.
    pub jsonpath: Option<String>,
    /// Dotted member path to sort the result sequence by.
    pub sort_by: Option<String>,
    /// Reverse the sort ordering.
    pub descending: bool,
    /// Keep at most this many results; zero keeps everything.
    pub limit: usize,
    /// Unwrap a list envelope to its bare `results` sequence.
    pub results_only: bool,
    /// Strip null and empty-container record members.
    pub light: bool,
    /// Compact JSON instead of pretty-printed.
    pub compact: bool,
    /// Treat an empty result set as an error.
    pub fail_empty: bool,
}
