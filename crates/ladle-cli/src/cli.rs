use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ladle::{OutputFormat, RenderOptions};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Pretty-printed JSON
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

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Ndjson => OutputFormat::Ndjson,
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

#[derive(Parser)]
#[command(name = "ladle")]
#[command(about = "ladle - shape and render structured API responses")]
#[command(version)]
pub struct Cli {
    /// Input file (reads stdin if omitted)
    pub input: Option<PathBuf>,

    /// Set output format
    #[arg(short = 'f', long, value_enum, default_value = "json")]
    pub format: FormatArg,

    /// jq-style query expression, applied by json and ndjson output
    /// Field aliases like .props and .rt expand before compilation
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Read the query expression from a file instead
    #[arg(long, conflicts_with = "query", value_name = "FILE")]
    pub query_file: Option<PathBuf>,

    /// Comma-separated field projections
    /// Example: --fields "id,name=props.Name.title[0].pt"
    #[arg(long)]
    pub fields: Option<String>,

    /// JSONPath selection (bare paths are rooted at $)
    /// Example: --jsonpath '$.results[*].id'
    #[arg(long)]
    pub jsonpath: Option<String>,

    /// Sort results by a dotted member path (RFC 3339 strings compare
    /// as timestamps)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Reverse the sort ordering
    #[arg(long, requires = "sort_by")]
    pub descending: bool,

    /// Keep at most this many results (0 keeps everything)
    #[arg(short = 'n', long, default_value = "0")]
    pub limit: usize,

    /// Output the bare results sequence without the envelope
    #[arg(long)]
    pub results_only: bool,

    /// Drop null and empty members from records
    #[arg(long)]
    pub light: bool,

    /// Compact JSON instead of pretty-printed
    #[arg(short = 'c', long)]
    pub compact: bool,

    /// Exit with an error when the result set is empty
    #[arg(long)]
    pub fail_empty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve flags (and the query file, if any) into pipeline options.
    pub fn to_options(&self) -> anyhow::Result<RenderOptions> {
        let query = match (&self.query, &self.query_file) {
            (Some(q), _) => Some(q.clone()),
            (None, Some(path)) => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("could not read query file {}", path.display()))?
                    .trim()
                    .to_string(),
            ),
            (None, None) => None,
        };

        Ok(RenderOptions {
            format: self.format.into(),
            query,
            fields: self.fields.clone(),
            jsonpath: self.jsonpath.clone(),
            sort_by: self.sort_by.clone(),
            descending: self.descending,
            limit: self.limit,
            results_only: self.results_only,
            light: self.light,
            compact: self.compact,
            fail_empty: self.fail_empty,
        })
    }
}
