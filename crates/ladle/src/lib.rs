//! # Ladle
//!
//! Structured output shaping for knowledge-base API responses: one
//! fixed pipeline that normalizes any serializable value, transforms
//! it (query, projection, JSONPath, sort, limit), and renders it as
//! JSON, NDJSON, YAML, a table, or indented text.
//!
//! ```
//! use ladle::{write_output, OutputFormat, RenderOptions};
//! use serde_json::json;
//!
//! let response = json!({
//!     "object": "list",
//!     "results": [{"id": "a"}, {"id": "b"}]
//! });
//!
//! let options = RenderOptions {
//!     format: OutputFormat::Ndjson,
//!     results_only: true,
//!     ..Default::default()
//! };
//!
//! let mut out = Vec::new();
//! write_output(&mut out, &response, &options)?;
//! assert_eq!(out, b"{\"id\":\"a\"}\n{\"id\":\"b\"}\n");
//! # Ok::<(), ladle::RenderError>(())
//! ```

pub mod alias;
mod error;
pub mod fields;
pub mod jsonpath;
pub mod meta;
mod options;
mod pipeline;
pub mod query;
mod render;
pub mod sort;
mod value;

pub use error::{RenderError, RenderResult};
pub use options::{OutputFormat, RenderOptions};
pub use pipeline::write_output;
pub use value::normalize;
