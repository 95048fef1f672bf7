//! Configuration file reader for a YAML subset.
//!
//! A document is read line by line into a flat store of typed values.
//! Nesting becomes part of the variable name: categories are joined with
//! `%`, so `grid:` / `  nx: 144` is stored as `grid%nx`.
//!
//! Supported input:
//!
//! - `key: value` scalars and `key: [a, b]` flow arrays
//! - `key:` category headers, nested by indentation column
//! - `- value` block sequences, collapsed into one array
//! - `key: &name` anchors and `<<: *name` merge keys (local keys win)
//! - `#` and `;` comments outside quotes
//!
//! Values are typed from their text alone: integer, real, boolean or
//! string, scalar or array.
//!
//! ```
//! let mut doc = fyconf::from_str(
//!     "defaults: &d\n  timeout: 30\n  retries: 3\nsvc:\n  <<: *d\n  timeout: 60\n",
//! )
//! .unwrap();
//! assert_eq!(doc.get_integer("svc%timeout").unwrap(), 60);
//! assert_eq!(doc.get_integer("svc%retries").unwrap(), 3);
//! ```
//!
//! # Module Organization
//!
//! - [`store`]: the variable store (`Document`, `VariableRecord`)
//! - [`value`]: typed payloads
//! - [`infer`]: type inference from raw text
//! - [`parser`]: line classification and category tracking
//! - [`anchor`]: merge-key resolution
//! - [`sink`]: failure reporting
//! - [`config`]: parser and store settings
//! - [`logging`]: optional logger setup for applications
//! - [`error`]: error type

pub mod anchor;
pub mod config;
pub mod error;
pub mod infer;
pub mod logging;
pub mod parser;
pub mod sink;
pub mod store;
pub mod value;

use std::io::BufRead;
use std::path::Path;

pub use config::Config;
pub use error::{Error, Result};
pub use parser::Parser;
pub use sink::{FailureSink, Location, LogSink};
pub use store::{Document, Provenance, Scalar, VariableRecord, CATEGORY_SEPARATOR, UNSTORED};
pub use value::{Value, ValueType};

/// Parse a document held in memory with the default configuration.
pub fn from_str(text: &str) -> Result<Document> {
    Parser::default().parse_str(text)
}

/// Parse a document from a buffered reader with the default configuration.
pub fn from_reader<R: BufRead>(reader: R) -> Result<Document> {
    Parser::default().parse_reader(reader)
}

/// Parse a document file with the default configuration.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    Parser::default().parse_file(path)
}
