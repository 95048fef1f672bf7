//! Error types for document operations.

use crate::value::ValueType;
use std::io;
use thiserror::Error;

/// Error type for parsing and store operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed line in the source document
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Open or read failure of the line source
    #[error("I/O error at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A name that already holds a typed value was declared again
    #[error("variable '{name}' is already defined")]
    DuplicateDefinition { name: String },

    /// Lookup miss
    #[error("variable '{name}' not found")]
    NotFound { name: String },

    /// Stored type differs from the requested one (no widening)
    #[error("variable '{name}' holds {found} data, {expected} was requested")]
    TypeMismatch {
        name: String,
        expected: ValueType,
        found: ValueType,
    },

    /// Destination capacity is smaller than the stored size
    #[error("variable '{name}' holds {found} element(s), room for {expected} was provided")]
    SizeMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Growth or copy failure
    #[error("allocation failure: {message}")]
    Allocation { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Line number carried by parse and I/O errors.
    pub fn location(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. } | Error::Io { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(name: &str) -> Self {
        Error::NotFound {
            name: name.to_string(),
        }
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(e: std::collections::TryReserveError) -> Self {
        Error::Allocation {
            message: e.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
