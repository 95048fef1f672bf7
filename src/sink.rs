//! Failure reporting.
//!
//! Every error path of the parser goes through a [`FailureSink`] before the
//! error is returned to the caller.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Position of a failure in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File name or other label of the line source
    pub source: Option<String>,
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}:{}", source, self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

pub trait FailureSink {
    fn report(&self, message: &str, location: Option<&Location>);
}

/// Reports through `log::error!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl FailureSink for LogSink {
    fn report(&self, message: &str, location: Option<&Location>) {
        match location {
            Some(location) => log::error!("{}: {}", location, message),
            None => log::error!("{}", message),
        }
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FailureSink for NullSink {
    fn report(&self, _message: &str, _location: Option<&Location>) {}
}

/// Keeps formatted reports in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    reports: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn messages(&self) -> Vec<String> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl FailureSink for MemorySink {
    fn report(&self, message: &str, location: Option<&Location>) {
        let entry = match location {
            Some(location) => format!("{}: {}", location, message),
            None => message.to_string(),
        };
        match self.reports.lock() {
            Ok(mut reports) => reports.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
