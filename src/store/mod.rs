//! Variable store.
//!
//! A `Document` is a flat, growable array of uniquely named records. Names
//! are full category paths joined with [`CATEGORY_SEPARATOR`]. Lookups use
//! binary search once the document has been sorted and a linear scan
//! otherwise.
//!
//! # Module Organization
//!
//! - [`path`]: category path helpers
//! - [`sort`]: partition sort and name search
//! - [`query`]: typed getters, defaults, category listings
//! - [`mutation`]: explicit add and update
//! - [`merge`]: merging two documents into a new one

mod merge;
mod mutation;
pub mod path;
mod query;
pub(crate) mod sort;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::infer;
use crate::value::{Value, ValueType};
use indexmap::IndexMap;
use std::fmt;

pub use path::CATEGORY_SEPARATOR;
pub use query::Scalar;

/// Raw text of a record that has not been assigned any data.
pub const UNSTORED: &str = "__UNSTORED__";

/// Where a record's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Supplied by the program (explicit add, add-get default)
    Default,
    /// Read from a document line
    File { line: usize },
}

/// One named value.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRecord {
    /// Enclosing category path, `""` at root
    pub category: String,
    /// Full name: category, separator, leaf key
    pub name: String,
    /// Last raw text assigned, or [`UNSTORED`]
    pub raw: String,
    pub value: Value,
    /// Array length is allowed to differ from its declared default
    pub dynamic_size: bool,
    /// Anchor defined by an enclosing category
    pub anchor_target: Option<String>,
    /// Anchor referenced by a deferred merge-key entry
    pub alias: Option<String>,
    pub provenance: Provenance,
    used: bool,
}

impl VariableRecord {
    pub fn new(name: &str) -> Self {
        VariableRecord {
            category: path::category_of(name).to_string(),
            name: name.to_string(),
            raw: UNSTORED.to_string(),
            value: Value::Unknown,
            dynamic_size: false,
            anchor_target: None,
            alias: None,
            provenance: Provenance::Default,
            used: false,
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    pub fn size(&self) -> usize {
        self.value.size()
    }

    /// Typed payload, present iff the type is resolved and data was stored.
    pub fn payload(&self) -> Option<&Value> {
        if self.value.is_unknown() || self.raw == UNSTORED {
            None
        } else {
            Some(&self.value)
        }
    }

    /// Number of categories enclosing this record.
    pub fn depth(&self) -> usize {
        path::depth(&self.name)
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Assign raw text and run type inference on it.
    pub(crate) fn assign(&mut self, raw: &str, provenance: Provenance) {
        let raw = raw.trim();
        self.value = infer::infer(raw);
        self.raw = raw.to_string();
        self.provenance = provenance;
    }

    /// Assign block sequence items, one element each. The raw text keeps
    /// the items comma-joined for listings.
    pub(crate) fn assign_items(&mut self, items: &[String], provenance: Provenance) {
        self.value = infer::infer_items(items);
        self.raw = items
            .iter()
            .map(|item| item.trim())
            .collect::<Vec<_>>()
            .join(",");
        self.provenance = provenance;
    }

    /// Copy of this record under another full name, without anchor tag or
    /// use mark.
    pub(crate) fn relocated(&self, name: String) -> VariableRecord {
        VariableRecord {
            category: path::category_of(&name).to_string(),
            name,
            raw: self.raw.clone(),
            value: self.value.clone(),
            dynamic_size: self.dynamic_size,
            anchor_target: None,
            alias: None,
            provenance: self.provenance,
            used: false,
        }
    }

    /// Assign an already typed value.
    pub(crate) fn assign_value(&mut self, value: Value, provenance: Provenance) {
        self.raw = if value.is_unknown() {
            UNSTORED.to_string()
        } else {
            value.to_string()
        };
        self.value = value;
        self.provenance = provenance;
    }
}

/// In-memory result of one parse.
#[derive(Debug, Clone)]
pub struct Document {
    records: Vec<VariableRecord>,
    sorted: bool,
    /// Anchor name to the category that defines it
    anchors: IndexMap<String, String>,
    config: Config,
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Document::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Document {
            records: Vec::new(),
            sorted: false,
            anchors: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// Records in their current order (insertion order until sorted).
    pub fn iter(&self) -> std::slice::Iter<'_, VariableRecord> {
        self.records.iter()
    }

    pub fn record(&self, index: usize) -> Option<&VariableRecord> {
        self.records.get(index)
    }

    /// Index of `name`, by binary search when sorted.
    pub fn find(&self, name: &str) -> Option<usize> {
        if self.sorted {
            sort::binary_search(&self.records, name)
        } else {
            sort::linear_search(&self.records, name)
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Reserve a slot for `name`.
    ///
    /// Appends an Unknown record when the name is absent, and reuses the
    /// existing slot while it is still Unknown.
    pub fn store(&mut self, name: &str) -> Result<usize> {
        if let Some(index) = self.find(name) {
            if !self.records[index].value.is_unknown() {
                return Err(Error::DuplicateDefinition {
                    name: name.to_string(),
                });
            }
            return Ok(index);
        }
        self.push(VariableRecord::new(name))
    }

    /// Look up `name`, checking its type and that it fits in `capacity`
    /// elements. Marks the record as used.
    pub fn get(
        &mut self,
        name: &str,
        expected: ValueType,
        capacity: usize,
    ) -> Result<&VariableRecord> {
        let index = self.find(name).ok_or_else(|| Error::not_found(name))?;
        let record = &mut self.records[index];
        let found = record.value_type();
        if found != expected {
            return Err(Error::TypeMismatch {
                name: name.to_string(),
                expected,
                found,
            });
        }
        if record.size() > capacity {
            return Err(Error::SizeMismatch {
                name: name.to_string(),
                expected: capacity,
                found: record.size(),
            });
        }
        record.used = true;
        Ok(record)
    }

    /// Sort by full name; subsequent lookups use binary search.
    pub fn sort(&mut self) {
        sort::sort_records(&mut self.records);
        self.sorted = true;
    }

    /// Drop every record and anchor definition.
    pub fn cleanup(&mut self) {
        self.records.clear();
        self.anchors.clear();
        self.sorted = false;
    }

    /// Category that defined `anchor`, if any.
    pub fn anchor_category(&self, anchor: &str) -> Option<&str> {
        self.anchors.get(anchor).map(String::as_str)
    }

    pub fn anchors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.anchors.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    pub(crate) fn define_anchor(&mut self, anchor: &str, category: &str) {
        self.anchors.insert(anchor.to_string(), category.to_string());
    }

    pub(crate) fn record_mut(&mut self, index: usize) -> &mut VariableRecord {
        &mut self.records[index]
    }

    /// Make room for `additional` records, doubling with a floor of the
    /// configured initial capacity.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<()> {
        let needed = self.records.len() + additional;
        let capacity = self.records.capacity();
        if needed > capacity {
            let target = needed
                .max(capacity.saturating_mul(2))
                .max(self.config.initial_capacity);
            self.records.try_reserve_exact(target - self.records.len())?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_initial_capacity(&mut self, capacity: usize) {
        self.config.initial_capacity = capacity;
    }

    pub(crate) fn push(&mut self, record: VariableRecord) -> Result<usize> {
        self.reserve(1)?;
        self.records.push(record);
        self.sorted = false;
        Ok(self.records.len() - 1)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a VariableRecord;
    type IntoIter = std::slice::Iter<'a, VariableRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Debug listing: one `name = value` line per record, current order.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            match record.payload() {
                Some(value) => writeln!(f, "{} = {}", record.name, value)?,
                None => writeln!(f, "{} = {}", record.name, UNSTORED)?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
