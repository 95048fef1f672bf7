//! Merging two documents.

use super::{sort, Document};
use crate::error::Result;

impl Document {
    /// Combine `first` and `second` into a new sorted document.
    ///
    /// Both inputs are only read. Names present in both take the record of
    /// `second`; names unique to either input are kept. Anchor definitions
    /// are combined the same way.
    pub fn merge(first: &Document, second: &Document) -> Result<Document> {
        let mut result = Document::with_config(first.config.clone());
        result.reserve(first.len() + second.len())?;
        result.records.extend(first.records.iter().cloned());
        result.sort();

        let mut added = Vec::new();
        for record in second.iter() {
            match sort::binary_search(&result.records, &record.name) {
                Some(index) => {
                    log::debug!("merge: '{}' overridden by second document", record.name);
                    result.records[index] = record.clone();
                }
                None => added.push(record.clone()),
            }
        }
        result.records.extend(added);

        result.anchors = first.anchors.clone();
        for (anchor, category) in &second.anchors {
            result.anchors.insert(anchor.clone(), category.clone());
        }

        result.sort();
        Ok(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
