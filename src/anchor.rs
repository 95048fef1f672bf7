//! Anchor and merge-key resolution.
//!
//! While parsing, keys under an anchor-defining category are tagged with
//! the anchor name and every `<<: *name` line is set aside in a secondary
//! alias document. Once the whole source has been read, [`resolve`] copies
//! each referenced anchor group into the category holding the merge key.
//!
//! Resolution is single-level: copied records carry no anchor tag, so keys
//! a category only inherited are not passed on to categories aliasing it.

use crate::error::{Error, Result};
use crate::store::{path, Document, Provenance, VariableRecord};

/// Marker between the enclosing category and the anchor name in the
/// synthesized name of a deferred merge-key entry.
pub const MERGE_MARKER: &str = "<<*";

/// Name under which a merge key of `category` referencing `anchor` is kept.
pub fn alias_entry_name(category: &str, anchor: &str) -> String {
    path::join(category, &format!("{}{}", MERGE_MARKER, anchor))
}

/// Records of the `anchor` group rebased from `source` onto `destination`.
///
/// Only reads `doc`; whether the copies get inserted is up to the caller.
pub fn anchor_copies(
    doc: &Document,
    anchor: &str,
    source: &str,
    destination: &str,
) -> Vec<VariableRecord> {
    doc.iter()
        .filter(|r| r.anchor_target.as_deref() == Some(anchor))
        .filter_map(|r| {
            path::rebase(&r.name, source, destination).map(|name| r.relocated(name))
        })
        .collect()
}

/// Expand every deferred merge key of `aliases` into `doc`.
///
/// Names already present in `doc` are left alone, so keys defined locally
/// shadow inherited ones. Stops at the first failing group; groups copied
/// before it stay in place.
pub fn resolve(doc: &mut Document, aliases: &Document) -> Result<()> {
    for entry in aliases.iter() {
        let anchor = match entry.alias.as_deref() {
            Some(anchor) => anchor,
            None => continue,
        };
        let line = match entry.provenance {
            Provenance::File { line } => line,
            Provenance::Default => 0,
        };
        let source = doc
            .anchor_category(anchor)
            .ok_or_else(|| Error::parse(line, format!("undefined anchor '*{}'", anchor)))?
            .to_string();

        // Destinations still Unknown are filled in place, typed ones are kept
        let copies: Vec<(Option<usize>, VariableRecord)> =
            anchor_copies(doc, anchor, &source, &entry.category)
                .into_iter()
                .filter_map(|copy| match doc.find(&copy.name) {
                    None => Some((None, copy)),
                    Some(index) if doc.record(index).map_or(false, |r| r.value.is_unknown()) => {
                        Some((Some(index), copy))
                    }
                    Some(_) => None,
                })
                .collect();
        let appended = copies.iter().filter(|(slot, _)| slot.is_none()).count();

        log::debug!(
            "merge '*{}' ({}) into '{}': {} record(s)",
            anchor,
            source,
            entry.category,
            copies.len()
        );

        doc.reserve(appended).map_err(|e| match e {
            Error::Allocation { message } => Error::Allocation {
                message: format!("expanding '*{}' into '{}': {}", anchor, entry.category, message),
            },
            other => other,
        })?;
        for (slot, copy) in copies {
            match slot {
                Some(index) => *doc.record_mut(index) = copy,
                None => {
                    doc.push(copy)?;
                }
            }
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
