//! Explicit add and update operations.

use super::{Document, Provenance};
use crate::error::{Error, Result};
use crate::infer;
use crate::value::{Value, ValueType};

impl Document {
    /// Add `name` with raw text, running type inference.
    ///
    /// Fails with `DuplicateDefinition` when the name already holds a
    /// typed value; a still-Unknown slot is filled in place.
    pub fn add(&mut self, name: &str, raw: &str) -> Result<usize> {
        let index = self.store(name)?;
        self.record_mut(index).assign(raw, Provenance::Default);
        Ok(index)
    }

    /// Add `name` with an already typed value.
    pub fn add_value(&mut self, name: &str, value: Value) -> Result<usize> {
        let index = self.store(name)?;
        self.record_mut(index).assign_value(value, Provenance::Default);
        Ok(index)
    }

    /// Overwrite the raw text of an existing record.
    ///
    /// A typed record keeps its type: the text must parse as that type. Its
    /// size may only change when the record is dynamic-size, or when a
    /// scalar is replaced by another scalar.
    pub fn update(&mut self, name: &str, raw: &str) -> Result<()> {
        let index = self.find(name).ok_or_else(|| Error::not_found(name))?;
        let record = self.record_mut(index);
        let expected = record.value_type();

        let value = infer::parse_as(raw, expected).ok_or_else(|| Error::TypeMismatch {
            name: name.to_string(),
            expected,
            found: infer::infer(raw).value_type(),
        })?;

        if expected != ValueType::Unknown {
            let resizable = record.dynamic_size || (!record.value.is_array() && !value.is_array());
            if !resizable && value.size() != record.size() {
                return Err(Error::SizeMismatch {
                    name: name.to_string(),
                    expected: record.size(),
                    found: value.size(),
                });
            }
        }

        log::debug!("update {} = {}", name, raw.trim());
        record.raw = raw.trim().to_string();
        record.value = value;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_duplicate() {
        let mut doc = Document::new();
        doc.add("x", "1").unwrap();
        let err = doc.add("x", "2").unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition { .. }));
        assert_eq!(doc.get_integer("x").unwrap(), 1);
    }

    #[test]
    fn test_add_fills_unknown_slot() {
        let mut doc = Document::new();
        doc.store("x").unwrap();
        doc.add("x", "hello").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get_string("x").unwrap(), "hello");
    }

    #[test]
    fn test_add_value_keeps_reals_exact() {
        let mut doc = Document::new();
        doc.add_value("pi", Value::Real(std::f64::consts::PI)).unwrap();
        assert_eq!(doc.get_real("pi").unwrap(), std::f64::consts::PI);
        assert_eq!(
            crate::infer::infer(&doc.record(0).unwrap().raw),
            Value::Real(std::f64::consts::PI)
        );
    }

    #[test]
    fn test_update_keeps_type() {
        let mut doc = Document::new();
        doc.add("dt", "1.5").unwrap();
        // Integer text is accepted for a real record
        doc.update("dt", "2").unwrap();
        assert_eq!(doc.get_real("dt").unwrap(), 2.0);

        let err = doc.update("dt", "abc").unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: ValueType::Real,
                found: ValueType::String,
                ..
            }
        ));
    }

    #[test]
    fn test_update_size_rules() {
        let mut doc = Document::new();
        doc.add("fixed", "[1, 2]").unwrap();
        assert!(matches!(
            doc.update("fixed", "[1, 2, 3]"),
            Err(Error::SizeMismatch { .. })
        ));
        doc.update("fixed", "[3, 4]").unwrap();
        assert_eq!(doc.get_integer_array("fixed", 2).unwrap(), vec![3, 4]);

        let idx = doc.add("grow", "[1]").unwrap();
        doc.record_mut(idx).dynamic_size = true;
        doc.update("grow", "1, 2, 3").unwrap();
        assert_eq!(doc.get_integer_array("grow", 8).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_update_unknown_record_infers() {
        let mut doc = Document::new();
        doc.store("later").unwrap();
        doc.update("later", "true").unwrap();
        assert!(doc.get_boolean("later").unwrap());
    }

    #[test]
    fn test_update_missing() {
        let mut doc = Document::new();
        assert!(doc.update("ghost", "1").unwrap_err().is_not_found());
    }
}
