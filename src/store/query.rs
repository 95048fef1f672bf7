//! Typed read access, defaults and category listings.

use super::{path, Document, Provenance, VariableRecord};
use crate::error::{Error, Result};
use crate::value::{Value, ValueType};
use indexmap::IndexSet;

// =============================================================================
// Element Types
// =============================================================================

/// Rust types that can be read from and stored into a record.
pub trait Scalar: Sized + Clone {
    const TYPE: ValueType;

    /// Elements of `value`, scalar values giving a single element.
    fn extract(value: &Value) -> Option<Vec<Self>>;

    fn to_scalar(self) -> Value;

    fn to_array(items: Vec<Self>) -> Value;
}

impl Scalar for i64 {
    const TYPE: ValueType = ValueType::Integer;

    fn extract(value: &Value) -> Option<Vec<Self>> {
        value.as_integers()
    }

    fn to_scalar(self) -> Value {
        Value::Integer(self)
    }

    fn to_array(items: Vec<Self>) -> Value {
        Value::IntegerArray(items)
    }
}

impl Scalar for f64 {
    const TYPE: ValueType = ValueType::Real;

    fn extract(value: &Value) -> Option<Vec<Self>> {
        value.as_reals()
    }

    fn to_scalar(self) -> Value {
        Value::Real(self)
    }

    fn to_array(items: Vec<Self>) -> Value {
        Value::RealArray(items)
    }
}

impl Scalar for bool {
    const TYPE: ValueType = ValueType::Boolean;

    fn extract(value: &Value) -> Option<Vec<Self>> {
        value.as_booleans()
    }

    fn to_scalar(self) -> Value {
        Value::Boolean(self)
    }

    fn to_array(items: Vec<Self>) -> Value {
        Value::BooleanArray(items)
    }
}

impl Scalar for String {
    const TYPE: ValueType = ValueType::String;

    fn extract(value: &Value) -> Option<Vec<Self>> {
        value.as_strings()
    }

    fn to_scalar(self) -> Value {
        Value::String(self)
    }

    fn to_array(items: Vec<Self>) -> Value {
        Value::StringArray(items)
    }
}

fn elements<T: Scalar>(record: &VariableRecord) -> Result<Vec<T>> {
    T::extract(&record.value).ok_or_else(|| Error::TypeMismatch {
        name: record.name.clone(),
        expected: T::TYPE,
        found: record.value_type(),
    })
}

impl Document {
    // =========================================================================
    // Typed Getters
    // =========================================================================

    /// Read a scalar of type `T`.
    pub fn get_scalar<T: Scalar>(&mut self, name: &str) -> Result<T> {
        let record = self.get(name, T::TYPE, 1)?;
        let mut items = elements::<T>(record)?;
        items.pop().ok_or_else(|| Error::SizeMismatch {
            name: name.to_string(),
            expected: 1,
            found: 0,
        })
    }

    /// Read up to `capacity` elements of type `T`.
    pub fn get_array<T: Scalar>(&mut self, name: &str, capacity: usize) -> Result<Vec<T>> {
        let record = self.get(name, T::TYPE, capacity)?;
        elements(record)
    }

    pub fn get_integer(&mut self, name: &str) -> Result<i64> {
        self.get_scalar(name)
    }

    pub fn get_real(&mut self, name: &str) -> Result<f64> {
        self.get_scalar(name)
    }

    pub fn get_boolean(&mut self, name: &str) -> Result<bool> {
        self.get_scalar(name)
    }

    pub fn get_string(&mut self, name: &str) -> Result<String> {
        self.get_scalar(name)
    }

    pub fn get_integer_array(&mut self, name: &str, capacity: usize) -> Result<Vec<i64>> {
        self.get_array(name, capacity)
    }

    pub fn get_real_array(&mut self, name: &str, capacity: usize) -> Result<Vec<f64>> {
        self.get_array(name, capacity)
    }

    pub fn get_boolean_array(&mut self, name: &str, capacity: usize) -> Result<Vec<bool>> {
        self.get_array(name, capacity)
    }

    pub fn get_string_array(&mut self, name: &str, capacity: usize) -> Result<Vec<String>> {
        self.get_array(name, capacity)
    }

    // =========================================================================
    // Add-Get With Defaults
    // =========================================================================

    /// Read `name`, storing and returning `default` when it is absent.
    pub fn add_get<T: Scalar>(&mut self, name: &str, default: T) -> Result<T> {
        if self.holds_value(name) {
            return self.get_scalar(name);
        }
        let index = self.store(name)?;
        let record = self.record_mut(index);
        record.assign_value(default.clone().to_scalar(), Provenance::Default);
        record.used = true;
        Ok(default)
    }

    /// Array form of [`Document::add_get`].
    ///
    /// Unless `dynamic_size` is set, a stored array must have exactly as
    /// many elements as `default`.
    pub fn add_get_array<T: Scalar>(
        &mut self,
        name: &str,
        default: &[T],
        dynamic_size: bool,
    ) -> Result<Vec<T>> {
        if let Some(index) = self.find(name).filter(|_| self.holds_value(name)) {
            let record = self.record_mut(index);
            if dynamic_size {
                record.dynamic_size = true;
                return self.get_array(name, usize::MAX);
            }
            let found = record.size();
            if found != default.len() {
                return Err(Error::SizeMismatch {
                    name: name.to_string(),
                    expected: default.len(),
                    found,
                });
            }
            return self.get_array(name, default.len());
        }
        let index = self.store(name)?;
        let record = self.record_mut(index);
        record.assign_value(T::to_array(default.to_vec()), Provenance::Default);
        record.dynamic_size = dynamic_size;
        record.used = true;
        Ok(default.to_vec())
    }

    pub fn add_get_integer(&mut self, name: &str, default: i64) -> Result<i64> {
        self.add_get(name, default)
    }

    pub fn add_get_real(&mut self, name: &str, default: f64) -> Result<f64> {
        self.add_get(name, default)
    }

    pub fn add_get_boolean(&mut self, name: &str, default: bool) -> Result<bool> {
        self.add_get(name, default)
    }

    pub fn add_get_string(&mut self, name: &str, default: &str) -> Result<String> {
        self.add_get(name, default.to_string())
    }

    pub fn add_get_integer_array(
        &mut self,
        name: &str,
        default: &[i64],
        dynamic_size: bool,
    ) -> Result<Vec<i64>> {
        self.add_get_array(name, default, dynamic_size)
    }

    pub fn add_get_real_array(
        &mut self,
        name: &str,
        default: &[f64],
        dynamic_size: bool,
    ) -> Result<Vec<f64>> {
        self.add_get_array(name, default, dynamic_size)
    }

    pub fn add_get_boolean_array(
        &mut self,
        name: &str,
        default: &[bool],
        dynamic_size: bool,
    ) -> Result<Vec<bool>> {
        self.add_get_array(name, default, dynamic_size)
    }

    pub fn add_get_string_array(
        &mut self,
        name: &str,
        default: &[String],
        dynamic_size: bool,
    ) -> Result<Vec<String>> {
        self.add_get_array(name, default, dynamic_size)
    }

    /// Stored with a resolved type; Unknown slots count as absent.
    fn holds_value(&self, name: &str) -> bool {
        self.find(name)
            .map_or(false, |index| !self.records[index].value.is_unknown())
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Records in name order, leaving the document untouched.
    pub fn sorted_records(&self) -> Vec<&VariableRecord> {
        let mut records: Vec<&VariableRecord> = self.iter().collect();
        super::sort::quicksort_by(&mut records, &|a: &&VariableRecord, b: &&VariableRecord| {
            a.name.as_bytes().cmp(b.name.as_bytes())
        });
        records
    }

    /// Category depth of `name`, or `None` if it is not stored.
    pub fn category_depth(&self, name: &str) -> Option<usize> {
        self.find(name).map(|_| path::depth(name))
    }

    /// Distinct categories, including every enclosing level, in order of
    /// first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for record in self.iter() {
            let category = record.category.as_str();
            let mut end = 0;
            for part in path::split_path(category) {
                if part.is_empty() {
                    break;
                }
                end += part.len();
                seen.insert(&category[..end]);
                end += super::CATEGORY_SEPARATOR.len_utf8();
            }
        }
        seen.into_iter().collect()
    }

    /// Records placed directly in `category`.
    pub fn keys_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a VariableRecord> {
        self.iter().filter(move |r| r.category == category)
    }

    /// Records never returned by a getter.
    pub fn unused(&self) -> impl Iterator<Item = &VariableRecord> {
        self.iter().filter(|r| !r.used)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_from(pairs: &[(&str, &str)]) -> Document {
        let mut doc = Document::new();
        for (name, raw) in pairs {
            let idx = doc.store(name).unwrap();
            doc.record_mut(idx).assign(raw, Provenance::File { line: 1 });
        }
        doc
    }

    #[test]
    fn test_round_trip_each_scalar_type() {
        let mut doc = doc_from(&[
            ("i", "-12"),
            ("r", "3.14159"),
            ("b", ".true."),
            ("s", "'hello'"),
        ]);
        assert_eq!(doc.get_integer("i").unwrap(), -12);
        assert!((doc.get_real("r").unwrap() - 3.14159).abs() < f64::EPSILON);
        assert!(doc.get_boolean("b").unwrap());
        assert_eq!(doc.get_string("s").unwrap(), "hello");
    }

    #[test]
    fn test_integer_does_not_satisfy_real() {
        let mut doc = doc_from(&[("n", "5")]);
        assert!(matches!(
            doc.get_real("n"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_scalar_getter_rejects_arrays() {
        let mut doc = doc_from(&[("list", "[1, 2]")]);
        assert!(matches!(
            doc.get_integer("list"),
            Err(Error::SizeMismatch { found: 2, .. })
        ));
    }

    #[test]
    fn test_array_getter_accepts_scalar() {
        let mut doc = doc_from(&[("one", "7")]);
        assert_eq!(doc.get_integer_array("one", 4).unwrap(), vec![7]);
    }

    #[test]
    fn test_single_element_array_reads_as_scalar() {
        let mut doc = doc_from(&[("one", "[7]")]);
        assert_eq!(doc.get_integer("one").unwrap(), 7);
    }

    #[test]
    fn test_add_get_stores_default_when_missing() {
        let mut doc = Document::new();
        assert_eq!(doc.add_get_integer("n", 4).unwrap(), 4);
        let record = doc.record(0).unwrap();
        assert_eq!(record.provenance, Provenance::Default);
        assert_eq!(record.raw, "4");
        assert!(record.is_used());
    }

    #[test]
    fn test_add_get_prefers_stored_value() {
        let mut doc = doc_from(&[("n", "9")]);
        assert_eq!(doc.add_get_integer("n", 4).unwrap(), 9);
        assert_eq!(doc.add_get_string("name", "x").unwrap(), "x");
    }

    #[test]
    fn test_add_get_array_fixed_size() {
        let mut doc = doc_from(&[("v", "[1.0, 2.0, 3.0]")]);
        let err = doc.add_get_real_array("v", &[0.0, 0.0], false).unwrap_err();
        assert!(matches!(
            err,
            Error::SizeMismatch {
                expected: 2,
                found: 3,
                ..
            }
        ));
        assert_eq!(
            doc.add_get_real_array("v", &[0.0, 0.0, 0.0], false).unwrap(),
            vec![1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn test_add_get_array_dynamic_size() {
        let mut doc = doc_from(&[("v", "1, 2, 3, 4, 5")]);
        assert_eq!(
            doc.add_get_integer_array("v", &[0], true).unwrap(),
            vec![1, 2, 3, 4, 5]
        );
        assert!(doc.record(0).unwrap().dynamic_size);

        let stored = doc.add_get_boolean_array("flags", &[true, false], true).unwrap();
        assert_eq!(stored, vec![true, false]);
        assert!(doc.record(1).unwrap().dynamic_size);
    }

    #[test]
    fn test_sorted_records_does_not_mutate() {
        let doc = doc_from(&[("b", "1"), ("a", "2")]);
        let names: Vec<&str> = doc.sorted_records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(!doc.is_sorted());
        assert_eq!(doc.record(0).unwrap().name, "b");
    }

    #[test]
    fn test_categories_and_keys() {
        let doc = doc_from(&[
            ("top", "1"),
            ("a%b%c", "2"),
            ("a%d", "3"),
            ("e%f", "4"),
        ]);
        assert_eq!(doc.categories(), vec!["a", "a%b", "e"]);
        let keys: Vec<&str> = doc.keys_in("a").map(|r| r.name.as_str()).collect();
        assert_eq!(keys, vec!["a%d"]);
        assert_eq!(doc.category_depth("a%b%c"), Some(2));
        assert_eq!(doc.category_depth("missing"), None);
    }

    #[test]
    fn test_unused() {
        let mut doc = doc_from(&[("a", "1"), ("b", "2")]);
        doc.get_integer("a").unwrap();
        let unused: Vec<&str> = doc.unused().map(|r| r.name.as_str()).collect();
        assert_eq!(unused, vec!["b"]);
    }
}
