//! Typed payloads held by variable records.

use std::fmt;

/// Element kind of a stored value.
///
/// Scalars and arrays of the same kind share one `ValueType`; they differ
/// by the record size only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Unknown,
    Integer,
    Real,
    Boolean,
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Unknown => write!(f, "unknown"),
            ValueType::Integer => write!(f, "integer"),
            ValueType::Real => write!(f, "real"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::String => write!(f, "string"),
        }
    }
}

/// Resolved payload of a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No raw text assigned yet
    #[default]
    Unknown,
    Integer(i64),
    Real(f64),
    Boolean(bool),
    String(String),
    IntegerArray(Vec<i64>),
    RealArray(Vec<f64>),
    BooleanArray(Vec<bool>),
    StringArray(Vec<String>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Unknown => ValueType::Unknown,
            Value::Integer(_) | Value::IntegerArray(_) => ValueType::Integer,
            Value::Real(_) | Value::RealArray(_) => ValueType::Real,
            Value::Boolean(_) | Value::BooleanArray(_) => ValueType::Boolean,
            Value::String(_) | Value::StringArray(_) => ValueType::String,
        }
    }

    /// Number of elements: 1 for scalars, the length for arrays, 0 when unknown.
    pub fn size(&self) -> usize {
        match self {
            Value::Unknown => 0,
            Value::Integer(_) | Value::Real(_) | Value::Boolean(_) | Value::String(_) => 1,
            Value::IntegerArray(v) => v.len(),
            Value::RealArray(v) => v.len(),
            Value::BooleanArray(v) => v.len(),
            Value::StringArray(v) => v.len(),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Value::IntegerArray(_)
                | Value::RealArray(_)
                | Value::BooleanArray(_)
                | Value::StringArray(_)
        )
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn as_integers(&self) -> Option<Vec<i64>> {
        match self {
            Value::Integer(i) => Some(vec![*i]),
            Value::IntegerArray(v) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn as_reals(&self) -> Option<Vec<f64>> {
        match self {
            Value::Real(r) => Some(vec![*r]),
            Value::RealArray(v) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn as_booleans(&self) -> Option<Vec<bool>> {
        match self {
            Value::Boolean(b) => Some(vec![*b]),
            Value::BooleanArray(v) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<Vec<String>> {
        match self {
            Value::String(s) => Some(vec![s.clone()]),
            Value::StringArray(v) => Some(v.clone()),
            _ => None,
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

/// Raw rendering: unquoted scalars, bracketed comma lists for arrays.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unknown => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{:?}", r),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::IntegerArray(v) => write_list(f, v),
            Value::RealArray(v) => {
                let items: Vec<String> = v.iter().map(|r| format!("{:?}", r)).collect();
                write_list(f, &items)
            }
            Value::BooleanArray(v) => write_list(f, v),
            Value::StringArray(v) => write_list(f, v),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
