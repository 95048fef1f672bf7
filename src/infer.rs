//! Type inference from raw text.
//!
//! Decides, from the text alone, whether a value is a scalar or an array
//! and which of integer, real, boolean or string it holds. Inference is
//! total: any text yields a concrete value.

use crate::value::{Value, ValueType};

const TRUE_LITERALS: [&str; 3] = ["true", "t", ".true."];
const FALSE_LITERALS: [&str; 3] = ["false", "f", ".false."];

/// Infer the typed value of `raw`.
pub fn infer(raw: &str) -> Value {
    let text = raw.trim();
    if text.is_empty() {
        return Value::String(String::new());
    }

    if is_array_like(text) {
        let items = array_items(text);
        if items.is_empty() {
            return Value::StringArray(Vec::new());
        }
        // Candidate order matters: integers also parse as reals.
        for ty in [ValueType::Integer, ValueType::Real, ValueType::Boolean] {
            if let Some(value) = parse_array(&items, ty) {
                return value;
            }
        }
        return Value::StringArray(items.iter().map(|s| unquote(s).to_string()).collect());
    }

    infer_scalar(text)
}

/// Infer the value of block sequence items, one element per item.
///
/// Item text is never split further: commas and quotes inside an item
/// belong to it. A single item gives a scalar.
pub fn infer_items<S: AsRef<str>>(items: &[S]) -> Value {
    let items: Vec<&str> = items.iter().map(|s| s.as_ref().trim()).collect();
    match items.as_slice() {
        [] => Value::StringArray(Vec::new()),
        [single] => infer_scalar(single),
        _ => [ValueType::Integer, ValueType::Real, ValueType::Boolean]
            .into_iter()
            .find_map(|ty| parse_array(&items, ty))
            .unwrap_or_else(|| {
                Value::StringArray(items.iter().map(|s| unquote(s).to_string()).collect())
            }),
    }
}

fn infer_scalar(text: &str) -> Value {
    if text.is_empty() {
        return Value::String(String::new());
    }
    if let Some(b) = parse_boolean(text) {
        return Value::Boolean(b);
    }
    if let Some(i) = parse_integer(text) {
        return Value::Integer(i);
    }
    if let Some(r) = parse_real(text) {
        return Value::Real(r);
    }
    Value::String(unquote(text).to_string())
}

/// Parse `raw` strictly as values of kind `ty`.
///
/// Used when a record's type is already fixed. Integer text is accepted for
/// reals. `ValueType::Unknown` falls back to full inference.
pub fn parse_as(raw: &str, ty: ValueType) -> Option<Value> {
    let text = raw.trim();
    if ty == ValueType::Unknown {
        return Some(infer(text));
    }

    if is_array_like(text) {
        let items = array_items(text);
        return parse_array(&items, ty);
    }

    match ty {
        ValueType::Integer => parse_integer(text).map(Value::Integer),
        ValueType::Real => parse_real(text).map(Value::Real),
        ValueType::Boolean => parse_boolean(text).map(Value::Boolean),
        ValueType::String => Some(Value::String(unquote(text).to_string())),
        ValueType::Unknown => None,
    }
}

fn parse_array(items: &[&str], ty: ValueType) -> Option<Value> {
    match ty {
        ValueType::Integer => items
            .iter()
            .map(|s| parse_integer(s))
            .collect::<Option<Vec<_>>>()
            .map(Value::IntegerArray),
        ValueType::Real => items
            .iter()
            .map(|s| parse_real(s))
            .collect::<Option<Vec<_>>>()
            .map(Value::RealArray),
        ValueType::Boolean => items
            .iter()
            .map(|s| parse_boolean(s))
            .collect::<Option<Vec<_>>>()
            .map(Value::BooleanArray),
        ValueType::String => Some(Value::StringArray(
            items.iter().map(|s| unquote(s).to_string()).collect(),
        )),
        ValueType::Unknown => None,
    }
}

// =============================================================================
// Array Detection
// =============================================================================

/// Bracket-delimited, or holding a comma outside quotes and nested brackets.
pub fn is_array_like(text: &str) -> bool {
    let text = text.trim();
    if text.len() >= 2 && text.starts_with('[') && text.ends_with(']') {
        return true;
    }
    split_top_level(text).len() > 1
}

/// Elements of an array-like text, trimmed, with one bracket layer removed.
pub fn array_items(text: &str) -> Vec<&str> {
    let text = text.trim();
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(text);
    if inner.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(inner).into_iter().map(str::trim).collect()
}

/// Whether a quote character right after `prev` (the last non-blank
/// character outside quotes) opens a quoted span. Quotes only open at the
/// start of a token, so apostrophes inside words stay literal.
pub(crate) fn quote_opens(prev: Option<char>) -> bool {
    matches!(prev, None | Some(':' | ',' | '[' | '-'))
}

/// Split on commas that are outside quotes and outside nested brackets.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
                prev = Some(c);
            }
            continue;
        }
        match c {
            '"' | '\'' if quote_opens(prev) => quote = Some(c),
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        if !c.is_whitespace() {
            prev = Some(c);
        }
    }
    parts.push(&text[start..]);
    parts
}

// =============================================================================
// Scalar Parsing
// =============================================================================

fn parse_boolean(text: &str) -> Option<bool> {
    let lower = text.to_ascii_lowercase();
    if TRUE_LITERALS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_LITERALS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    if text.contains(['.', 'e', 'E', 'd', 'D']) {
        return None;
    }
    text.parse().ok()
}

/// Fixed or scientific notation; `d`/`D` exponents are read as `e`.
fn parse_real(text: &str) -> Option<f64> {
    let numeric = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | 'd' | 'D'));
    if !numeric || !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    text.replace(['d', 'D'], "e").parse().ok()
}

/// Remove one matching layer of surrounding single or double quotes.
pub fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

// =============================================================================
// Unit Tests
// =============================================================================
