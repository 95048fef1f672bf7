//! Category path handling.
//!
//! Full variable names are category components joined by the reserved
//! separator, e.g. `model%grid%nx`.

/// Reserved hierarchy delimiter.
pub const CATEGORY_SEPARATOR: char = '%';

/// Split a full name into its components.
pub fn split_path(name: &str) -> Vec<&str> {
    name.split(CATEGORY_SEPARATOR).collect()
}

/// Join a category and a leaf key. An empty category yields the bare key.
pub fn join(category: &str, key: &str) -> String {
    if category.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", category, CATEGORY_SEPARATOR, key)
    }
}

/// Category part of a full name (`""` for root keys).
pub fn category_of(name: &str) -> &str {
    match name.rfind(CATEGORY_SEPARATOR) {
        Some(pos) => &name[..pos],
        None => "",
    }
}

/// Leaf key of a full name.
pub fn leaf_of(name: &str) -> &str {
    match name.rfind(CATEGORY_SEPARATOR) {
        Some(pos) => &name[pos + CATEGORY_SEPARATOR.len_utf8()..],
        None => name,
    }
}

/// Number of categories enclosing the variable.
pub fn depth(name: &str) -> usize {
    name.matches(CATEGORY_SEPARATOR).count()
}

/// Replace the `from` category prefix of `name` with `to`.
///
/// Returns `None` when `name` does not live under `from`.
pub fn rebase(name: &str, from: &str, to: &str) -> Option<String> {
    let tail = if from.is_empty() {
        name
    } else {
        name.strip_prefix(from)?.strip_prefix(CATEGORY_SEPARATOR)?
    };
    Some(join(to, tail))
}

// =============================================================================
// Unit Tests
// =============================================================================
