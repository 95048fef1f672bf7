//! Indentation-driven category stack.
//!
//! Levels are compared by column, so any indentation step works as long as
//! it is used consistently within a block.

use crate::store::path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLevel {
    pub indent: usize,
    pub name: String,
    /// Anchor declared by this category header
    pub anchor: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct CategoryStack {
    levels: Vec<CategoryLevel>,
}

impl CategoryStack {
    pub fn new() -> Self {
        CategoryStack::default()
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Apply a category header at `indent` and return the header's full path.
    ///
    /// Column 1 resets the stack. A header deeper than every level is
    /// pushed; otherwise the first level at or below its column is replaced
    /// and everything above it dropped.
    pub fn enter(&mut self, indent: usize, name: &str, anchor: Option<&str>) -> String {
        if indent <= 1 {
            self.levels.clear();
        } else if let Some(pos) = self.levels.iter().position(|l| l.indent >= indent) {
            self.levels.truncate(pos);
        }
        self.levels.push(CategoryLevel {
            indent,
            name: name.to_string(),
            anchor: anchor.map(str::to_string),
        });
        self.join(self.levels.len())
    }

    fn join(&self, count: usize) -> String {
        self.levels[..count]
            .iter()
            .fold(String::new(), |acc, level| path::join(&acc, &level.name))
    }

    fn count_where(&self, pred: impl Fn(&CategoryLevel) -> bool) -> usize {
        self.levels.iter().take_while(|l| pred(l)).count()
    }

    /// Path of the levels strictly shallower than `indent`.
    pub fn path_below(&self, indent: usize) -> String {
        self.join(self.count_where(|l| l.indent < indent))
    }

    /// Path of the levels at or shallower than `indent`.
    ///
    /// Block sequences may sit at the same column as their key.
    pub fn path_at(&self, indent: usize) -> String {
        self.join(self.count_where(|l| l.indent <= indent))
    }

    /// Innermost anchor among the levels strictly shallower than `indent`.
    pub fn anchor_below(&self, indent: usize) -> Option<&str> {
        let count = self.count_where(|l| l.indent < indent);
        self.innermost_anchor(count)
    }

    pub fn anchor_at(&self, indent: usize) -> Option<&str> {
        let count = self.count_where(|l| l.indent <= indent);
        self.innermost_anchor(count)
    }

    fn innermost_anchor(&self, count: usize) -> Option<&str> {
        self.levels[..count]
            .iter()
            .rev()
            .find_map(|l| l.anchor.as_deref())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
