//! Parser and store configuration.

/// Tunables shared by the parser and the variable store.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Characters starting an inline comment outside quotes
    pub comment_chars: Vec<char>,
    /// Capacity floor used the first time a document grows
    pub initial_capacity: usize,
    /// Sort the primary document once parsing and alias resolution finish
    pub sort_after_parse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            comment_chars: vec!['#', ';'],
            initial_capacity: 100,
            sort_after_parse: true,
        }
    }
}

impl Config {
    pub fn with_comment_chars(mut self, chars: &[char]) -> Self {
        self.comment_chars = chars.to_vec();
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity.max(1);
        self
    }

    pub fn with_sort_after_parse(mut self, sort: bool) -> Self {
        self.sort_after_parse = sort;
        self
    }

    pub fn is_comment_char(&self, c: char) -> bool {
        self.comment_chars.contains(&c)
    }
}
