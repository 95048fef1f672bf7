//! Line sources feeding the parser.

use std::io::{self, BufRead};

/// One physical line and its 1-based number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub number: usize,
}

/// Lines read from any buffered reader.
///
/// Stops after the first read error.
pub struct ReaderLines<R> {
    reader: R,
    number: usize,
    failed: bool,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        ReaderLines {
            reader,
            number: 0,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for ReaderLines<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mut text = String::new();
        match self.reader.read_line(&mut text) {
            Ok(0) => None,
            Ok(_) => {
                self.number += 1;
                if text.ends_with('\n') {
                    text.pop();
                    if text.ends_with('\r') {
                        text.pop();
                    }
                }
                Some(Ok(Line {
                    text,
                    number: self.number,
                }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Lines of an in-memory string.
pub struct StrLines<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> StrLines<'a> {
    pub fn new(text: &'a str) -> Self {
        StrLines {
            lines: text.lines().enumerate(),
        }
    }
}

impl Iterator for StrLines<'_> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|(i, text)| {
            Ok(Line {
                text: text.to_string(),
                number: i + 1,
            })
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
