//! Classification of a single source line.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::infer::{quote_opens, unquote};
use crate::store::CATEGORY_SEPARATOR;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MERGE_KEY: Regex = Regex::new(r"^<<\s*:\s*(.*)$").unwrap();
    static ref ALIAS: Regex = Regex::new(r"^\*([^\s%,\[\]{}]+)$").unwrap();
    static ref ANCHOR: Regex = Regex::new(r"^&([^\s%,\[\]{}]+)$").unwrap();
}

/// What a non-blank line declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `<<: *name` or `<<: [*a, *b]`
    MergeKey { anchors: Vec<&'a str> },
    /// `- value`
    SequenceItem { value: &'a str },
    /// `key: &name`
    AnchorCategory { key: &'a str, anchor: &'a str },
    /// `key:`
    Category { key: &'a str },
    /// `key: value`
    KeyValue { key: &'a str, value: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// 1-based column of the first non-blank character
    pub indent: usize,
    pub kind: LineKind<'a>,
}

/// Byte offset of the first character outside quotes matching `stop`.
///
/// Quotes open only at the start of a token, so `it's` has no quoted span.
fn scan_unquoted(text: &str, stop: impl Fn(char) -> bool) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
                prev = Some(c);
            }
            continue;
        }
        if (c == '"' || c == '\'') && quote_opens(prev) {
            quote = Some(c);
        } else if stop(c) {
            return Some(i);
        }
        if !c.is_whitespace() {
            prev = Some(c);
        }
    }
    None
}

/// Cut an inline comment that starts outside quotes.
pub fn strip_comment<'a>(text: &'a str, config: &Config) -> &'a str {
    match scan_unquoted(text, |c| config.is_comment_char(c)) {
        Some(i) => &text[..i],
        None => text,
    }
}

/// Byte offset of the first `:` outside quotes.
fn find_colon(text: &str) -> Option<usize> {
    scan_unquoted(text, |c| c == ':')
}

fn indent_of(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count() + 1
}

fn merge_anchors<'a>(target: &'a str, line: usize) -> Result<Vec<&'a str>> {
    let target = target.trim();
    if target.is_empty() {
        return Err(Error::parse(line, "merge key without '*anchor'"));
    }
    let items: Vec<&str> = match target.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        Some(inner) => inner.split(',').map(str::trim).collect(),
        None => vec![target],
    };
    items
        .into_iter()
        .map(|item| {
            ALIAS
                .captures(item)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
                .ok_or_else(|| {
                    Error::parse(line, format!("merge key expects '*anchor', got '{}'", item))
                })
        })
        .collect()
}

/// Classify one line. Blank lines, comments and `---` yield `None`.
pub fn classify<'a>(text: &'a str, number: usize, config: &Config) -> Result<Option<ParsedLine<'a>>> {
    let stripped = strip_comment(text, config);
    let content = stripped.trim();
    if content.is_empty() || content == "---" {
        return Ok(None);
    }
    let indent = indent_of(stripped);

    if let Some(caps) = MERGE_KEY.captures(content) {
        let target = caps.get(1).map_or("", |m| m.as_str());
        let anchors = merge_anchors(target, number)?;
        return Ok(Some(ParsedLine {
            indent,
            kind: LineKind::MergeKey { anchors },
        }));
    }

    if let Some(rest) = content.strip_prefix('-') {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return Ok(Some(ParsedLine {
                indent,
                kind: LineKind::SequenceItem { value: rest.trim() },
            }));
        }
    }

    let colon = find_colon(content)
        .ok_or_else(|| Error::parse(number, format!("expected ':' in '{}'", content)))?;
    let key = unquote(content[..colon].trim());
    let value = content[colon + 1..].trim();

    if key.is_empty() {
        return Err(Error::parse(number, "empty key"));
    }
    if key.contains(CATEGORY_SEPARATOR) {
        return Err(Error::parse(
            number,
            format!("key '{}' contains the reserved '{}'", key, CATEGORY_SEPARATOR),
        ));
    }

    let kind = if value.is_empty() {
        LineKind::Category { key }
    } else if let Some(anchor) = ANCHOR.captures(value).and_then(|caps| caps.get(1)) {
        LineKind::AnchorCategory {
            key,
            anchor: anchor.as_str(),
        }
    } else {
        LineKind::KeyValue { key, value }
    };
    Ok(Some(ParsedLine { indent, kind }))
}

// =============================================================================
// Unit Tests
// =============================================================================
