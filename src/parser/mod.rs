//! Line-oriented document parser.
//!
//! Each line is classified on its own (see [`line`]); hierarchy comes only
//! from indentation columns tracked by a [`CategoryStack`]. All transient
//! state lives in a [`ParseContext`] created per parse, so a `Parser` can be
//! shared and reused.
//!
//! Parsing stops at the first error, after reporting it to the configured
//! [`FailureSink`]. Records read before the failure stay in the target
//! document.

pub mod category;
pub mod line;
pub mod source;

use crate::anchor;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::sink::{FailureSink, Location, LogSink};
use crate::store::{path, Document, Provenance};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub use category::CategoryStack;
pub use line::{LineKind, ParsedLine};
pub use source::{Line, ReaderLines, StrLines};

/// Block sequence being accumulated.
#[derive(Debug, Clone)]
struct OpenSequence {
    name: String,
    indent: usize,
    index: usize,
    /// One entry per `-` line
    items: Vec<String>,
}

/// Per-parse state threaded through line handling.
#[derive(Debug, Default)]
pub struct ParseContext {
    categories: CategoryStack,
    sequence: Option<OpenSequence>,
    /// Deferred merge-key entries, expanded once every line is read
    aliases: Document,
}

impl ParseContext {
    fn new(config: &Config) -> Self {
        ParseContext {
            categories: CategoryStack::new(),
            sequence: None,
            aliases: Document::with_config(config.clone()),
        }
    }

    pub fn aliases(&self) -> &Document {
        &self.aliases
    }
}

pub struct Parser {
    config: Config,
    sink: Box<dyn FailureSink + Send + Sync>,
    source_name: Option<String>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(Config::default())
    }
}

impl Parser {
    pub fn new(config: Config) -> Self {
        Parser {
            config,
            sink: Box::new(LogSink),
            source_name: None,
        }
    }

    pub fn with_sink(mut self, sink: impl FailureSink + Send + Sync + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Label used in failure locations (typically a file name).
    pub fn with_source_name(mut self, name: &str) -> Self {
        self.source_name = Some(name.to_string());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Entry Points
    // =========================================================================

    pub fn parse_str(&self, text: &str) -> Result<Document> {
        let mut doc = Document::with_config(self.config.clone());
        self.parse_into(&mut doc, StrLines::new(text))?;
        Ok(doc)
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Document> {
        let mut doc = Document::with_config(self.config.clone());
        self.parse_into(&mut doc, ReaderLines::new(reader))?;
        Ok(doc)
    }

    pub fn parse_file<P: AsRef<Path>>(&self, file: P) -> Result<Document> {
        let file = file.as_ref();
        let name = file.display().to_string();
        let source = self.source_name.as_deref().unwrap_or(&name);

        let handle = File::open(file).map_err(|e| {
            self.fail(
                Error::Io { line: 0, source: e },
                Some(0),
                Some(source),
            )
        })?;
        log::debug!("reading {}", name);

        let mut doc = Document::with_config(self.config.clone());
        self.run(&mut doc, ReaderLines::new(BufReader::new(handle)), Some(source))?;
        Ok(doc)
    }

    /// Parse `lines` into `doc`, then expand merge keys and sort.
    ///
    /// On failure `doc` keeps every record stored up to that point.
    pub fn parse_into<I>(&self, doc: &mut Document, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<Line>>,
    {
        self.run(doc, lines, self.source_name.as_deref())
    }

    fn run<I>(&self, doc: &mut Document, lines: I, source: Option<&str>) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<Line>>,
    {
        let mut ctx = ParseContext::new(&self.config);
        let mut last = 0;

        for item in lines {
            let line = item.map_err(|e| {
                self.fail(
                    Error::Io {
                        line: last + 1,
                        source: e,
                    },
                    Some(last + 1),
                    source,
                )
            })?;
            last = line.number;
            self.parse_line(&mut ctx, doc, &line)
                .map_err(|e| self.fail(e, Some(line.number), source))?;
        }

        anchor::resolve(doc, &ctx.aliases).map_err(|e| {
            let at = e.location();
            self.fail(e, at, source)
        })?;

        if self.config.sort_after_parse {
            doc.sort();
        }
        log::debug!(
            "parsed {} line(s) into {} record(s), {} merge key(s)",
            last,
            doc.len(),
            ctx.aliases.len()
        );
        Ok(())
    }

    fn fail(&self, error: Error, line: Option<usize>, source: Option<&str>) -> Error {
        let location = line.map(|line| Location {
            source: source.map(str::to_string),
            line,
        });
        self.sink.report(&error.to_string(), location.as_ref());
        error
    }

    // =========================================================================
    // Line Handling
    // =========================================================================

    /// Handle one physical line.
    pub fn parse_line(&self, ctx: &mut ParseContext, doc: &mut Document, line: &Line) -> Result<()> {
        let parsed = match line::classify(&line.text, line.number, &self.config)? {
            Some(parsed) => parsed,
            None => return Ok(()),
        };
        let ParsedLine { indent, kind } = parsed;
        log::trace!("line {}: indent {} {:?}", line.number, indent, kind);

        if !matches!(kind, LineKind::SequenceItem { .. }) {
            ctx.sequence = None;
        }

        match kind {
            LineKind::Category { key } => {
                let category = ctx.categories.enter(indent, key, None);
                log::debug!("category '{}' at column {}", category, indent);
            }
            LineKind::AnchorCategory { key, anchor } => {
                let category = ctx.categories.enter(indent, key, Some(anchor));
                log::debug!("category '{}' defines anchor '&{}'", category, anchor);
                doc.define_anchor(anchor, &category);
            }
            LineKind::KeyValue { key, value } => {
                let name = path::join(&ctx.categories.path_below(indent), key);
                let index = doc.store(&name)?;
                let record = doc.record_mut(index);
                record.assign(value, Provenance::File { line: line.number });
                record.anchor_target = ctx.categories.anchor_below(indent).map(str::to_string);
            }
            LineKind::SequenceItem { value } => {
                self.sequence_item(ctx, doc, indent, value, line.number)?;
            }
            LineKind::MergeKey { anchors } => {
                let category = ctx.categories.path_below(indent);
                for anchor in anchors {
                    let name = anchor::alias_entry_name(&category, anchor);
                    let index = ctx.aliases.store(&name)?;
                    let entry = ctx.aliases.record_mut(index);
                    entry.alias = Some(anchor.to_string());
                    entry.provenance = Provenance::File { line: line.number };
                }
            }
        }
        Ok(())
    }

    fn sequence_item(
        &self,
        ctx: &mut ParseContext,
        doc: &mut Document,
        indent: usize,
        value: &str,
        number: usize,
    ) -> Result<()> {
        let name = ctx.categories.path_at(indent);
        if name.is_empty() {
            return Err(Error::parse(number, "sequence item outside of any category"));
        }

        if let Some(open) = &mut ctx.sequence {
            if open.name == name && open.indent == indent {
                open.items.push(value.to_string());
                let record = doc.record_mut(open.index);
                record.assign_items(&open.items, record.provenance);
                return Ok(());
            }
        }

        let index = doc.store(&name)?;
        let items = vec![value.to_string()];
        let record = doc.record_mut(index);
        record.assign_items(&items, Provenance::File { line: number });
        record.anchor_target = ctx.categories.anchor_at(indent).map(str::to_string);
        ctx.sequence = Some(OpenSequence {
            name,
            indent,
            index,
            items,
        });
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
