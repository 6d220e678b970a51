//! BEGIN/END structure builder.
//!
//! Routes logical lines into an untyped tree rooted at an implicit document
//! node. Never fails; problems are reported as [`Diagnostic`]s.

use serde::Serialize;
use vformat_core::config::DecoderConfig;
use vformat_core::constants::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

use super::lexer::{LogicalLine, split_lines};
use super::{Diagnostic, WhitespacePolicy};

/// Options for the tokenizer and structure builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest component nesting that will be opened, capped at
    /// [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
    pub whitespace: WhitespacePolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            whitespace: WhitespacePolicy::default(),
        }
    }
}

impl From<&DecoderConfig> for ParseOptions {
    fn from(config: &DecoderConfig) -> Self {
        Self {
            max_depth: config.max_depth.min(MAX_DEPTH_LIMIT),
            whitespace: config.whitespace,
        }
    }
}

/// An attribute line as collected by the builder, not yet split by the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawAttributeLine {
    pub text: String,
    pub line: usize,
    pub quoted_printable: bool,
}

impl From<LogicalLine> for RawAttributeLine {
    fn from(line: LogicalLine) -> Self {
        Self {
            text: line.text,
            line: line.line,
            quoted_printable: line.quoted_printable,
        }
    }
}

/// A child of a [`ParsedNode`], in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParsedEntry {
    Component(ParsedNode),
    Line(RawAttributeLine),
}

/// Untyped component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedNode {
    /// Uppercased component name; `None` for the document root.
    pub name: Option<String>,
    /// Value of the last `VERSION` line directly inside this node.
    pub version: Option<String>,
    pub attributes: Vec<ParsedEntry>,
}

impl ParsedNode {
    fn named(name: String) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    /// Nested components, skipping attribute lines.
    pub fn components(&self) -> impl Iterator<Item = &ParsedNode> {
        self.attributes.iter().filter_map(|entry| match entry {
            ParsedEntry::Component(node) => Some(node),
            ParsedEntry::Line(_) => None,
        })
    }

    /// Attribute lines, skipping nested components.
    pub fn lines(&self) -> impl Iterator<Item = &RawAttributeLine> {
        self.attributes.iter().filter_map(|entry| match entry {
            ParsedEntry::Line(line) => Some(line),
            ParsedEntry::Component(_) => None,
        })
    }
}

/// Result of [`parse_structure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parsed {
    pub root: ParsedNode,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds the untyped tree with default options.
#[must_use]
pub fn parse_structure(input: &str) -> Parsed {
    parse_structure_with(input, &ParseOptions::default())
}

/// Builds the untyped tree.
///
/// `BEGIN:<name>` opens a child of the current node. `END:<name>` closes
/// the current node only when the names match (case-insensitively) and is
/// otherwise ignored. `VERSION:<v>` sets the current node's version. Empty
/// lines are skipped. Everything else is an attribute line of the current
/// node.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
#[must_use]
pub fn parse_structure_with(input: &str, options: &ParseOptions) -> Parsed {
    tracing::debug!("Building component tree");

    let mut builder = Builder::new(options.max_depth);
    for line in split_lines(input, options.whitespace) {
        builder.route(line);
    }
    let parsed = builder.finish();

    for diagnostic in &parsed.diagnostics {
        tracing::warn!(%diagnostic, "Recovered from malformed structure");
    }
    tracing::debug!(
        components = parsed.root.components().count(),
        diagnostics = parsed.diagnostics.len(),
        "Component tree built"
    );

    parsed
}

struct Builder {
    /// Open nodes; index 0 is the document root.
    stack: Vec<ParsedNode>,
    /// BEGINs refused by the depth guard with the stack depth they were
    /// refused at, innermost last.
    suppressed: Vec<(usize, String)>,
    max_depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Builder {
    fn new(max_depth: usize) -> Self {
        Self {
            stack: vec![ParsedNode::default()],
            suppressed: Vec::new(),
            max_depth: max_depth.min(MAX_DEPTH_LIMIT),
            diagnostics: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut ParsedNode {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn route(&mut self, line: LogicalLine) {
        if let Some(name) = keyword(&line.text, "BEGIN:") {
            self.begin(name.trim().to_ascii_uppercase(), line.line);
        } else if let Some(name) = keyword(&line.text, "END:") {
            self.end(&name.trim().to_ascii_uppercase(), line.line);
        } else if let Some(version) = keyword(&line.text, "VERSION:") {
            tracing::trace!(line = line.line, version, "Version");
            self.current().version = Some(version.trim().to_string());
        } else if line.text.trim().is_empty() {
            tracing::trace!(line = line.line, "Skipping empty line");
        } else {
            if self.stack.len() == 1 {
                self.diagnostics
                    .push(Diagnostic::RootAttribute { line: line.line });
            }
            tracing::trace!(line = line.line, "Attribute line");
            self.current()
                .attributes
                .push(ParsedEntry::Line(line.into()));
        }
    }

    fn begin(&mut self, name: String, line: usize) {
        if self.stack.len() > self.max_depth {
            self.diagnostics.push(Diagnostic::DepthLimitExceeded {
                line,
                name: name.clone(),
                max_depth: self.max_depth,
            });
            self.suppressed.push((self.stack.len(), name));
            return;
        }

        tracing::trace!(line, name = %name, "Opening component");
        self.stack.push(ParsedNode::named(name));
    }

    fn end(&mut self, name: &str, line: usize) {
        let depth = self.stack.len();
        if self
            .suppressed
            .last()
            .is_some_and(|(at, s)| *at == depth && s == name)
        {
            self.suppressed.pop();
            return;
        }

        if self.stack.len() > 1 && self.current().name.as_deref() == Some(name) {
            tracing::trace!(line, name, "Closing component");
            self.close();
        } else {
            self.diagnostics.push(Diagnostic::StrayEnd {
                line,
                name: name.to_string(),
            });
        }
    }

    /// Pops the current node and appends it to its parent.
    ///
    /// Refused BEGINs inside the closed node can no longer be matched.
    fn close(&mut self) {
        if self.stack.len() > 1
            && let Some(node) = self.stack.pop()
        {
            let depth = self.stack.len();
            self.suppressed.retain(|(at, _)| *at <= depth);
            self.current()
                .attributes
                .push(ParsedEntry::Component(node));
        }
    }

    fn finish(mut self) -> Parsed {
        while self.stack.len() > 1 {
            let name = self.current().name.clone().unwrap_or_default();
            self.diagnostics
                .push(Diagnostic::UnclosedComponent { name });
            self.close();
        }

        Parsed {
            root: self.stack.pop().unwrap_or_default(),
            diagnostics: self.diagnostics,
        }
    }
}

/// Strips a case-insensitive keyword prefix.
fn keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    let rest = text.get(keyword.len()..)?;
    head.eq_ignore_ascii_case(keyword).then_some(rest)
}
