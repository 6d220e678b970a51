//! Line unfolding (RFC 2425 §5.8.1, vCard 2.1 §2.1.3).
//!
//! Physical lines are collected into logical lines. A line starting with a
//! space or tab continues the previous one. A quoted-printable line whose
//! last fragment ends in `=` continues on the next physical line whatever
//! it starts with.

use super::grammar::is_quoted_printable;
use super::WhitespacePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FragmentKind {
    First,
    /// Continuation introduced by leading whitespace.
    Fold,
    /// Continuation after a quoted-printable soft line break.
    SoftBreak,
}

/// A logical line under construction.
///
/// Fragments are kept apart until the line is finished so a soft break can
/// still be removed from the previous fragment.
#[derive(Debug)]
struct RawLine<'a> {
    fragments: Vec<(FragmentKind, &'a str)>,
    line: usize,
    quoted_printable: bool,
}

impl<'a> RawLine<'a> {
    fn start(text: &'a str, line: usize) -> Self {
        Self {
            fragments: vec![(FragmentKind::First, text)],
            line,
            quoted_printable: is_quoted_printable(text),
        }
    }

    fn ends_with_soft_break(&self) -> bool {
        self.quoted_printable
            && self
                .fragments
                .last()
                .is_some_and(|(_, text)| text.ends_with('='))
    }

    fn push(&mut self, kind: FragmentKind, text: &'a str) {
        if kind == FragmentKind::SoftBreak
            && let Some((_, last)) = self.fragments.last_mut()
        {
            if let Some(stripped) = (*last).strip_suffix('=') {
                *last = stripped;
            }
        }
        self.fragments.push((kind, text));
    }

    fn finish(self, policy: WhitespacePolicy) -> LogicalLine {
        let mut text = String::new();
        for (kind, fragment) in self.fragments {
            match (policy, kind) {
                (WhitespacePolicy::FoldOnly, FragmentKind::Fold) => text.push_str(&fragment[1..]),
                _ => text.push_str(fragment),
            }
        }

        if policy == WhitespacePolicy::StripAll {
            text.retain(|c| c != ' ' && c != '\t');
        }

        LogicalLine {
            text,
            line: self.line,
            quoted_printable: self.quoted_printable,
        }
    }
}

/// One unfolded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub text: String,
    /// 1-based number of the first physical line.
    pub line: usize,
    /// Whether the head declared a quoted-printable value.
    pub quoted_printable: bool,
}

/// Splits input on CRLF or LF and unfolds continuations.
///
/// Empty logical lines are returned as well; the caller decides what to
/// do with them.
#[must_use]
pub fn split_lines(input: &str, policy: WhitespacePolicy) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut current: Option<RawLine<'_>> = None;

    for (i, physical) in input.lines().enumerate() {
        let physical = physical.strip_suffix('\r').unwrap_or(physical);

        if let Some(ref mut raw) = current {
            if raw.ends_with_soft_break() {
                raw.push(FragmentKind::SoftBreak, physical);
                continue;
            }
            if physical.starts_with([' ', '\t']) {
                raw.push(FragmentKind::Fold, physical);
                continue;
            }
        }

        if let Some(raw) = current.replace(RawLine::start(physical, i + 1)) {
            lines.push(raw.finish(policy));
        }
    }

    if let Some(raw) = current {
        lines.push(raw.finish(policy));
    }

    tracing::trace!(count = lines.len(), "Unfolded logical lines");
    lines
}
