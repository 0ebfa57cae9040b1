//! The raw line buffer behind a store.
//!
//! [`RawDocument`] is the authoritative, persistable representation of an INI
//! file. Lines are kept verbatim: no trimming, no normalization. The only
//! things inferred from the source text are the line terminator and whether
//! the file ended with one, so that an untouched document renders back
//! byte-for-byte.

use std::fmt;
use std::ops::Range;

use super::classify::{LineKind, classify};

/// Line terminator used when rendering a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Returns the terminator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => write!(f, "lf"),
            Self::CrLf => write!(f, "crlf"),
        }
    }
}

/// Ordered, mutable sequence of raw lines.
///
/// Only the store's mutation engine and persister change it, so line edits
/// are crate-private.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    lines: Vec<String>,
    line_ending: LineEnding,
    trailing_newline: bool,
}

impl Default for RawDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RawDocument {
    /// Creates an empty document that renders with `\n` terminators.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            line_ending: LineEnding::Lf,
            trailing_newline: true,
        }
    }

    /// Splits source text into lines.
    ///
    /// The document is treated as CRLF only when every terminated line ends
    /// in `\r\n`. Otherwise stray `\r` characters stay inside their lines.
    ///
    /// ```
    /// use launcher_ini::store::{LineEnding, RawDocument};
    ///
    /// let doc = RawDocument::from_text("[a]\r\nk = v\r\n");
    /// assert_eq!(doc.lines(), ["[a]", "k = v"]);
    /// assert_eq!(doc.line_ending(), LineEnding::CrLf);
    /// assert_eq!(doc.render(), "[a]\r\nk = v\r\n");
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }

        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let raw: Vec<&str> = body.split('\n').collect();

        // Lines followed by a '\n' in the source
        let terminated = if trailing_newline {
            raw.len()
        } else {
            raw.len() - 1
        };
        let crlf = terminated > 0 && raw[..terminated].iter().all(|l| l.ends_with('\r'));

        let lines = raw
            .iter()
            .enumerate()
            .map(|(index, line)| {
                if crlf && index < terminated {
                    line.strip_suffix('\r').unwrap_or(line).to_string()
                } else {
                    (*line).to_string()
                }
            })
            .collect();

        Self {
            lines,
            line_ending: if crlf { LineEnding::CrLf } else { LineEnding::Lf },
            trailing_newline,
        }
    }

    /// Returns all lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns one line by zero-based index.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the document has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the terminator detected in the source.
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Renders the document with its own terminator.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(self.line_ending)
    }

    /// Renders the document with the given terminator.
    #[must_use]
    pub fn render_with(&self, ending: LineEnding) -> String {
        let mut out = self.lines.join(ending.as_str());
        if self.trailing_newline && !self.lines.is_empty() {
            out.push_str(ending.as_str());
        }
        out
    }

    /// Computes the line ranges that belong to a section.
    ///
    /// A span starts after a header and ends before the next header-like line
    /// (valid or malformed) or at the end of the document. The global section
    /// `""` spans from the first line to the first header-like line. A section
    /// whose header appears more than once has one span per header.
    ///
    /// An empty result means the section has no header in the document.
    #[must_use]
    pub fn spans(&self, section: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut open = section.is_empty().then_some(0);

        for (index, line) in self.lines.iter().enumerate() {
            let kind = classify(line);
            if !kind.is_boundary() {
                continue;
            }

            if let Some(start) = open.take() {
                spans.push(start..index);
            }

            if let LineKind::Header(name) = kind {
                if !section.is_empty() && name.eq_ignore_ascii_case(section) {
                    open = Some(index + 1);
                }
            }
        }

        if let Some(start) = open {
            spans.push(start..self.lines.len());
        }

        spans
    }

    pub(crate) fn replace_line(&mut self, index: usize, line: String) {
        self.lines[index] = line;
    }

    pub(crate) fn insert_line(&mut self, index: usize, line: String) {
        self.lines.insert(index, line);
    }

    pub(crate) fn push_line(&mut self, line: String) {
        self.lines.push(line);
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
