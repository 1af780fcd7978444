//! Line-level types and the formatted document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Empty line (paragraph break)
    Blank,
    /// Body text, emitted verbatim
    Body,
    /// Heading with level 1-3
    Heading(u8),
}

impl LineKind {
    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            LineKind::Heading(level) => Some(*level),
            _ => None,
        }
    }
}

/// A single `\n`-delimited line of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Content before trimming. With the CJK-aware variant this is the line
    /// after whitespace collapse and vertical joining, so it may already be
    /// trimmed or merged from several input lines.
    pub raw: String,

    /// Trimmed content
    pub text: String,

    /// Classification
    pub kind: LineKind,
}

impl Line {
    /// Create a line, trimming `raw` into `text`.
    pub fn new(raw: impl Into<String>, kind: LineKind) -> Self {
        let raw = raw.into();
        let text = raw.trim().to_string();
        Self { raw, text, kind }
    }

    /// Create a blank line.
    pub fn blank() -> Self {
        Self::new(String::new(), LineKind::Blank)
    }

    /// Whether this line is blank.
    pub fn is_blank(&self) -> bool {
        self.kind == LineKind::Blank
    }

    /// Whether this line is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, LineKind::Heading(_))
    }

    /// Render the line with its Markdown prefix.
    pub fn to_markdown(&self) -> String {
        match self.kind {
            LineKind::Blank => String::new(),
            LineKind::Body => self.text.clone(),
            LineKind::Heading(level) => {
                let prefix = "#".repeat(level as usize);
                format!("{} {}", prefix, self.text)
            }
        }
    }
}

/// Classified lines of a document, ready to be written out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedDocument {
    /// Lines in output order
    pub lines: Vec<Line>,

    /// Number of vertical-text runs merged into single lines
    pub merged_runs: usize,
}

impl FormattedDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over heading lines.
    pub fn headings(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|l| l.is_heading())
    }

    /// Render as Markdown: lines joined with single newlines.
    pub fn to_markdown(&self) -> String {
        self.lines
            .iter()
            .map(Line::to_markdown)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for FormattedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}
