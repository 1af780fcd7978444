//! Markdown formatting of raw extracted text.

use std::borrow::Cow;

use crate::model::{FormattedDocument, Line, LineKind};

use super::reflow::{collapse_cjk_whitespace, join_vertical_lines, normalize_unicode};
use super::{FormatOptions, HeuristicVariant};

/// Generic: lines starting with these are list items, never headings.
const GENERIC_BULLETS: [char; 2] = ['-', '·'];

/// Generic: lines ending with these are sentences, never headings.
const SENTENCE_TERMINALS: [char; 4] = ['.', ',', '、', '。'];

/// CJK-aware: lines starting with these are section headings.
const SECTION_MARKERS: [char; 2] = ['■', '●'];

/// Format raw text as a classified document.
pub fn format_text(raw: &str, options: &FormatOptions) -> FormattedDocument {
    Formatter::new(options.clone()).format(raw)
}

/// Render a formatted document as Markdown.
pub fn to_markdown(doc: &FormattedDocument) -> String {
    doc.to_markdown()
}

/// Turns raw text into Markdown lines using shape-based heuristics.
///
/// Both heuristic variants share the same scaffolding: the text is split
/// into lines (after the variant's reflow stages), each line is trimmed and
/// classified, and the result is assembled line by line.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format raw text. Deterministic; never fails.
    pub fn format(&self, raw: &str) -> FormattedDocument {
        let text: Cow<'_, str> = if self.options.normalize_unicode {
            Cow::Owned(normalize_unicode(raw))
        } else {
            Cow::Borrowed(raw)
        };

        let mut doc = FormattedDocument::new();
        match self.options.variant {
            HeuristicVariant::Generic => {
                for line in text.split('\n') {
                    doc.push(self.classify_line(line));
                }
            }
            HeuristicVariant::CjkAware => {
                let collapsed = collapse_cjk_whitespace(&text);
                let joined = join_vertical_lines(&collapsed, self.options.vertical_run_max_chars);
                doc.merged_runs = joined.merged_runs;
                for line in joined.lines {
                    doc.push(self.classify_line(line));
                }
            }
        }

        log::debug!(
            "formatted {} lines ({} headings, {} merged runs)",
            doc.len(),
            doc.headings().count(),
            doc.merged_runs
        );
        doc
    }

    /// Classify one line as handed over by the reflow stages, keeping it as `raw`.
    pub fn classify_line(&self, raw: impl Into<String>) -> Line {
        let raw = raw.into();
        let kind = self.classify(raw.trim());
        Line::new(raw, kind)
    }

    /// Classify a trimmed line.
    pub fn classify(&self, text: &str) -> LineKind {
        if text.is_empty() {
            return LineKind::Blank;
        }

        match self.options.variant {
            HeuristicVariant::Generic => classify_generic(text, self.options.max_heading_chars),
            HeuristicVariant::CjkAware => classify_cjk(text, &self.options.title_keywords),
        }
    }
}

fn classify_generic(text: &str, max_heading_chars: usize) -> LineKind {
    let is_bullet = text.starts_with(GENERIC_BULLETS);
    let is_short = text.chars().count() < max_heading_chars;
    let is_sentence = text.ends_with(SENTENCE_TERMINALS);

    if !is_bullet && is_short && !is_sentence {
        LineKind::Heading(2)
    } else {
        LineKind::Body
    }
}

fn classify_cjk(text: &str, title_keywords: &[String]) -> LineKind {
    if text.starts_with('【') && text.ends_with('】') {
        return LineKind::Heading(3);
    }

    if text.starts_with(SECTION_MARKERS) {
        return LineKind::Heading(3);
    }

    let is_title = title_keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && text.contains(keyword.as_str()));
    if is_title {
        return LineKind::Heading(1);
    }

    LineKind::Body
}
