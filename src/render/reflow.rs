//! Reflow stages applied before heading classification.
//!
//! These undo extraction artifacts common in CJK documents: spaces inserted
//! between ideographs by proportional-width rendering, and vertically set
//! text coming out one or two characters per line.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lines starting with this marker are list items and never joined.
pub const VERTICAL_JOIN_EXEMPT: char = '・';

/// Whether `c` is a Han ideograph, Hiragana or Katakana.
pub fn is_cjk(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3040}'..='\u{30FF}')
}

/// Normalize text to Unicode NFC.
pub fn normalize_unicode(text: &str) -> String {
    text.nfc().collect()
}

/// Remove every whitespace run that sits between two CJK characters.
///
/// Line breaks count as whitespace, so a break between two ideographs is
/// removed as well.
pub fn collapse_cjk_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for run in WHITESPACE_RUN.find_iter(text) {
        let before = text[..run.start()].chars().next_back();
        let after = text[run.end()..].chars().next();
        let between_cjk = before.is_some_and(is_cjk) && after.is_some_and(is_cjk);

        out.push_str(&text[last..run.start()]);
        if !between_cjk {
            out.push_str(run.as_str());
        }
        last = run.end();
    }

    out.push_str(&text[last..]);
    out
}

/// Lines produced by [`join_vertical_lines`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinedLines {
    /// Trimmed lines, blank lines kept as empty strings
    pub lines: Vec<String>,

    /// Number of runs of two or more short lines merged into one
    pub merged_runs: usize,
}

/// Merge runs of very short lines back into single lines.
///
/// Consecutive non-blank trimmed lines of at most `max_chars` characters
/// that do not start with [`VERTICAL_JOIN_EXEMPT`] are concatenated without
/// a separator. The run ends at a longer line, a blank line, or the end of
/// the input.
pub fn join_vertical_lines(text: &str, max_chars: usize) -> JoinedLines {
    let mut joined = JoinedLines::default();
    let mut buffer = String::new();
    let mut buffered = 0usize;

    for line in text.split('\n') {
        let stripped = line.trim();

        if stripped.is_empty() {
            flush_run(&mut joined, &mut buffer, &mut buffered);
            joined.lines.push(String::new());
            continue;
        }

        if stripped.chars().count() <= max_chars && !stripped.starts_with(VERTICAL_JOIN_EXEMPT) {
            buffer.push_str(stripped);
            buffered += 1;
        } else {
            flush_run(&mut joined, &mut buffer, &mut buffered);
            joined.lines.push(stripped.to_string());
        }
    }

    flush_run(&mut joined, &mut buffer, &mut buffered);
    joined
}

fn flush_run(joined: &mut JoinedLines, buffer: &mut String, buffered: &mut usize) {
    if !buffer.is_empty() {
        if *buffered > 1 {
            joined.merged_runs += 1;
        }
        joined.lines.push(std::mem::take(buffer));
    }
    *buffered = 0;
}
