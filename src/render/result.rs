//! Formatting statistics.

use serde::{Deserialize, Serialize};

use crate::model::{FormattedDocument, LineKind};

/// Statistics collected from a formatted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatStats {
    /// Total number of lines
    pub line_count: usize,

    /// Number of headings of any level
    pub heading_count: usize,

    /// Number of level-1 headings
    pub h1_count: usize,

    /// Number of level-2 headings
    pub h2_count: usize,

    /// Number of level-3 headings
    pub h3_count: usize,

    /// Number of body lines
    pub body_count: usize,

    /// Number of blank lines
    pub blank_count: usize,

    /// Number of vertical-text runs merged into single lines
    pub merged_runs: usize,

    /// Character count (excluding whitespace)
    pub char_count: usize,
}

impl FormatStats {
    /// Collect statistics from a document.
    pub fn from_document(doc: &FormattedDocument) -> Self {
        let mut stats = Self {
            line_count: doc.len(),
            merged_runs: doc.merged_runs,
            ..Self::default()
        };

        for line in &doc.lines {
            match line.kind {
                LineKind::Blank => stats.blank_count += 1,
                LineKind::Body => stats.body_count += 1,
                LineKind::Heading(level) => {
                    stats.heading_count += 1;
                    match level {
                        1 => stats.h1_count += 1,
                        2 => stats.h2_count += 1,
                        _ => stats.h3_count += 1,
                    }
                }
            }
            stats.char_count += line.text.chars().filter(|c| !c.is_whitespace()).count();
        }

        stats
    }
}

impl FormattedDocument {
    /// Collect formatting statistics.
    pub fn stats(&self) -> FormatStats {
        FormatStats::from_document(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{format_text, FormatOptions};

    #[test]
    fn test_stats_cjk_document() {
        let doc = format_text(
            "サンマフリー\n【注意】\n■ 点数。\n\n本文が続きます\na\nb",
            &FormatOptions::cjk_aware(),
        );
        let stats = doc.stats();

        assert_eq!(stats.h1_count, 1);
        assert_eq!(stats.h3_count, 2);
        assert_eq!(stats.heading_count, 3);
        assert_eq!(stats.blank_count, 1);
        assert_eq!(stats.body_count, 2);
        assert_eq!(stats.merged_runs, 1);
        assert_eq!(stats.line_count, 6);
    }

    #[test]
    fn test_stats_empty_document() {
        let stats = FormattedDocument::new().stats();
        assert_eq!(stats, FormatStats::default());
    }
}
