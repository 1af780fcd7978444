//! Formatting options and configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default title keywords for the CJK-aware variant.
pub const DEFAULT_TITLE_KEYWORDS: [&str; 2] = ["サンマフリー", "ルール"];

/// Heading heuristics applied by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicVariant {
    /// Short lines without terminal punctuation become level-2 headings
    #[default]
    Generic,
    /// CJK whitespace collapse, vertical-text joining and marker headings
    CjkAware,
}

/// Options for formatting raw text as Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Heuristic variant
    pub variant: HeuristicVariant,

    /// Generic: a heading must be shorter than this many characters
    pub max_heading_chars: usize,

    /// CJK-aware: lines up to this many characters are joined as vertical text
    pub vertical_run_max_chars: usize,

    /// CJK-aware: lines containing any of these become the title
    pub title_keywords: Vec<String>,

    /// Normalize Unicode to NFC before formatting
    pub normalize_unicode: bool,
}

impl FormatOptions {
    /// Create new format options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for the generic variant.
    pub fn generic() -> Self {
        Self::default()
    }

    /// Options for the CJK-aware variant.
    pub fn cjk_aware() -> Self {
        Self::default().with_variant(HeuristicVariant::CjkAware)
    }

    /// Set the heuristic variant.
    pub fn with_variant(mut self, variant: HeuristicVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the generic heading length bound.
    pub fn with_max_heading_chars(mut self, chars: usize) -> Self {
        self.max_heading_chars = chars;
        self
    }

    /// Set the vertical-text join bound.
    pub fn with_vertical_run_max_chars(mut self, chars: usize) -> Self {
        self.vertical_run_max_chars = chars;
        self
    }

    /// Replace the title keywords.
    pub fn with_title_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load options from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            variant: HeuristicVariant::Generic,
            max_heading_chars: 30,
            vertical_run_max_chars: 2,
            title_keywords: DEFAULT_TITLE_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            normalize_unicode: false,
        }
    }
}
