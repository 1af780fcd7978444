//! Page-level text types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator written after each page's text.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// How empty pages are represented when pages are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPagePolicy {
    /// An empty page contributes nothing
    #[default]
    Skip,
    /// An empty page still contributes a page separator
    Keep,
}

/// Per-page text of a document, in document order.
///
/// Every page holds a slot even when its text is empty, so the page
/// count always matches the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pages: Vec<String>,
}

impl PageText {
    /// Create page text from per-page strings.
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Append the next page.
    pub fn push(&mut self, text: impl Into<String>) {
        self.pages.push(text.into());
    }

    /// Number of page slots.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All page texts, in order.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Get a page by number (1-indexed).
    pub fn get(&self, page_num: usize) -> Option<&str> {
        if page_num == 0 {
            return None;
        }
        self.pages.get(page_num - 1).map(String::as_str)
    }

    /// Page numbers (1-indexed) whose text is empty.
    pub fn empty_pages(&self) -> Vec<usize> {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, text)| text.is_empty())
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Whether no page yielded any text.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.is_empty())
    }

    /// Join the pages into raw text.
    pub fn join(&self, policy: EmptyPagePolicy) -> RawText {
        let capacity = self.pages.iter().map(|p| p.len() + 2).sum();
        let mut out = String::with_capacity(capacity);

        for page in &self.pages {
            if page.is_empty() && policy == EmptyPagePolicy::Skip {
                continue;
            }
            out.push_str(page);
            out.push_str(PAGE_SEPARATOR);
        }

        RawText(out)
    }
}

impl From<Vec<String>> for PageText {
    fn from(pages: Vec<String>) -> Self {
        Self::new(pages)
    }
}

/// Text of a whole document, pages joined in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawText(String);

impl RawText {
    /// Wrap an already joined string.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the text holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RawText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RawText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for RawText {
    fn from(text: String) -> Self {
        Self(text)
    }
}
