//! Extraction options and configuration.

use std::path::PathBuf;

use super::BackendKind;
use crate::model::{EmptyPagePolicy, PageText, RawText};

/// Options for extracting text from PDF documents.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Backends to try, in priority order
    pub backends: Vec<BackendKind>,

    /// Error handling mode for page-level failures
    pub error_mode: ErrorMode,

    /// How empty pages are joined
    pub empty_pages: EmptyPagePolicy,

    /// Directory searched for the pdfium shared library
    pub pdfium_library_dir: Option<PathBuf>,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend order.
    pub fn with_backends(mut self, backends: impl IntoIterator<Item = BackendKind>) -> Self {
        self.backends = backends.into_iter().collect();
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (page errors become empty pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the empty page policy.
    pub fn with_empty_pages(mut self, policy: EmptyPagePolicy) -> Self {
        self.empty_pages = policy;
        self
    }

    /// Keep a page separator for empty pages.
    pub fn keep_empty_pages(mut self) -> Self {
        self.empty_pages = EmptyPagePolicy::Keep;
        self
    }

    /// Set the directory holding the pdfium shared library.
    pub fn with_pdfium_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pdfium_library_dir = Some(dir.into());
        self
    }

    /// Join extracted pages into raw text using the empty-page policy.
    pub fn join_pages(&self, pages: &PageText) -> RawText {
        pages.join(self.empty_pages)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            backends: BackendKind::ALL.to_vec(),
            error_mode: ErrorMode::Strict,
            empty_pages: EmptyPagePolicy::Skip,
            pdfium_library_dir: None,
        }
    }
}

/// Error handling mode for page-level extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// A failing page fails the whole backend
    #[default]
    Strict,
    /// A failing page is logged and treated as empty
    Lenient,
}
