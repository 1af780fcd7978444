//! pdf-extract adapter.

use std::path::Path;

use super::backend::{failure, BackendKind, TextBackend};
use super::options::ExtractOptions;
use crate::error::Result;
use crate::model::PageText;

/// Concrete [`TextBackend`] backed by `pdf_extract`.
///
/// The library extracts the whole document at once, so a bad page fails
/// the backend regardless of the error mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractBackend;

impl TextBackend for PdfExtractBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::PdfExtract
    }

    fn load_pages(&self, path: &Path, _options: &ExtractOptions) -> Result<PageText> {
        let data = std::fs::read(path).map_err(|e| failure(BackendKind::PdfExtract, e))?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&data)
            .map_err(|e| failure(BackendKind::PdfExtract, e))?;
        Ok(PageText::new(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_failure() {
        let err = PdfExtractBackend
            .load_pages(
                Path::new("/nonexistent/missing.pdf"),
                &ExtractOptions::default(),
            )
            .unwrap_err();
        assert!(!err.is_unavailable());
        assert!(err.to_string().starts_with("pdf-extract failed"));
    }
}
