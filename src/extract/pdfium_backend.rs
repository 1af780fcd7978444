//! pdfium adapter.
//!
//! pdfium is loaded from a shared library at runtime, so its absence is
//! reported as an unavailable capability rather than a failure.

use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;

use super::backend::{collect_pages, failure, BackendKind, TextBackend};
use super::options::ExtractOptions;
use crate::error::{Error, Result};
use crate::model::PageText;

/// Concrete [`TextBackend`] backed by `pdfium-render`.
#[derive(Debug, Clone, Default)]
pub struct PdfiumBackend {
    library_dir: Option<PathBuf>,
}

impl PdfiumBackend {
    /// Create an adapter that looks in `library_dir` before the system path.
    pub fn new(library_dir: Option<PathBuf>) -> Self {
        Self { library_dir }
    }

    fn bind(&self) -> Result<Pdfium> {
        if let Some(ref dir) = self.library_dir {
            let path = Pdfium::pdfium_platform_library_name_at_path(dir);
            match Pdfium::bind_to_library(&path) {
                Ok(bindings) => return Ok(Pdfium::new(bindings)),
                Err(e) => log::debug!("pdfium: {} not usable: {}", path.display(), e),
            }
        }

        let bindings = Pdfium::bind_to_system_library().map_err(|e| {
            Error::CapabilityUnavailable {
                backend: BackendKind::Pdfium,
                reason: format!("cannot load the pdfium library: {}", e),
            }
        })?;
        Ok(Pdfium::new(bindings))
    }
}

impl TextBackend for PdfiumBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Pdfium
    }

    fn probe(&self) -> Result<()> {
        self.bind().map(|_| ())
    }

    fn load_pages(&self, path: &Path, options: &ExtractOptions) -> Result<PageText> {
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| failure(BackendKind::Pdfium, e))?;

        let pages = document.pages().iter().enumerate().map(|(index, page)| {
            let text = page.text().map(|text| text.all());
            (index + 1, text)
        });
        collect_pages(BackendKind::Pdfium, pages, options)
    }
}
