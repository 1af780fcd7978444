//! Text backend abstraction layer.
//!
//! Each concrete PDF library is wrapped in an adapter implementing
//! [`TextBackend`], which hides the library's API shape behind a single
//! "path in, per-page text out" operation.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::options::{ErrorMode, ExtractOptions};
use crate::error::{Error, Result};
use crate::model::{PageText, RawText};

/// Known extraction backends, in decreasing capability order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// pdfium, bound at runtime from the shared library
    Pdfium,
    /// pdf-extract
    PdfExtract,
    /// lopdf
    Lopdf,
}

impl BackendKind {
    /// All backends in default priority order.
    pub const ALL: [BackendKind; 3] = [
        BackendKind::Pdfium,
        BackendKind::PdfExtract,
        BackendKind::Lopdf,
    ];

    /// Short name used in diagnostics and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Pdfium => "pdfium",
            BackendKind::PdfExtract => "pdf-extract",
            BackendKind::Lopdf => "lopdf",
        }
    }

    /// Whether support for this backend was compiled in.
    pub fn is_compiled(&self) -> bool {
        match self {
            BackendKind::Pdfium => cfg!(feature = "pdfium"),
            BackendKind::PdfExtract => cfg!(feature = "pdf-extract"),
            BackendKind::Lopdf => true,
        }
    }

    /// Instantiate the adapter for this backend.
    #[cfg_attr(not(feature = "pdfium"), allow(unused_variables))]
    pub fn backend(self, options: &ExtractOptions) -> Box<dyn TextBackend> {
        match self {
            #[cfg(feature = "pdfium")]
            BackendKind::Pdfium => Box::new(super::pdfium_backend::PdfiumBackend::new(
                options.pdfium_library_dir.clone(),
            )),
            #[cfg(feature = "pdf-extract")]
            BackendKind::PdfExtract => Box::new(super::pdf_extract_backend::PdfExtractBackend),
            BackendKind::Lopdf => Box::new(super::lopdf_backend::LopdfBackend),
            #[allow(unreachable_patterns)]
            kind => Box::new(UnavailableBackend::new(
                kind,
                format!("built without the `{}` feature", kind.name()),
            )),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdfium" => Ok(BackendKind::Pdfium),
            "pdf-extract" | "pdf_extract" | "pdfextract" => Ok(BackendKind::PdfExtract),
            "lopdf" => Ok(BackendKind::Lopdf),
            other => Err(Error::Config(format!("unknown backend: {}", other))),
        }
    }
}

/// Abstract interface for a PDF text-extraction capability.
pub trait TextBackend {
    /// Which backend this adapter wraps.
    fn kind(&self) -> BackendKind;

    /// Name used in diagnostics.
    fn name(&self) -> &str {
        self.kind().name()
    }

    /// Check that the capability is present without opening a document.
    ///
    /// Returns [`Error::CapabilityUnavailable`] when it is not.
    fn probe(&self) -> Result<()> {
        Ok(())
    }

    /// Open the document and extract the text of every page, in order.
    ///
    /// A page without text yields an empty string; its slot is kept.
    fn load_pages(&self, path: &Path, options: &ExtractOptions) -> Result<PageText>;

    /// Extract the document as joined raw text.
    fn try_extract(&self, path: &Path, options: &ExtractOptions) -> Result<RawText> {
        let pages = self.load_pages(path, options)?;
        Ok(options.join_pages(&pages))
    }
}

/// Stand-in for a backend whose support was not compiled in.
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    kind: BackendKind,
    reason: String,
}

impl UnavailableBackend {
    /// Create a stand-in that always reports `reason`.
    pub fn new(kind: BackendKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    fn error(&self) -> Error {
        Error::CapabilityUnavailable {
            backend: self.kind,
            reason: self.reason.clone(),
        }
    }
}

impl TextBackend for UnavailableBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn probe(&self) -> Result<()> {
        Err(self.error())
    }

    fn load_pages(&self, _path: &Path, _options: &ExtractOptions) -> Result<PageText> {
        Err(self.error())
    }
}

/// Build an [`Error::ExtractionFailure`] for `backend`.
pub(crate) fn failure(backend: BackendKind, reason: impl fmt::Display) -> Error {
    Error::ExtractionFailure {
        backend,
        reason: reason.to_string(),
    }
}

/// Collect per-page extraction results in document order.
///
/// `pages` yields 1-based page numbers with each page's result. In
/// [`ErrorMode::Strict`] the first page error fails the backend; in
/// [`ErrorMode::Lenient`] it is logged and the page keeps an empty slot.
pub(crate) fn collect_pages<E: fmt::Display>(
    backend: BackendKind,
    pages: impl IntoIterator<Item = (usize, std::result::Result<String, E>)>,
    options: &ExtractOptions,
) -> Result<PageText> {
    let mut collected = PageText::default();

    for (page_num, result) in pages {
        match result {
            Ok(text) => collected.push(text),
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("{}: page {} could not be read: {}", backend, page_num, e);
                collected.push(String::new());
            }
            Err(e) => return Err(failure(backend, format!("page {}: {}", page_num, e))),
        }
    }

    Ok(collected)
}

/// Run `f`, turning a panic inside a backend library into an error.
///
/// Some PDF libraries panic on malformed input instead of returning errors.
/// The panic hook still runs, so the default hook prints the panic message
/// to stderr before the failure is recorded.
pub(crate) fn guard_panics<T>(backend: BackendKind, f: impl FnOnce() -> Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(failure(
            backend,
            format!("panicked: {}", panic_message(payload.as_ref())),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
