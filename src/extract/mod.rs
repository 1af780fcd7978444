//! Text extraction with a backend fallback chain.

mod backend;
mod extractor;
mod lopdf_backend;
mod options;
#[cfg(feature = "pdf-extract")]
mod pdf_extract_backend;
#[cfg(feature = "pdfium")]
mod pdfium_backend;

pub use backend::{BackendKind, TextBackend, UnavailableBackend};
pub use extractor::{Attempt, AttemptOutcome, Extraction, Extractor};
pub use lopdf_backend::LopdfBackend;
pub use options::{ErrorMode, ExtractOptions};
#[cfg(feature = "pdf-extract")]
pub use pdf_extract_backend::PdfExtractBackend;
#[cfg(feature = "pdfium")]
pub use pdfium_backend::PdfiumBackend;
