//! # pdfreflow
//!
//! Extract text from PDF documents and reflow it into Markdown.
//!
//! Text is pulled through a prioritized chain of extraction backends: the
//! first backend that is available and succeeds wins. The raw text is then
//! classified line by line into headings, body text and blank lines.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfreflow::{extract_text, format_text, FormatOptions};
//!
//! fn main() -> pdfreflow::Result<()> {
//!     let raw = extract_text("rules.pdf")?;
//!     let doc = format_text(&raw, &FormatOptions::cjk_aware());
//!     println!("{}", doc.to_markdown());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Backend fallback**: pdfium, pdf-extract and lopdf, tried in order
//! - **Heading heuristics**: a generic shape-based variant and a CJK-aware variant
//! - **CJK reflow**: collapses spaces between ideographs and rejoins vertical text
//! - **Output formats**: Markdown and JSON

pub mod convert;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use convert::{convert_file, write_output, ConvertOptions, ConvertResult, Converter, OutputFormat};
pub use error::{Error, Result};
pub use extract::{
    Attempt, AttemptOutcome, BackendKind, ErrorMode, ExtractOptions, Extraction, Extractor,
    TextBackend,
};
pub use model::{EmptyPagePolicy, FormattedDocument, Line, LineKind, PageText, RawText};
pub use render::{FormatOptions, FormatStats, Formatter, HeuristicVariant, JsonFormat};

use std::path::Path;

/// Extract the raw text of a PDF with the default backend chain.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::extract_text;
///
/// let text = extract_text("document.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let extraction = Extractor::default().extract(path)?;
    Ok(extraction.text.into_string())
}

/// Convert a PDF to Markdown with the generic heading heuristics.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::to_markdown;
///
/// let markdown = to_markdown("document.pdf").unwrap();
/// std::fs::write("output.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    to_markdown_with_options(path, &FormatOptions::default())
}

/// Convert a PDF to Markdown with custom formatting options.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{to_markdown_with_options, FormatOptions};
///
/// let options = FormatOptions::cjk_aware().with_title_keywords(["規約"]);
/// let markdown = to_markdown_with_options("document.pdf", &options).unwrap();
/// ```
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &FormatOptions,
) -> Result<String> {
    let raw = extract_text(path)?;
    Ok(format_text(&raw, options).to_markdown())
}

/// Classify raw text into a formatted document.
pub fn format_text(raw: &str, options: &FormatOptions) -> FormattedDocument {
    render::format_text(raw, options)
}

/// Builder for extracting and formatting PDF documents.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{BackendKind, HeuristicVariant, PdfReflow};
///
/// let markdown = PdfReflow::new()
///     .variant(HeuristicVariant::CjkAware)
///     .title_keywords(["サンマフリー"])
///     .backends([BackendKind::PdfExtract, BackendKind::Lopdf])
///     .lenient()
///     .extract("rules.pdf")?
///     .to_markdown();
/// # Ok::<(), pdfreflow::Error>(())
/// ```
pub struct PdfReflow {
    extract_options: ExtractOptions,
    format_options: FormatOptions,
}

impl PdfReflow {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            format_options: FormatOptions::default(),
        }
    }

    /// Set the heading heuristics.
    pub fn variant(mut self, variant: HeuristicVariant) -> Self {
        self.format_options = self.format_options.with_variant(variant);
        self
    }

    /// Replace the title keywords of the CJK-aware variant.
    pub fn title_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.format_options = self.format_options.with_title_keywords(keywords);
        self
    }

    /// Set the backend order.
    pub fn backends(mut self, backends: impl IntoIterator<Item = BackendKind>) -> Self {
        self.extract_options = self.extract_options.with_backends(backends);
        self
    }

    /// Treat page-level errors as empty pages.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Mark every page boundary, including empty pages.
    pub fn keep_empty_pages(mut self) -> Self {
        self.extract_options = self.extract_options.keep_empty_pages();
        self
    }

    /// Normalize text to NFC before formatting.
    pub fn normalize_unicode(mut self) -> Self {
        self.format_options = self.format_options.with_unicode_normalization(true);
        self
    }

    /// Set all formatting options at once.
    pub fn with_format_options(mut self, options: FormatOptions) -> Self {
        self.format_options = options;
        self
    }

    /// Extract a PDF file and return a result wrapper.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<PdfReflowResult> {
        let extraction = Extractor::new(self.extract_options).extract(path)?;
        let document = Formatter::new(self.format_options).format(extraction.text.as_str());
        Ok(PdfReflowResult {
            extraction,
            document,
        })
    }
}

impl Default for PdfReflow {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting and formatting a PDF document.
pub struct PdfReflowResult {
    /// The extraction the document was formatted from
    pub extraction: Extraction,
    /// The formatted document
    pub document: FormattedDocument,
}

impl PdfReflowResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        self.document.to_markdown()
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the raw extracted text.
    pub fn raw_text(&self) -> &str {
        self.extraction.text.as_str()
    }

    /// Backend that produced the text.
    pub fn backend(&self) -> BackendKind {
        self.extraction.backend
    }

    /// Get the document.
    pub fn document(&self) -> &FormattedDocument {
        &self.document
    }
}
