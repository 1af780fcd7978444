//! End-to-end conversion: extract, format, write.
//!
//! # Example
//!
//! ```no_run
//! use pdfreflow::convert::{convert_file, ConvertOptions};
//! use pdfreflow::render::FormatOptions;
//!
//! fn main() -> pdfreflow::Result<()> {
//!     let options = ConvertOptions::new().with_format_options(FormatOptions::cjk_aware());
//!     let result = convert_file("rules.pdf", "rules.md", &options)?;
//!     println!("{} pages via {}", result.page_count, result.backend);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use crate::error::{Error, Result};
use crate::extract::{Attempt, BackendKind, ExtractOptions, Extraction, Extractor};
use crate::model::FormattedDocument;
use crate::render::{self, FormatOptions, FormatStats, Formatter, JsonFormat};

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Extraction options
    pub extract: ExtractOptions,

    /// Formatting options
    pub format: FormatOptions,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set formatting options.
    pub fn with_format_options(mut self, options: FormatOptions) -> Self {
        self.format = options;
        self
    }

    /// Set output format.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// JSON structure of the formatted document
    Json(JsonFormat),
}

impl OutputFormat {
    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Json(_) => "application/json",
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content, exactly as written to the output file
    pub content: String,

    /// Formatted document the content was rendered from
    pub document: FormattedDocument,

    /// Backend that produced the text
    pub backend: BackendKind,

    /// Every backend attempt, in order
    pub attempts: Vec<Attempt>,

    /// Number of pages in the source document
    pub page_count: usize,

    /// 1-based numbers of pages that yielded no text
    pub empty_pages: Vec<usize>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Formatting statistics.
    pub fn stats(&self) -> FormatStats {
        self.document.stats()
    }
}

/// Runs the extract and format stages with one set of options.
pub struct Converter {
    extractor: Extractor,
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter using the backends named in `options.extract`.
    pub fn new(options: ConvertOptions) -> Self {
        let extractor = Extractor::new(options.extract.clone());
        Self { extractor, options }
    }

    /// Create a converter around an existing extractor.
    pub fn with_extractor(extractor: Extractor, options: ConvertOptions) -> Self {
        Self { extractor, options }
    }

    /// The options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Extract and format `input` without writing anything.
    ///
    /// Fails with [`Error::NoText`] when the winning backend produced only
    /// whitespace.
    pub fn convert<P: AsRef<Path>>(&self, input: P) -> Result<ConvertResult> {
        let extraction = self.extractor.extract(input)?;
        if extraction.text.is_blank() {
            return Err(Error::NoText {
                backend: extraction.backend,
            });
        }

        let document = Formatter::new(self.options.format.clone()).format(extraction.text.as_str());
        let content = match self.options.output_format {
            OutputFormat::Markdown => render::to_markdown(&document),
            OutputFormat::Json(format) => render::to_json(&document, format)?,
        };

        Ok(build_result(extraction, document, content, self.options.output_format))
    }

    /// Convert `input` and write the artifact to `output`.
    ///
    /// Nothing is written if any stage fails.
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConvertResult> {
        let result = self.convert(input)?;
        write_output(output, &result.content)?;
        Ok(result)
    }
}

fn build_result(
    extraction: Extraction,
    document: FormattedDocument,
    content: String,
    output_format: OutputFormat,
) -> ConvertResult {
    ConvertResult {
        content,
        document,
        backend: extraction.backend,
        attempts: extraction.attempts,
        page_count: extraction.pages.page_count(),
        empty_pages: extraction.pages.empty_pages(),
        mime_type: output_format.mime_type(),
    }
}

/// Convert a PDF file and write the result to `output`.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    Converter::new(options.clone()).convert_file(input, output)
}

/// Write an artifact as UTF-8, replacing any existing file.
pub fn write_output<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, content)?;
    log::info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
