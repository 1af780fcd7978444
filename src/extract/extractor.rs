//! Backend fallback chain.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::backend::{guard_panics, BackendKind, TextBackend};
use super::options::ExtractOptions;
use crate::error::{Error, Result};
use crate::model::{PageText, RawText};

/// Outcome of trying one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The backend produced text
    Succeeded,
    /// The backend is not available here
    Skipped(String),
    /// The backend loaded but failed on the document
    Failed(String),
}

/// Record of one backend attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Backend that was tried
    pub backend: BackendKind,

    /// What happened
    pub outcome: AttemptOutcome,
}

impl Attempt {
    /// Create an attempt record.
    pub fn new(backend: BackendKind, outcome: AttemptOutcome) -> Self {
        Self { backend, outcome }
    }

    /// Whether the backend succeeded.
    pub fn succeeded(&self) -> bool {
        self.outcome == AttemptOutcome::Succeeded
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            AttemptOutcome::Succeeded => write!(f, "{}: succeeded", self.backend),
            AttemptOutcome::Skipped(reason) => write!(f, "{}: skipped ({})", self.backend, reason),
            AttemptOutcome::Failed(reason) => write!(f, "{}: failed ({})", self.backend, reason),
        }
    }
}

/// Result of a successful extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Pages joined into raw text
    pub text: RawText,

    /// Per-page text the raw text was joined from
    pub pages: PageText,

    /// Backend that produced the text
    pub backend: BackendKind,

    /// Every attempt made, in order, ending with the successful one
    pub attempts: Vec<Attempt>,
}

/// Tries a prioritized list of backends until one succeeds.
pub struct Extractor {
    backends: Vec<Box<dyn TextBackend>>,
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor for the backends named in `options`.
    pub fn new(options: ExtractOptions) -> Self {
        let backends = options
            .backends
            .iter()
            .map(|kind| kind.backend(&options))
            .collect();
        Self { backends, options }
    }

    /// Create an extractor over caller-supplied backends.
    ///
    /// `options.backends` is ignored; the given order is used.
    pub fn with_backends(backends: Vec<Box<dyn TextBackend>>, options: ExtractOptions) -> Self {
        Self { backends, options }
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Names of the configured backends, in order.
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Probe every configured backend without opening a document.
    pub fn availability(&self) -> Vec<(BackendKind, Result<()>)> {
        self.backends
            .iter()
            .map(|b| (b.kind(), guard_panics(b.kind(), || b.probe())))
            .collect()
    }

    /// Extract the document's text with the first backend that succeeds.
    ///
    /// Fails with [`Error::AllBackendsExhausted`] only when every backend
    /// was unavailable or failed.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        let path = path.as_ref();
        let mut attempts = Vec::with_capacity(self.backends.len());

        for backend in &self.backends {
            let kind = backend.kind();
            log::info!("Trying {} on {}", backend.name(), path.display());

            let loaded = guard_panics(kind, || {
                backend.probe()?;
                backend.load_pages(path, &self.options)
            });

            match loaded {
                Ok(pages) => {
                    for page_num in pages.empty_pages() {
                        log::debug!("{}: page {} yielded no text", backend.name(), page_num);
                    }
                    let text = self.options.join_pages(&pages);
                    log::info!(
                        "Success with {} ({} pages, {} bytes)",
                        backend.name(),
                        pages.page_count(),
                        text.len()
                    );
                    attempts.push(Attempt::new(kind, AttemptOutcome::Succeeded));
                    return Ok(Extraction {
                        text,
                        pages,
                        backend: kind,
                        attempts,
                    });
                }
                Err(e) if e.is_unavailable() => {
                    log::info!("{} not available: {}", backend.name(), e.reason());
                    attempts.push(Attempt::new(kind, AttemptOutcome::Skipped(e.reason())));
                }
                Err(e) => {
                    log::warn!("{} failed: {}", backend.name(), e.reason());
                    attempts.push(Attempt::new(kind, AttemptOutcome::Failed(e.reason())));
                }
            }
        }

        Err(Error::AllBackendsExhausted { attempts })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::backend::failure;
    use crate::extract::UnavailableBackend;
    use crate::model::EmptyPagePolicy;

    struct FixedBackend(BackendKind, Vec<&'static str>);

    impl TextBackend for FixedBackend {
        fn kind(&self) -> BackendKind {
            self.0
        }

        fn load_pages(&self, _path: &Path, _options: &ExtractOptions) -> Result<PageText> {
            Ok(PageText::new(self.1.iter().map(|s| s.to_string()).collect()))
        }
    }

    struct BrokenBackend(BackendKind);

    impl TextBackend for BrokenBackend {
        fn kind(&self) -> BackendKind {
            self.0
        }

        fn load_pages(&self, _path: &Path, _options: &ExtractOptions) -> Result<PageText> {
            Err(failure(self.0, "corrupt xref table"))
        }
    }

    struct PanickingBackend;

    impl TextBackend for PanickingBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::PdfExtract
        }

        fn load_pages(&self, _path: &Path, _options: &ExtractOptions) -> Result<PageText> {
            panic!("index out of bounds")
        }
    }

    #[test]
    fn test_first_success_wins() {
        let extractor = Extractor::with_backends(
            vec![
                Box::new(FixedBackend(BackendKind::PdfExtract, vec!["first"])),
                Box::new(FixedBackend(BackendKind::Lopdf, vec!["second"])),
            ],
            ExtractOptions::default(),
        );

        let extraction = extractor.extract("doc.pdf").unwrap();
        assert_eq!(extraction.backend, BackendKind::PdfExtract);
        assert_eq!(extraction.text.as_str(), "first\n\n");
        assert_eq!(extraction.attempts.len(), 1);
        assert!(extraction.attempts[0].succeeded());
    }

    #[test]
    fn test_falls_through_skips_and_failures() {
        let extractor = Extractor::with_backends(
            vec![
                Box::new(UnavailableBackend::new(BackendKind::Pdfium, "no library")),
                Box::new(BrokenBackend(BackendKind::PdfExtract)),
                Box::new(FixedBackend(BackendKind::Lopdf, vec!["a", "", "c"])),
            ],
            ExtractOptions::default(),
        );

        let extraction = extractor.extract("doc.pdf").unwrap();
        assert_eq!(extraction.backend, BackendKind::Lopdf);
        assert_eq!(extraction.text.as_str(), "a\n\nc\n\n");
        assert_eq!(extraction.pages.empty_pages(), vec![2]);
        assert_eq!(
            extraction.attempts,
            vec![
                Attempt::new(
                    BackendKind::Pdfium,
                    AttemptOutcome::Skipped("no library".into())
                ),
                Attempt::new(
                    BackendKind::PdfExtract,
                    AttemptOutcome::Failed("corrupt xref table".into())
                ),
                Attempt::new(BackendKind::Lopdf, AttemptOutcome::Succeeded),
            ]
        );
    }

    #[test]
    fn test_keep_empty_pages() {
        let extractor = Extractor::with_backends(
            vec![Box::new(FixedBackend(BackendKind::Lopdf, vec!["a", "", "c"]))],
            ExtractOptions::default().with_empty_pages(EmptyPagePolicy::Keep),
        );

        let extraction = extractor.extract("doc.pdf").unwrap();
        assert_eq!(extraction.text.as_str(), "a\n\n\n\nc\n\n");
    }

    #[test]
    fn test_all_backends_exhausted() {
        let extractor = Extractor::with_backends(
            vec![
                Box::new(UnavailableBackend::new(BackendKind::Pdfium, "no library")),
                Box::new(BrokenBackend(BackendKind::Lopdf)),
            ],
            ExtractOptions::default(),
        );

        match extractor.extract("doc.pdf") {
            Err(Error::AllBackendsExhausted { attempts }) => {
                assert_eq!(attempts.len(), 2);
                assert!(attempts.iter().all(|a| !a.succeeded()));
            }
            other => panic!("expected exhaustion, got {:?}", other.map(|e| e.backend)),
        }
    }

    #[test]
    fn test_no_backends() {
        let extractor = Extractor::with_backends(vec![], ExtractOptions::default());
        assert!(matches!(
            extractor.extract("doc.pdf"),
            Err(Error::AllBackendsExhausted { attempts }) if attempts.is_empty()
        ));
    }

    #[test]
    fn test_panic_is_recorded_as_failure() {
        let extractor = Extractor::with_backends(
            vec![
                Box::new(PanickingBackend),
                Box::new(FixedBackend(BackendKind::Lopdf, vec!["ok"])),
            ],
            ExtractOptions::default(),
        );

        let extraction = extractor.extract("doc.pdf").unwrap();
        assert_eq!(extraction.backend, BackendKind::Lopdf);
        match &extraction.attempts[0].outcome {
            AttemptOutcome::Failed(reason) => assert!(reason.contains("index out of bounds")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_default_extractor_order() {
        let extractor = Extractor::default();
        assert_eq!(
            extractor.backend_names(),
            vec!["pdfium", "pdf-extract", "lopdf"]
        );
    }

    #[test]
    fn test_availability_reports_lopdf() {
        let extractor = Extractor::new(ExtractOptions::new().with_backends([BackendKind::Lopdf]));
        let report = extractor.availability();
        assert_eq!(report.len(), 1);
        assert!(report[0].1.is_ok());
    }

    #[test]
    fn test_extract_matches_try_extract() {
        for options in [
            ExtractOptions::default(),
            ExtractOptions::default().keep_empty_pages(),
        ] {
            let pages = vec!["a", "", "c"];
            let direct = FixedBackend(BackendKind::Lopdf, pages.clone())
                .try_extract(Path::new("doc.pdf"), &options)
                .unwrap();
            let extractor = Extractor::with_backends(
                vec![Box::new(FixedBackend(BackendKind::Lopdf, pages))],
                options,
            );
            let extraction = extractor.extract("doc.pdf").unwrap();
            assert_eq!(extraction.text, direct);
        }
    }

    #[test]
    fn test_try_extract_joins_pages() {
        let backend = FixedBackend(BackendKind::Lopdf, vec!["", "b"]);
        let path = Path::new("doc.pdf");

        let skipped = backend.try_extract(path, &ExtractOptions::default()).unwrap();
        assert_eq!(skipped.as_str(), "b\n\n");

        let kept = backend
            .try_extract(path, &ExtractOptions::default().keep_empty_pages())
            .unwrap();
        assert_eq!(kept.as_str(), "\n\nb\n\n");
    }

    #[test]
    fn test_attempt_display() {
        let attempt = Attempt::new(BackendKind::Lopdf, AttemptOutcome::Failed("bad".into()));
        assert_eq!(attempt.to_string(), "lopdf: failed (bad)");
    }
}
