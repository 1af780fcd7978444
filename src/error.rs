//! Error types for pdfreflow.

use std::io;
use thiserror::Error;

use crate::extract::{Attempt, BackendKind};

/// Result type alias for pdfreflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backend is not present in this build or runtime environment.
    #[error("{backend} is unavailable: {reason}")]
    CapabilityUnavailable {
        backend: BackendKind,
        reason: String,
    },

    /// The backend loaded but failed while reading the document.
    #[error("{backend} failed: {reason}")]
    ExtractionFailure {
        backend: BackendKind,
        reason: String,
    },

    /// Every configured backend was unavailable or failed.
    #[error("all extraction backends failed{}", summarize(.attempts))]
    AllBackendsExhausted { attempts: Vec<Attempt> },

    /// A backend succeeded but the document holds no extractable text.
    #[error("{backend} extracted no text (the document may be scanned or image-based)")]
    NoText { backend: BackendKind },

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    Pdf(String),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error only means the backend should be skipped.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::CapabilityUnavailable { .. })
    }

    /// The reason for a backend error, without the backend prefix.
    pub fn reason(&self) -> String {
        match self {
            Error::CapabilityUnavailable { reason, .. }
            | Error::ExtractionFailure { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

fn summarize(attempts: &[Attempt]) -> String {
    if attempts.is_empty() {
        return " (no backends configured)".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("\n  - {}", a))
        .collect::<String>()
}
