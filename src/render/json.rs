//! JSON rendering of formatted documents.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::FormattedDocument;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a formatted document to JSON.
pub fn to_json(doc: &FormattedDocument, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Serialize any value with the given JSON format.
pub fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
