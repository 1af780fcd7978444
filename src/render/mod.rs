//! Rendering of raw text into Markdown and JSON.
//!
//! The [`Formatter`] classifies each line of raw text using one of the
//! [`HeuristicVariant`]s and produces a [`FormattedDocument`](crate::model::FormattedDocument).

mod json;
mod markdown;
mod options;
pub mod reflow;
mod result;

pub use json::{serialize, to_json, JsonFormat};
pub use markdown::{format_text, to_markdown, Formatter};
pub use options::{FormatOptions, HeuristicVariant, DEFAULT_TITLE_KEYWORDS};
pub use result::FormatStats;
