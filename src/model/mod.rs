//! Text model shared by extraction and formatting.
//!
//! Extraction produces [`PageText`], which is joined into [`RawText`].
//! Formatting turns raw text into a [`FormattedDocument`] of classified
//! [`Line`]s.

mod line;
mod page;

pub use line::{FormattedDocument, Line, LineKind};
pub use page::{EmptyPagePolicy, PageText, RawText, PAGE_SEPARATOR};
