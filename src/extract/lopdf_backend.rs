//! lopdf adapter.
//!
//! lopdf exposes a page map and an indexed text accessor rather than a page
//! sequence, so pages are enumerated by number and extracted one at a time.

use std::path::Path;

use lopdf::Document as LopdfDocument;

use super::backend::{collect_pages, failure, BackendKind, TextBackend};
use super::options::ExtractOptions;
use crate::error::{Error, Result};
use crate::model::PageText;

/// Concrete [`TextBackend`] backed by `lopdf::Document`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    /// Extract pages from an already loaded document.
    pub fn pages_of(doc: &LopdfDocument, options: &ExtractOptions) -> Result<PageText> {
        let pages = doc
            .get_pages()
            .into_keys()
            .map(|page_num| (page_num as usize, doc.extract_text(&[page_num])));
        collect_pages(BackendKind::Lopdf, pages, options)
    }
}

impl TextBackend for LopdfBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Lopdf
    }

    fn load_pages(&self, path: &Path, options: &ExtractOptions) -> Result<PageText> {
        let doc = LopdfDocument::load(path)
            .map_err(|e| failure(BackendKind::Lopdf, Error::from(e)))?;

        if doc.is_encrypted() {
            return Err(failure(BackendKind::Lopdf, "document is encrypted"));
        }

        Self::pages_of(&doc, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn build_doc(texts: &[&str]) -> LopdfDocument {
        let mut doc = LopdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in texts {
            let operations = if text.is_empty() {
                vec![]
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn test_pages_in_order() {
        let doc = build_doc(&["First page", "Second page"]);
        let pages = LopdfBackend::pages_of(&doc, &ExtractOptions::default()).unwrap();

        assert_eq!(pages.page_count(), 2);
        assert!(pages.pages()[0].contains("First page"));
        assert!(pages.pages()[1].contains("Second page"));
    }

    #[test]
    fn test_page_without_text_keeps_slot() {
        let doc = build_doc(&["Only text", ""]);
        let pages = LopdfBackend::pages_of(&doc, &ExtractOptions::default()).unwrap();

        assert_eq!(pages.page_count(), 2);
        assert!(pages.pages()[1].trim().is_empty());
    }

    #[test]
    fn test_missing_file_is_failure() {
        let err = LopdfBackend
            .load_pages(
                Path::new("/nonexistent/missing.pdf"),
                &ExtractOptions::default(),
            )
            .unwrap_err();
        assert!(!err.is_unavailable());
        assert!(err.to_string().starts_with("lopdf failed"));
    }
}
