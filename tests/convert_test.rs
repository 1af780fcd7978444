//! Integration tests for the convert pipeline.

use std::path::Path;

use pdfreflow::convert::{convert_file, write_output, ConvertOptions, Converter, OutputFormat};
use pdfreflow::error::{Error, Result};
use pdfreflow::extract::{BackendKind, ExtractOptions, Extractor, TextBackend, UnavailableBackend};
use pdfreflow::model::{FormattedDocument, PageText};
use pdfreflow::render::{FormatOptions, JsonFormat};
use tempfile::TempDir;

struct PagesBackend(Vec<&'static str>);

impl TextBackend for PagesBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::PdfExtract
    }

    fn load_pages(&self, _path: &Path, _options: &ExtractOptions) -> Result<PageText> {
        Ok(self
            .0
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into())
    }
}

fn converter_with(backends: Vec<Box<dyn TextBackend>>, options: ConvertOptions) -> Converter {
    let extractor = Extractor::with_backends(backends, options.extract.clone());
    Converter::with_extractor(extractor, options)
}

#[test]
fn test_convert_writes_markdown() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.md");

    let converter = converter_with(
        vec![Box::new(PagesBackend(vec![
            "Introduction\nThis document explains the rules of the game.",
            "- first item\n- second item",
        ]))],
        ConvertOptions::new(),
    );
    let result = converter.convert_file("rules.pdf", &output).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, result.content);
    assert_eq!(written, result.document.to_markdown());
    assert!(written.starts_with("## Introduction\nThis document explains the rules of the game.\n"));
    assert!(written.contains("\n- first item\n- second item\n"));
    assert_eq!(result.page_count, 2);
    assert_eq!(result.backend, BackendKind::PdfExtract);
}

#[test]
fn test_convert_cjk_variant() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("rules.md");

    let options = ConvertOptions::new().with_format_options(FormatOptions::cjk_aware());
    let converter = converter_with(
        vec![Box::new(PagesBackend(vec![
            "サンマフリー 麻雀\n【注意】\n東 京\n■ 点数計算について説明します",
        ]))],
        options,
    );
    let result = converter.convert_file("rules.pdf", &output).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "# サンマフリー麻雀\n### 【注意】\n東京\n### ■ 点数計算について説明します\n\n"
    );
    assert_eq!(result.stats().heading_count, 3);
}

#[test]
fn test_exhaustion_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("never.md");

    let converter = converter_with(
        vec![
            Box::new(UnavailableBackend::new(BackendKind::Pdfium, "library not found")),
            Box::new(UnavailableBackend::new(BackendKind::Lopdf, "disabled")),
        ],
        ConvertOptions::new(),
    );
    let err = converter.convert_file("rules.pdf", &output).unwrap_err();

    assert!(matches!(err, Error::AllBackendsExhausted { .. }));
    assert!(!output.exists());
}

#[test]
fn test_blank_text_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("blank.md");

    let converter = converter_with(
        vec![Box::new(PagesBackend(vec!["", " \n "]))],
        ConvertOptions::new(),
    );
    let err = converter.convert_file("scan.pdf", &output).unwrap_err();

    assert!(matches!(err, Error::NoText { .. }));
    assert!(!output.exists());
}

#[test]
fn test_convert_file_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.md");
    let options = ConvertOptions::new()
        .with_extract_options(ExtractOptions::new().with_backends([BackendKind::Lopdf]));

    let err = convert_file(dir.path().join("missing.pdf"), &output, &options).unwrap_err();

    assert!(matches!(err, Error::AllBackendsExhausted { .. }));
    assert!(!output.exists());
}

#[test]
fn test_json_output_parses_back() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");

    let options =
        ConvertOptions::new().with_output_format(OutputFormat::Json(JsonFormat::Pretty));
    let converter = converter_with(vec![Box::new(PagesBackend(vec!["Title"]))], options);
    let result = converter.convert_file("doc.pdf", &output).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    let document: FormattedDocument = serde_json::from_str(&written).unwrap();
    assert_eq!(document, result.document);
    assert_eq!(result.mime_type, "application/json");
}

#[test]
fn test_write_output_overwrites() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.md");

    write_output(&output, "old content that is longer").unwrap();
    write_output(&output, "new").unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "new");
}

#[test]
fn test_write_output_missing_directory() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("no/such/dir/out.md");

    let err = write_output(&output, "content").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
