use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wp_docx_engine::{
    Block, DocumentEncoder, EncodeError, ExportError, ExportRequest, ExportSettings, Exporter,
    FailureKind, HeadingLevel, OutputDocument, PersistError, UrlFilter, ValidationError,
};

const EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"
    xmlns:content="http://purl.org/rss/1.0/modules/content/"
    xmlns:dc="http://purl.org/dc/elements/1.1/"
    xmlns:wp="http://wordpress.org/export/1.2/">
  <channel>
    <item>
      <title>About Us</title>
      <link>https://example.com/about/</link>
      <content:encoded><![CDATA[<h2>Intro</h2><p>Text</p><ul><li>A</li><li>B</li></ul><blockquote>Quoted</blockquote>]]></content:encoded>
    </item>
    <item>
      <title>Contact</title>
      <link>https://example.com/contact/</link>
      <content:encoded><![CDATA[<p>Call us</p>]]></content:encoded>
    </item>
  </channel>
</rss>"#;

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn write_export(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("export.xml");
    fs::write(&path, content).unwrap();
    path
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut text = String::new();
    part.read_to_string(&mut text).unwrap();
    text
}

#[derive(Clone, Default)]
struct RecordingEncoder {
    seen: Arc<Mutex<Vec<Block>>>,
}

impl DocumentEncoder for RecordingEncoder {
    fn encode(&self, doc: &OutputDocument) -> Result<Vec<u8>, EncodeError> {
        self.seen.lock().unwrap().extend(doc.blocks().iter().cloned());
        Ok(b"recorded".to_vec())
    }
}

#[test]
fn run_writes_docx_with_selected_pages() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let export_path = write_export(temp.path(), EXPORT);
    let destination = temp.path().join("out.docx");

    let request = ExportRequest::new(
        &export_path,
        &destination,
        UrlFilter::from_lines("https://example.com/about\n"),
    );
    let summary = Exporter::default().run(&request).unwrap();

    assert_eq!(summary.items_seen, 2);
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.output_path, destination);
    assert_eq!(summary.bytes_written, fs::metadata(&destination).unwrap().len());

    let bytes = fs::read(&destination).unwrap();
    let document = read_part(&bytes, "word/document.xml");
    assert!(document.contains("WordPress Export – Selected Site Content"));
    assert!(document.contains("Page: About Us"));
    assert!(document.contains("Slug: /about"));
    assert!(document.contains(r#"<w:pStyle w:val="IntenseQuote"/>"#));
    assert!(document.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
    assert!(!document.contains("Contact"));

    let styles = read_part(&bytes, "word/styles.xml");
    assert!(styles.contains(r#"w:styleId="ListBullet""#));
    assert!(styles.contains(r#"w:styleId="IntenseQuote""#));
    let content_types = read_part(&bytes, "[Content_Types].xml");
    assert!(content_types.contains("/word/numbering.xml"));
}

#[test]
fn encoder_receives_blocks_in_export_order() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let export_path = write_export(temp.path(), EXPORT);
    let encoder = RecordingEncoder::default();
    let exporter = Exporter::with_encoder(ExportSettings::default(), encoder.clone());

    let request = ExportRequest::new(
        &export_path,
        temp.path().join("out.txt"),
        UrlFilter::new(["https://example.com/contact", "https://example.com/about/"]),
    );
    let summary = exporter.run(&request).unwrap();
    assert_eq!(summary.matched, 2);
    assert_eq!(fs::read(&summary.output_path).unwrap(), b"recorded");

    let seen = encoder.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            Block::heading(HeadingLevel::Title, "WordPress Export – Selected Site Content"),
            Block::PageBreak,
            Block::heading(HeadingLevel::H1, "Page: About Us"),
            Block::paragraph("Slug: /about"),
            Block::paragraph("Page Meta Title: About Us"),
            Block::paragraph("Page Meta Description:"),
            Block::paragraph(""),
            Block::heading(HeadingLevel::H2, "Intro"),
            Block::paragraph("Text"),
            Block::ListItem("A".to_string()),
            Block::ListItem("B".to_string()),
            Block::Quote("Quoted".to_string()),
            Block::PageBreak,
            Block::heading(HeadingLevel::H1, "Page: Contact"),
            Block::paragraph("Slug: /contact"),
            Block::paragraph("Page Meta Title: Contact"),
            Block::paragraph("Page Meta Description:"),
            Block::paragraph(""),
            Block::paragraph("Call us"),
        ]
    );
}

#[test]
fn custom_title_is_used() {
    let temp = TempDir::new().unwrap();
    let export_path = write_export(temp.path(), EXPORT);
    let encoder = RecordingEncoder::default();
    let settings = ExportSettings {
        document_title: "Site Audit".to_string(),
    };
    let exporter = Exporter::with_encoder(settings, encoder.clone());

    let request = ExportRequest::new(
        &export_path,
        temp.path().join("out.txt"),
        UrlFilter::new(["https://nowhere.example"]),
    );
    let summary = exporter.run(&request).unwrap();
    assert_eq!(summary.matched, 0);
    assert_eq!(
        encoder.seen.lock().unwrap().as_slice(),
        &[Block::heading(HeadingLevel::Title, "Site Audit")]
    );
}

#[test]
fn repeated_runs_produce_identical_files() {
    let temp = TempDir::new().unwrap();
    let export_path = write_export(temp.path(), EXPORT);
    let destination = temp.path().join("same.docx");
    let request = ExportRequest::new(
        &export_path,
        &destination,
        UrlFilter::from_lines("https://example.com/about\nhttps://example.com/contact"),
    );

    let exporter = Exporter::default();
    exporter.run(&request).unwrap();
    let first = fs::read(&destination).unwrap();
    exporter.run(&request).unwrap();
    let second = fs::read(&destination).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_url_list_is_rejected_before_reading_export() {
    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("never.docx");
    let request = ExportRequest::new(
        temp.path().join("does-not-exist.xml"),
        &destination,
        UrlFilter::from_lines("\n   \n"),
    );

    let err = Exporter::default().run(&request).unwrap_err();
    assert!(matches!(err, ExportError::Validation(ValidationError::NoUrls)));
    assert_eq!(err.kind(), FailureKind::Validation);
    assert_eq!(err.to_string(), "Please enter at least one URL.");
    assert!(!destination.exists());
}

#[test]
fn missing_export_path_is_rejected() {
    let request = ExportRequest::new("", "out.docx", UrlFilter::new(["https://example.com"]));
    let err = Exporter::default().run(&request).unwrap_err();
    assert!(matches!(
        err,
        ExportError::Validation(ValidationError::MissingExportFile)
    ));
}

#[test]
fn unreadable_export_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let request = ExportRequest::new(
        temp.path().join("missing.xml"),
        temp.path().join("out.docx"),
        UrlFilter::new(["https://example.com"]),
    );
    let err = Exporter::default().run(&request).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Io);
    assert!(err.to_string().contains("missing.xml"));
}

#[test]
fn malformed_export_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let export_path = write_export(temp.path(), "<rss><channel><item></rss>");
    let destination = temp.path().join("out.docx");
    let request = ExportRequest::new(
        &export_path,
        &destination,
        UrlFilter::new(["https://example.com"]),
    );

    let err = Exporter::default().run(&request).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Parse);
    assert!(!destination.exists());
}

#[test]
fn destination_in_missing_directory_is_an_io_error() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let export_path = write_export(temp.path(), EXPORT);
    let destination = temp.path().join("no").join("such").join("dir").join("out.docx");
    let request = ExportRequest::new(
        &export_path,
        &destination,
        UrlFilter::new(["https://example.com/about"]),
    );

    let err = Exporter::default().run(&request).unwrap_err();
    assert!(matches!(
        err,
        ExportError::Persist {
            source: PersistError::OutputDir(_),
            ..
        }
    ));
    assert_eq!(err.kind(), FailureKind::Io);
    assert!(!destination.exists());
    assert!(!temp.path().join("no").exists());
}

#[test]
fn unwritable_destination_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let export_path = write_export(temp.path(), EXPORT);
    let request = ExportRequest::new(
        &export_path,
        temp.path(),
        UrlFilter::new(["https://example.com/about"]),
    );

    let err = Exporter::default().run(&request).unwrap_err();
    assert!(matches!(err, ExportError::Persist { .. }));
    assert_eq!(err.kind(), FailureKind::Io);
}
