//! wp_docx engine: export parsing, URL selection, block rendering and DOCX output.
mod decode;
mod docx;
mod document;
mod engine;
mod persist;
mod render;
mod selector;
mod types;
mod urls;

pub use decode::{decode_export, DecodeError, DecodedExport};
pub use docx::{DocumentEncoder, DocxEncoder, EncodeError};
pub use document::{Block, HeadingLevel, OutputDocument};
pub use engine::{ExportRequest, ExportSettings, Exporter};
pub use persist::{require_output_dir, AtomicFileWriter, PersistError};
pub use render::{
    content_blocks, render_document, render_item, ContentTag, DEFAULT_DOCUMENT_TITLE,
    META_DESCRIPTION_LABEL,
};
pub use selector::{
    parse_export, parse_export_bytes, ExportDocument, ExportItem, ParseError, CONTENT_NS, DC_NS,
    UNTITLED, WP_NS,
};
pub use types::{ExportError, ExportSummary, FailureKind, ValidationError};
pub use urls::{normalize_url, slug_from_link, UrlFilter};
