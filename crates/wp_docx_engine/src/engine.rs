use std::fs;
use std::path::PathBuf;

use engine_logging::{engine_info, engine_warn};

use crate::docx::{DocumentEncoder, DocxEncoder};
use crate::document::OutputDocument;
use crate::persist::AtomicFileWriter;
use crate::render::{render_document, DEFAULT_DOCUMENT_TITLE};
use crate::selector::{parse_export_bytes, ExportDocument};
use crate::urls::UrlFilter;
use crate::{ExportError, ExportSummary, ValidationError};

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub document_title: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            document_title: DEFAULT_DOCUMENT_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub export_path: PathBuf,
    pub destination: PathBuf,
    pub filter: UrlFilter,
}

impl ExportRequest {
    pub fn new(
        export_path: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        filter: UrlFilter,
    ) -> Self {
        Self {
            export_path: export_path.into(),
            destination: destination.into(),
            filter,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.export_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingExportFile);
        }
        if self.filter.is_empty() {
            return Err(ValidationError::NoUrls);
        }
        Ok(())
    }
}

/// Runs one export: read, parse, select, render, encode, save. Single pass, no retries.
pub struct Exporter {
    settings: ExportSettings,
    encoder: Box<dyn DocumentEncoder>,
}

impl Exporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self::with_encoder(settings, DocxEncoder)
    }

    pub fn with_encoder(settings: ExportSettings, encoder: impl DocumentEncoder + 'static) -> Self {
        Self {
            settings,
            encoder: Box::new(encoder),
        }
    }

    pub fn build_document(&self, export: &ExportDocument, filter: &UrlFilter) -> OutputDocument {
        render_document(&self.settings.document_title, export.select(filter))
    }

    pub fn run(&self, request: &ExportRequest) -> Result<ExportSummary, ExportError> {
        request.validate()?;
        engine_info!(
            "Export started: source={:?} destination={:?} urls={}",
            request.export_path,
            request.destination,
            request.filter.len()
        );

        let bytes = fs::read(&request.export_path).map_err(|source| ExportError::Read {
            path: request.export_path.clone(),
            source,
        })?;
        let export = parse_export_bytes(&bytes)?;
        let doc = self.build_document(&export, &request.filter);
        let matched = doc.page_count();
        engine_info!(
            "Matched {} of {} export items ({} blocks)",
            matched,
            export.items().len(),
            doc.len()
        );
        if matched == 0 {
            engine_warn!("No export item matched the URL list; writing title-only document");
        }

        let encoded = self.encoder.encode(&doc)?;
        let writer = AtomicFileWriter::new(&request.destination);
        let output_path = writer.write(&encoded).map_err(|source| ExportError::Persist {
            path: request.destination.clone(),
            source,
        })?;
        engine_info!("Saved {} bytes to {:?}", encoded.len(), output_path);

        Ok(ExportSummary {
            items_seen: export.items().len(),
            matched,
            blocks: doc.len(),
            bytes_written: encoded.len() as u64,
            output_path,
        })
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ExportSettings::default())
    }
}
