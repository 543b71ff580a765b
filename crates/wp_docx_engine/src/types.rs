use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

use crate::docx::EncodeError;
use crate::persist::PersistError;
use crate::selector::ParseError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub items_seen: usize,
    pub matched: usize,
    pub blocks: usize,
    pub bytes_written: u64,
    pub output_path: PathBuf,
}

/// Inputs rejected before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please attach your WordPress XML export file.")]
    MissingExportFile,
    #[error("Please enter at least one URL.")]
    NoUrls,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("could not read export file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("could not encode document: {0}")]
    Encode(#[from] EncodeError),
    #[error("could not save {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
}

impl ExportError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ExportError::Validation(_) => FailureKind::Validation,
            ExportError::Parse(_) => FailureKind::Parse,
            ExportError::Read { .. } | ExportError::Persist { .. } => FailureKind::Io,
            ExportError::Encode(_) => FailureKind::Runtime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Parse,
    Io,
    Runtime,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Validation => write!(f, "validation error"),
            FailureKind::Parse => write!(f, "parse error"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Runtime => write!(f, "runtime error"),
        }
    }
}
