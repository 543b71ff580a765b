use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {} is missing or not a directory", .0.display())]
    OutputDir(PathBuf),
    #[error("destination {0} is a directory")]
    DestinationIsDir(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// The directory a document is saved into must already exist.
pub fn require_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(PersistError::OutputDir(dir.to_path_buf())),
    }
}

/// Atomically write bytes to a destination file by writing a temp file next to it then renaming.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    target: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn write(&self, content: &[u8]) -> Result<PathBuf, PersistError> {
        if self.target.is_dir() {
            return Err(PersistError::DestinationIsDir(self.target.clone()));
        }
        let dir = match self.target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        require_output_dir(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // The rename replaces an existing file, so a failed save leaves the old one intact.
        tmp.persist(&self.target)
            .map_err(|e| PersistError::Io(e.error))?;
        Ok(self.target.clone())
    }
}
