//! File adapter: Implementation of ReportExporter.
//!
//! Writes the report into a download directory under its fixed file name,
//! replacing any earlier download.

use std::fs;
use std::path::PathBuf;

use crate::domain::ReportDownload;
use crate::ports::ReportExporter;

/// Error type for report export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Download directory unavailable at {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Saves reports into a local directory.
#[derive(Debug, Clone)]
pub struct FileReportExporter {
    dir: PathBuf,
}

impl FileReportExporter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportExporter for FileReportExporter {
    type Error = ExportError;

    fn export(&self, download: &ReportDownload) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Directory {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(download.file_name);
        fs::write(&path, download.body.as_bytes()).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Report saved ({}, {} bytes)", download.mime, download.body.len());
        Ok(path)
    }
}
