//! Report export port: hands a rendered report to the user.

use std::path::PathBuf;

use crate::domain::ReportDownload;

/// Trait for delivering a report download.
///
/// Nothing is retained server-side; an exporter only places the report
/// where the user can pick it up.
pub trait ReportExporter: Send + Sync {
    /// Error type for export operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Deliver the report.
    ///
    /// # Returns
    /// Where the report ended up.
    ///
    /// # Errors
    /// Returns error if the report cannot be written.
    fn export(&self, download: &ReportDownload) -> Result<PathBuf, Self::Error>;
}
