use crate::reporting::Report;
use crate::shared::Result;
use std::path::Path;

/// ReportWriter port for persisting a finished report
pub trait ReportWriter {
    /// Serializes `report` to `path`
    ///
    /// The destination is either fully written or left untouched.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The report fails validation (missing navigation, dangling links)
    /// - The parent directory does not exist
    /// - The destination is a symbolic link
    /// - Writing fails
    fn write_report(&self, report: &Report, path: &Path) -> Result<()>;
}
