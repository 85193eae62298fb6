use crate::shared::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// ExportSource port for raw JSON device exports
///
/// The collect step lists every export in a directory first, then reads
/// them one by one so a broken file can be skipped.
pub trait ExportSource {
    /// Lists the export files in `dir`, in processing order
    ///
    /// # Errors
    /// Returns an error if `dir` does not exist or cannot be listed
    fn list_exports(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Reads and parses one export file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON
    fn read_export(&self, path: &Path) -> Result<Value>;
}
