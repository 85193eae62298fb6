use crate::inventory::domain::Table;
use crate::shared::Result;
use std::path::Path;

/// TableReader port for loading a tabular input file
///
/// Implementations read the first worksheet of a workbook (or a CSV file)
/// and return its header row plus data rows.
pub trait TableReader {
    /// Loads the table stored at `path`
    ///
    /// # Arguments
    /// * `path` - Path to the input file
    /// * `description` - Human readable name used in error messages, e.g. "inventory file"
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file format is not supported
    /// - The file cannot be parsed
    fn read_table(&self, path: &Path, description: &str) -> Result<Table>;
}
