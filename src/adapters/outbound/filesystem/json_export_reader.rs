use crate::ports::outbound::ExportSource;
use crate::shared::error::ReportError;
use crate::shared::security::validate_input_file;
use crate::shared::Result;
use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const EXPORT_EXTENSION: &str = "json";

/// JsonExportReader adapter for reading JSON device exports from disk
///
/// Only regular files ending in `.json` are listed, sorted by file name.
/// Each file passes the same safety checks as the input tables.
pub struct JsonExportReader;

impl JsonExportReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonExportReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportSource for JsonExportReader {
    fn list_exports(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(ReportError::InputDirectoryNotFound {
                path: dir.to_path_buf(),
            }
            .into());
        }

        let entries = fs::read_dir(dir).map_err(|e| ReportError::FileReadError {
            path: dir.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut exports = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ReportError::FileReadError {
                path: dir.to_path_buf(),
                details: e.to_string(),
            })?;
            let path = entry.path();
            let is_export = path.extension().and_then(|e| e.to_str()) == Some(EXPORT_EXTENSION);
            if is_export && entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                exports.push(path);
            }
        }
        exports.sort();
        Ok(exports)
    }

    fn read_export(&self, path: &Path) -> Result<Value> {
        validate_input_file(path, "JSON export")?;

        let content = fs::read_to_string(path).map_err(|e| ReportError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        serde_json::from_str(content.trim_start_matches('\u{feff}'))
            .with_context(|| format!("Failed to parse JSON export: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_exports_sorted_json_files_only() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.json"), "[]").unwrap();
        fs::write(temp_dir.path().join("a.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("nested.json")).unwrap();

        let exports = JsonExportReader::new()
            .list_exports(temp_dir.path())
            .unwrap();
        let names: Vec<String> = exports
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_list_exports_missing_directory() {
        let err = JsonExportReader::new()
            .list_exports(Path::new("/nonexistent/response"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Input directory not found"));
    }

    #[test]
    fn test_read_export_parses_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("page-1.json");
        fs::write(&path, "\u{feff}[{\"tenantName\": \"Corp\", \"fqdn\": \"a\"}]").unwrap();

        let value = JsonExportReader::new().read_export(&path).unwrap();
        assert_eq!(value[0]["tenantName"], "Corp");
    }

    #[test]
    fn test_read_export_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "[{\"fqdn\": ").unwrap();

        let err = JsonExportReader::new().read_export(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON export"));
        assert!(format!("{:#}", err).contains("EOF"));
    }
}
