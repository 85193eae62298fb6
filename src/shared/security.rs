use crate::shared::error::ReportError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum input table size (100 MB).
/// The whole table is held in memory, so larger files are refused up front.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that an input table path can be loaded.
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "inventory table")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than [`MAX_FILE_SIZE`]
pub fn validate_input_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ReportError::InputFileNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "The {} does not exist. Check the path or set it in the config file.",
                    file_description
                ),
            }
            .into());
        }
        Err(e) => {
            return Err(ReportError::FileReadError {
                path: path.to_path_buf(),
                details: format!("Failed to read {} metadata: {}", file_description, e),
            }
            .into());
        }
    };

    if metadata.is_symlink() {
        return Err(ReportError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("The {} is a symbolic link", file_description),
            hint: "Pass the path of the file the link points to".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "{} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_input_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("inventory.csv");
        fs::write(&file_path, "fqdn\nhost-1\n").unwrap();

        assert!(validate_input_file(&file_path, "inventory table").is_ok());
    }

    #[test]
    fn test_validate_input_file_missing() {
        let path = PathBuf::from("/nonexistent/devices_report.xlsx");
        let result = validate_input_file(&path, "hardware table");
        assert!(result.is_err());

        let err = result.unwrap_err().to_string();
        assert!(err.contains("Input file not found"));
        assert!(err.contains("hardware table does not exist"));
    }

    #[test]
    fn test_validate_input_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_input_file(temp_dir.path(), "inventory table");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_input_file_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.csv");
        fs::write(&target, "fqdn\n").unwrap();
        let link = temp_dir.path().join("link.csv");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = validate_input_file(&link, "inventory table");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_file_size_within_limit() {
        let path = PathBuf::from("/test/file.xlsx");
        assert!(validate_file_size(1000, &path, MAX_FILE_SIZE).is_ok());
    }

    #[test]
    fn test_validate_file_size_exceeds_limit() {
        let path = PathBuf::from("/test/file.xlsx");
        let result = validate_file_size(MAX_FILE_SIZE + 1, &path, MAX_FILE_SIZE);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too large"));
    }
}
