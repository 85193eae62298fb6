use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report written successfully (individual tenants may still have failed)
    Success = 0,
    /// Fatal error: missing inputs, missing columns, write failure, etc.
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for report generation.
///
/// Every variant is fatal for the run except `DuplicateSheetName` and
/// `CellTextTooLong`, which the renderer raises per tenant and the use case
/// recovers from.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Input file not found: {path}\n\n💡 Hint: {suggestion}")]
    InputFileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Input directory not found: {path}\n\n💡 Hint: Pass the directory holding the JSON exports with --input-dir")]
    InputDirectoryNotFound { path: PathBuf },

    #[error("No export records found in: {path}\n\n💡 Hint: The directory needs at least one readable .json file with device records")]
    NoExportRecords { path: PathBuf },

    #[error("Unsupported table format: {path}\n\n💡 Hint: Supported extensions are {supported}")]
    UnsupportedFormat { path: PathBuf, supported: String },

    #[error("Missing required columns in {table}: {}\n\n💡 Hint: Check the header row of the {table}", .columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },

    #[error("Sheet name '{name}' is already used by another sheet")]
    DuplicateSheetName { name: String },

    #[error("Cell {cell} on sheet '{sheet}' holds {len} characters, more than the {max} a cell can store")]
    CellTextTooLong {
        sheet: String,
        cell: String,
        len: usize,
        max: usize,
    },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
    }

    #[test]
    fn test_input_file_not_found_display() {
        let error = ReportError::InputFileNotFound {
            path: PathBuf::from("/data/devices_report.xlsx"),
            suggestion: "Pass --devices".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Input file not found"));
        assert!(display.contains("/data/devices_report.xlsx"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("Pass --devices"));
    }

    #[test]
    fn test_missing_columns_lists_every_column() {
        let error = ReportError::MissingColumns {
            table: "hardware table".to_string(),
            columns: vec!["CPU".to_string(), "Disk Space".to_string()],
        };
        let display = format!("{}", error);
        assert!(display.contains("Missing required columns in hardware table: CPU, Disk Space"));
    }

    #[test]
    fn test_input_directory_not_found_display() {
        let error = ReportError::InputDirectoryNotFound {
            path: PathBuf::from("response"),
        };
        let display = format!("{}", error);
        assert!(display.contains("Input directory not found: response"));
        assert!(display.contains("--input-dir"));
    }

    #[test]
    fn test_unsupported_format_display() {
        let error = ReportError::UnsupportedFormat {
            path: PathBuf::from("inventory.txt"),
            supported: ".csv, .xlsx".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unsupported table format: inventory.txt"));
        assert!(display.contains(".csv, .xlsx"));
    }

    #[test]
    fn test_duplicate_sheet_name_display() {
        let error = ReportError::DuplicateSheetName {
            name: "Corp_MAIN".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Sheet name 'Corp_MAIN' is already used by another sheet"
        );
    }

    #[test]
    fn test_file_write_error_display() {
        let error = ReportError::FileWriteError {
            path: PathBuf::from("/test/report.xlsx"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/test/report.xlsx"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_security_error_display() {
        let error = ReportError::SecurityError {
            path: PathBuf::from("/test/symlink.xlsx"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("Symbolic links are not allowed"));
        assert!(display.contains("Use a regular file instead"));
    }
}
