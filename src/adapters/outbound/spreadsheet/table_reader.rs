use crate::inventory::domain::{CellValue, Table};
use crate::ports::outbound::TableReader;
use crate::shared::error::ReportError;
use crate::shared::security::validate_input_file;
use crate::shared::Result;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Workbook extensions handled by calamine
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// SpreadsheetReader adapter for loading input tables
///
/// Workbooks are read through calamine (first worksheet only); `.csv`
/// files through the csv crate. Formats are chosen by file extension.
pub struct SpreadsheetReader;

impl SpreadsheetReader {
    pub fn new() -> Self {
        Self
    }

    fn read_workbook(&self, path: &Path) -> Result<Table> {
        let mut workbook = open_workbook_auto(path).map_err(|e| ReportError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let Some(first) = workbook.sheet_names().first().cloned() else {
            return Ok(Table::default());
        };

        let range = workbook
            .worksheet_range(&first)
            .map_err(|e| ReportError::FileReadError {
                path: path.to_path_buf(),
                details: format!("Failed to read worksheet '{}': {}", first, e),
            })?;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(Table::default());
        };

        let headers = header_row
            .iter()
            .map(|cell| cell_value(cell).as_text().unwrap_or_default())
            .collect();
        let data = rows
            .map(|row| row.iter().map(cell_value).collect())
            .collect();

        Ok(Table::new(headers, data))
    }

    fn read_csv(&self, path: &Path) -> Result<Table> {
        let read_error = |e: csv::Error| ReportError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(read_error)?;

        let headers = reader
            .headers()
            .map_err(read_error)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut data = Vec::new();
        for record in reader.records() {
            let record = record.map_err(read_error)?;
            data.push(record.iter().map(CellValue::text).collect());
        }

        Ok(Table::new(headers, data))
    }
}

impl Default for SpreadsheetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableReader for SpreadsheetReader {
    fn read_table(&self, path: &Path, description: &str) -> Result<Table> {
        validate_input_file(path, description)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if extension == "csv" {
            self.read_csv(path)
        } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            self.read_workbook(path)
        } else {
            Err(ReportError::UnsupportedFormat {
                path: path.to_path_buf(),
                supported: supported_extensions(),
            }
            .into())
        }
    }
}

fn supported_extensions() -> String {
    std::iter::once("csv")
        .chain(WORKBOOK_EXTENSIONS)
        .map(|e| format!(".{}", e))
        .collect::<Vec<_>>()
        .join(", ")
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("devices.csv");
        fs::write(
            &path,
            "fqdn,Network Cards,CPU,RAM,Disk Space\na.corp,eth0,i5,8,256\nb.corp,,i3\n",
        )
        .unwrap();

        let table = SpreadsheetReader::new().read_table(&path, "hardware table").unwrap();
        assert_eq!(table.headers().len(), 5);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, table.column_index("CPU")), CellValue::text("i5"));
        assert_eq!(table.cell(1, table.column_index("Network Cards")), CellValue::Empty);
        assert_eq!(table.cell(1, table.column_index("Disk Space")), CellValue::Empty);
    }

    #[test]
    fn test_read_csv_with_quoted_json_field() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inventory.csv");
        fs::write(
            &path,
            "tenantName,fqdn,software\nCorp,a,\"[{\"\"name\"\": \"\"7-Zip\"\"}]\"\n",
        )
        .unwrap();

        let table = SpreadsheetReader::new().read_table(&path, "inventory table").unwrap();
        assert_eq!(
            table.cell(0, table.column_index("software")),
            CellValue::text(r#"[{"name": "7-Zip"}]"#)
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inventory.txt");
        fs::write(&path, "fqdn\n").unwrap();

        let err = SpreadsheetReader::new()
            .read_table(&path, "inventory table")
            .unwrap_err()
            .to_string();
        assert!(err.contains("Unsupported table format"));
        assert!(err.contains(".xlsx"));
    }

    #[test]
    fn test_missing_file() {
        let err = SpreadsheetReader::new()
            .read_table(Path::new("/nonexistent/devices_report.xlsx"), "hardware table")
            .unwrap_err()
            .to_string();
        assert!(err.contains("Input file not found"));
    }

    #[test]
    fn test_corrupt_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.xlsx");
        fs::write(&path, "not a zip archive").unwrap();

        let err = SpreadsheetReader::new()
            .read_table(&path, "inventory table")
            .unwrap_err()
            .to_string();
        assert!(err.contains("Failed to read file"));
    }

    #[test]
    fn test_cell_value_conversion() {
        assert_eq!(cell_value(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(cell_value(&Data::String("  ".to_string())), CellValue::Empty);
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
    }
}
