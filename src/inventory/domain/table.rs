use super::cell::CellValue;
use crate::shared::error::ReportError;
use crate::shared::Result;

/// In-memory tabular record set: a header row and data rows
///
/// Rows are padded to the header width on construction, so every row can be
/// indexed by any column position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column with exactly this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns the subset of `required` that is not present in the header row
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Fails with [`ReportError::MissingColumns`] naming every absent column
    pub fn require_columns(&self, table: &str, required: &[&str]) -> Result<()> {
        let missing = self.missing_columns(required);
        if missing.is_empty() {
            return Ok(());
        }
        Err(ReportError::MissingColumns {
            table: table.to_string(),
            columns: missing,
        }
        .into())
    }

    /// Cell at `row` in column `column`, `Empty` when the column is absent
    pub fn cell(&self, row: usize, column: Option<usize>) -> CellValue {
        column
            .and_then(|c| self.rows.get(row).and_then(|r| r.get(c)))
            .cloned()
            .unwrap_or_default()
    }
}
