use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tenant_report::prelude::*;

/// Mock TableReader serving in-memory tables by path
#[derive(Default)]
pub struct MockTableReader {
    tables: HashMap<PathBuf, Table>,
}

impl MockTableReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, path: &str, table: Table) -> Self {
        self.tables.insert(PathBuf::from(path), table);
        self
    }

    /// Builds a table from string cells; empty strings become empty cells
    pub fn table(headers: &[&str], rows: &[Vec<&str>]) -> Table {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| CellValue::text(*c)).collect())
                .collect(),
        )
    }
}

impl TableReader for MockTableReader {
    fn read_table(&self, path: &Path, description: &str) -> Result<Table> {
        self.tables
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Input file not found: {} ({})", path.display(), description))
    }
}
