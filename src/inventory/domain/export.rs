//! Tenant tables assembled from raw JSON device exports

use super::cell::CellValue;
use super::columns::{FQDN, IP_ADDRESSES, MAC_ADDRESSES};

/// Tenant label for export records without a usable `tenantName`
pub const UNNAMED_TENANT: &str = "Unnamed";

/// Export fields whose list or bracketed text is flattened to plain text
pub const CLEANED_FIELDS: [&str; 3] = [FQDN, IP_ADDRESSES, MAC_ADDRESSES];

static EMPTY: CellValue = CellValue::Empty;

/// Export records of one tenant, as a table
///
/// Columns appear in the order their keys were first seen; a row lacking a
/// column reads as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantTable {
    tenant: String,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TenantTable {
    pub fn new(tenant: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends one record, adding columns for keys not seen before
    pub fn push_record(&mut self, fields: impl IntoIterator<Item = (String, CellValue)>) {
        let mut row = vec![CellValue::Empty; self.columns.len()];
        for (key, value) in fields {
            let col = match self.columns.iter().position(|c| *c == key) {
                Some(col) => col,
                None => {
                    self.columns.push(key);
                    row.push(CellValue::Empty);
                    self.columns.len() - 1
                }
            };
            row[col] = value;
        }
        self.rows.push(row);
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, value: &str) -> (String, CellValue) {
        (key.to_string(), CellValue::text(value))
    }

    #[test]
    fn test_columns_follow_first_occurrence() {
        let mut table = TenantTable::new("Corp");
        table.push_record([field("fqdn", "a"), field("os", "Linux")]);
        table.push_record([field("cpu", "Xeon"), field("fqdn", "b")]);

        assert_eq!(table.columns(), &["fqdn", "os", "cpu"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 2), &CellValue::Empty);
        assert_eq!(table.cell(1, 0), &CellValue::text("b"));
        assert_eq!(table.cell(1, 1), &CellValue::Empty);
        assert_eq!(table.cell(1, 2), &CellValue::text("Xeon"));
    }

    #[test]
    fn test_out_of_range_cell_is_empty() {
        let table = TenantTable::new("Corp");
        assert!(table.is_empty());
        assert_eq!(table.cell(5, 5), &CellValue::Empty);
    }
}
