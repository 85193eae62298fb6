use crate::inventory::domain::columns;
use crate::inventory::domain::{CellValue, MergedRow, Table};
use crate::shared::Result;
use std::collections::HashMap;

/// Optional inventory columns that were present in the source table
///
/// The main sheet only renders columns whose source existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionalColumns {
    pub ip_addresses: bool,
    pub mac_addresses: bool,
    pub os: bool,
}

impl OptionalColumns {
    pub fn all() -> Self {
        Self {
            ip_addresses: true,
            mac_addresses: true,
            os: true,
        }
    }

    pub fn detect(inventory: &Table) -> Self {
        Self {
            ip_addresses: inventory.has_column(columns::IP_ADDRESSES),
            mac_addresses: inventory.has_column(columns::MAC_ADDRESSES),
            os: inventory.has_column(columns::OS),
        }
    }
}

/// Result of joining the inventory table onto the hardware table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeOutcome {
    pub rows: Vec<MergedRow>,
    pub columns: OptionalColumns,
    /// Inventory rows with no hardware match
    pub unmatched: usize,
    /// Hardware keys that occur more than once, in first-occurrence order
    pub duplicate_hardware_keys: Vec<String>,
}

/// InventoryMerger - left outer join on the device FQDN
pub struct InventoryMerger;

impl InventoryMerger {
    /// Joins every inventory row with the hardware rows sharing its FQDN
    ///
    /// Inventory order is preserved. An inventory row matching K hardware
    /// rows produces K merged rows; a row without a match (or with an empty
    /// FQDN) produces one row with empty hardware cells.
    ///
    /// # Errors
    /// Returns an error if either table has no `fqdn` column
    pub fn merge(inventory: &Table, hardware: &Table) -> Result<MergeOutcome> {
        inventory.require_columns("inventory table", &[columns::FQDN])?;
        hardware.require_columns("hardware table", &[columns::FQDN])?;

        let (index, duplicate_hardware_keys) = Self::index_hardware(hardware);

        let inv = InventoryColumnIndex::new(inventory);
        let hw = HardwareColumnIndex::new(hardware);

        let mut outcome = MergeOutcome {
            columns: OptionalColumns::detect(inventory),
            duplicate_hardware_keys,
            ..Default::default()
        };

        for row in 0..inventory.len() {
            let base = inv.read(inventory, row);
            let matches = base
                .fqdn
                .as_text()
                .and_then(|key| index.get(&key))
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            if matches.is_empty() {
                outcome.unmatched += 1;
                outcome.rows.push(base);
                continue;
            }

            for &hw_row in matches {
                let mut merged = base.clone();
                hw.fill(hardware, hw_row, &mut merged);
                outcome.rows.push(merged);
            }
        }

        Ok(outcome)
    }

    /// Maps each non-empty hardware FQDN to its row positions
    fn index_hardware(hardware: &Table) -> (HashMap<String, Vec<usize>>, Vec<String>) {
        let fqdn = hardware.column_index(columns::FQDN);
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut duplicates = Vec::new();

        for row in 0..hardware.len() {
            let Some(key) = hardware.cell(row, fqdn).as_text() else {
                continue;
            };
            let positions = index.entry(key.clone()).or_default();
            positions.push(row);
            if positions.len() == 2 {
                duplicates.push(key);
            }
        }

        (index, duplicates)
    }
}

struct InventoryColumnIndex {
    tenant_name: Option<usize>,
    fqdn: Option<usize>,
    ip_addresses: Option<usize>,
    mac_addresses: Option<usize>,
    os: Option<usize>,
    software: Option<usize>,
    vulnerabilities: Option<usize>,
}

impl InventoryColumnIndex {
    fn new(table: &Table) -> Self {
        Self {
            tenant_name: table.column_index(columns::TENANT_NAME),
            fqdn: table.column_index(columns::FQDN),
            ip_addresses: table.column_index(columns::IP_ADDRESSES),
            mac_addresses: table.column_index(columns::MAC_ADDRESSES),
            os: table.column_index(columns::OS),
            software: table.column_index(columns::SOFTWARE),
            vulnerabilities: table.column_index(columns::VULNERABILITIES),
        }
    }

    fn read(&self, table: &Table, row: usize) -> MergedRow {
        MergedRow {
            tenant_name: table.cell(row, self.tenant_name),
            fqdn: table.cell(row, self.fqdn),
            ip_addresses: table.cell(row, self.ip_addresses),
            mac_addresses: table.cell(row, self.mac_addresses),
            os: table.cell(row, self.os),
            software: table.cell(row, self.software),
            vulnerabilities: table.cell(row, self.vulnerabilities),
            network_cards: CellValue::Empty,
            cpu: CellValue::Empty,
            ram: CellValue::Empty,
            disk_space: CellValue::Empty,
        }
    }
}

struct HardwareColumnIndex {
    network_cards: Option<usize>,
    cpu: Option<usize>,
    ram: Option<usize>,
    disk_space: Option<usize>,
}

impl HardwareColumnIndex {
    fn new(table: &Table) -> Self {
        Self {
            network_cards: table.column_index(columns::NETWORK_CARDS),
            cpu: table.column_index(columns::CPU),
            ram: table.column_index(columns::RAM),
            disk_space: table.column_index(columns::DISK_SPACE),
        }
    }

    fn fill(&self, table: &Table, row: usize, merged: &mut MergedRow) {
        merged.network_cards = table.cell(row, self.network_cards);
        merged.cpu = table.cell(row, self.cpu);
        merged.ram = table.cell(row, self.ram);
        merged.disk_space = table.cell(row, self.disk_space);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| CellValue::text(*c)).collect())
                .collect(),
        )
    }

    fn hardware(rows: &[&[&str]]) -> Table {
        table(&["fqdn", "Network Cards", "CPU", "RAM", "Disk Space"], rows)
    }

    #[test]
    fn test_one_match_per_device_preserves_cardinality() {
        let inventory = table(
            &["tenantName", "fqdn"],
            &[&["Corp", "a"], &["Corp", "b"], &["Other", "c"]],
        );
        let hw = hardware(&[
            &["c", "eth0", "i7", "16", "512"],
            &["a", "eth0", "i5", "8", "256"],
            &["b", "eth1", "i3", "4", "128"],
        ]);

        let outcome = InventoryMerger::merge(&inventory, &hw).unwrap();
        assert_eq!(outcome.rows.len(), 3);
        assert_eq!(outcome.unmatched, 0);
        assert_eq!(outcome.rows[0].fqdn, CellValue::text("a"));
        assert_eq!(outcome.rows[0].cpu, CellValue::text("i5"));
        assert_eq!(outcome.rows[2].ram, CellValue::text("16"));
    }

    #[test]
    fn test_unmatched_rows_have_empty_hardware() {
        let inventory = table(&["tenantName", "fqdn"], &[&["Corp", "lonely"]]);
        let hw = hardware(&[&["other", "eth0", "i7", "16", "512"]]);

        let outcome = InventoryMerger::merge(&inventory, &hw).unwrap();
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.unmatched, 1);
        assert_eq!(outcome.rows[0].cpu, CellValue::Empty);
        assert_eq!(outcome.rows[0].tenant_name, CellValue::text("Corp"));
    }

    #[test]
    fn test_duplicate_hardware_keys_produce_cross_product() {
        let inventory = table(&["tenantName", "fqdn"], &[&["Corp", "a"], &["Corp", "b"]]);
        let hw = hardware(&[
            &["a", "eth0", "i5", "8", "256"],
            &["a", "eth1", "i5", "8", "256"],
            &["b", "eth0", "i3", "4", "128"],
        ]);

        let outcome = InventoryMerger::merge(&inventory, &hw).unwrap();
        assert_eq!(outcome.rows.len(), 3);
        assert_eq!(outcome.duplicate_hardware_keys, vec!["a".to_string()]);
        assert_eq!(outcome.rows[0].network_cards, CellValue::text("eth0"));
        assert_eq!(outcome.rows[1].network_cards, CellValue::text("eth1"));
        assert_eq!(outcome.rows[2].fqdn, CellValue::text("b"));
    }

    #[test]
    fn test_empty_fqdn_never_matches() {
        let inventory = table(&["tenantName", "fqdn"], &[&["Corp", ""]]);
        let hw = hardware(&[&["", "eth0", "i5", "8", "256"]]);

        let outcome = InventoryMerger::merge(&inventory, &hw).unwrap();
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.unmatched, 1);
        assert_eq!(outcome.rows[0].network_cards, CellValue::Empty);
    }

    #[test]
    fn test_numeric_and_text_keys_match() {
        let inventory = Table::new(
            vec!["tenantName".to_string(), "fqdn".to_string()],
            vec![vec![CellValue::text("Corp"), CellValue::Number(1001.0)]],
        );
        let hw = hardware(&[&["1001", "eth0", "i5", "8", "256"]]);

        let outcome = InventoryMerger::merge(&inventory, &hw).unwrap();
        assert_eq!(outcome.unmatched, 0);
        assert_eq!(outcome.rows[0].cpu, CellValue::text("i5"));
    }

    #[test]
    fn test_optional_columns_are_detected() {
        let inventory = table(&["tenantName", "fqdn", "os", "macAddresses"], &[]);
        let outcome = InventoryMerger::merge(&inventory, &hardware(&[])).unwrap();
        assert_eq!(
            outcome.columns,
            OptionalColumns {
                ip_addresses: false,
                mac_addresses: true,
                os: true,
            }
        );
    }

    #[test]
    fn test_missing_fqdn_column_is_an_error() {
        let inventory = table(&["tenantName"], &[&["Corp"]]);
        let err = InventoryMerger::merge(&inventory, &hardware(&[]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("inventory table"));
        assert!(err.contains("fqdn"));
    }
}
