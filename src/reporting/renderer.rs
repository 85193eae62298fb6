use super::document::{
    CellStyle, ColIndex, MergeRange, Report, RowIndex, Sheet, SheetLink, MAX_CELL_TEXT_LEN,
};
use super::sheet_names::{export_sheet_name, tenant_sheet_name, SheetKind};
use crate::inventory::domain::{
    columns, CellValue, DeviceRecord, InstalledSoftware, TenantGroup, TenantName, TenantTable,
    VulnerabilityFinding,
};
use crate::inventory::services::OptionalColumns;
use crate::shared::Result;
use std::collections::HashMap;

/// Font color for hyperlink cells
const LINK_COLOR: u32 = 0x0563C1;
/// Fill of the navigation header row
const HEADER_FILL: u32 = 0xDDDDDD;
/// Fill of alternate navigation rows
const STRIPE_FILL: u32 = 0xEFEFEF;

const BACK_LINK_TEXT: &str = "← Back to navigation";
const BACK_LINK_ROW_HEIGHT: f64 = 20.0;
const NAVIGATION_TITLE: &str = "REPORT NAVIGATION";
const NAVIGATION_LINK_TEXT: &str = "Open";

/// Row holding column headers on data sheets (row 1 is the back-link)
const HEADER_ROW: RowIndex = 1;
/// First data row on data sheets and the navigation sheet
pub const FIRST_DATA_ROW: RowIndex = 2;

/// Worksheet row limit of the xlsx format
const MAX_ROWS: usize = 1_048_576;
/// Worksheet column limit of the xlsx format
const MAX_COLUMNS: usize = 16_384;

/// Sheets created for one tenant
#[derive(Debug, Clone, PartialEq)]
pub struct TenantSheets {
    pub tenant: TenantName,
    pub main: Option<String>,
    pub software: Option<String>,
    pub vulnerabilities: Option<String>,
}

impl TenantSheets {
    /// Entry for a tenant that has no sheets (e.g. its rendering failed)
    pub fn empty(tenant: TenantName) -> Self {
        Self {
            tenant,
            main: None,
            software: None,
            vulnerabilities: None,
        }
    }

    pub fn sheet(&self, kind: SheetKind) -> Option<&str> {
        match kind {
            SheetKind::Main => self.main.as_deref(),
            SheetKind::Software => self.software.as_deref(),
            SheetKind::Vulnerabilities => self.vulnerabilities.as_deref(),
        }
    }

    fn set(&mut self, kind: SheetKind, name: String) {
        match kind {
            SheetKind::Main => self.main = Some(name),
            SheetKind::Software => self.software = Some(name),
            SheetKind::Vulnerabilities => self.vulnerabilities = Some(name),
        }
    }
}

/// Rows of the software/vulnerability sheets that share one FQDN
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    pub key: String,
    pub rows: Vec<Vec<Option<String>>>,
}

/// ReportRenderer - turns tenant groups into report sheets
pub struct ReportRenderer {
    navigation_sheet: String,
    columns: OptionalColumns,
}

impl ReportRenderer {
    /// # Arguments
    /// * `navigation_sheet` - Name of the navigation sheet targeted by back-links
    /// * `columns` - Optional inventory columns to show on main sheets
    pub fn new(navigation_sheet: impl Into<String>, columns: OptionalColumns) -> Self {
        Self {
            navigation_sheet: navigation_sheet.into(),
            columns,
        }
    }

    /// Renders one tenant's sheets and adds them to `report`
    ///
    /// Either every sheet of the tenant is added or none is.
    ///
    /// # Errors
    /// Returns an error if a sheet name is already taken, a sheet would
    /// exceed the worksheet row limit or a value is too long for one cell
    pub fn render_tenant(&self, report: &mut Report, group: &TenantGroup) -> Result<TenantSheets> {
        let mut entry = TenantSheets::empty(group.name().clone());
        let mut sheets = Vec::new();

        if !group.devices().is_empty() {
            let name = tenant_sheet_name(group.name(), SheetKind::Main);
            sheets.push(self.main_sheet(&name, group.devices())?);
            entry.set(SheetKind::Main, name);
        }

        if group.software_count() > 0 {
            let name = tenant_sheet_name(group.name(), SheetKind::Software);
            let groups = group_rows(group.devices(), |d| {
                d.software.iter().map(software_row).collect()
            });
            sheets.push(self.grouped_sheet(&name, &InstalledSoftware::FIELDS, &groups)?);
            entry.set(SheetKind::Software, name);
        }

        if group.vulnerability_count() > 0 {
            let name = tenant_sheet_name(group.name(), SheetKind::Vulnerabilities);
            let groups = group_rows(group.devices(), |d| {
                d.vulnerabilities.iter().map(finding_row).collect()
            });
            sheets.push(self.grouped_sheet(&name, &VulnerabilityFinding::FIELDS, &groups)?);
            entry.set(SheetKind::Vulnerabilities, name);
        }

        report.add_sheets(sheets)?;
        Ok(entry)
    }

    /// Builds the navigation sheet and attaches it to `report`
    pub fn render_navigation(&self, report: &mut Report, entries: &[TenantSheets]) -> Result<()> {
        let sheet = self.navigation_sheet(entries);
        report.set_navigation(sheet)
    }

    /// One row per device
    pub fn main_sheet(&self, name: &str, devices: &[DeviceRecord]) -> Result<Sheet> {
        ensure_row_capacity(name, devices.len())?;
        let mut sheet = self.sheet_with_back_link(name);

        let mut headers = vec![columns::FQDN];
        if self.columns.ip_addresses {
            headers.push(columns::IP_ADDRESSES);
        }
        headers.extend([columns::CPU, columns::RAM, columns::DISK_SPACE, columns::NETWORK_CARDS]);
        if self.columns.mac_addresses {
            headers.push(columns::MAC_ADDRESSES);
        }
        if self.columns.os {
            headers.extend([columns::OS, "os_version"]);
        }
        write_headers(&mut sheet, &headers, CellStyle::bold());

        for (i, device) in devices.iter().enumerate() {
            let mut values = vec![text_cell(device.fqdn.as_deref())];
            if self.columns.ip_addresses {
                values.push(CellValue::text(device.ip_addresses.join(", ")));
            }
            values.extend([
                device.cpu.clone(),
                device.ram.clone(),
                device.disk_space.clone(),
                device.network_cards.clone(),
            ]);
            if self.columns.mac_addresses {
                values.push(CellValue::text(device.mac_addresses.join(", ")));
            }
            if self.columns.os {
                values.push(text_cell(device.os.name.as_deref()));
                values.push(text_cell(device.os.version.as_deref()));
            }

            let row = FIRST_DATA_ROW + i as RowIndex;
            for (col, value) in values.into_iter().enumerate() {
                if !value.is_empty() {
                    sheet.set(row, col as ColIndex, value);
                }
            }
        }

        Ok(sheet)
    }

    /// Grouped sheet: the FQDN is written once per group and merged
    /// vertically across the group's rows when there is more than one
    pub fn grouped_sheet(
        &self,
        name: &str,
        data_headers: &[&str],
        groups: &[RowGroup],
    ) -> Result<Sheet> {
        let total: usize = groups.iter().map(|g| g.rows.len()).sum();
        ensure_row_capacity(name, total)?;

        let mut sheet = self.sheet_with_back_link(name);
        let id_style = CellStyle::default().centered();

        sheet.set_styled(
            HEADER_ROW,
            0,
            CellValue::text(columns::FQDN),
            CellStyle::bold().centered(),
        );
        for (i, header) in data_headers.iter().enumerate() {
            sheet.set_styled(HEADER_ROW, 1 + i as ColIndex, CellValue::text(*header), CellStyle::bold());
        }

        let mut row = FIRST_DATA_ROW;
        for group in groups {
            if group.rows.is_empty() {
                continue;
            }
            sheet.set_styled(row, 0, CellValue::text(group.key.as_str()), id_style);

            for (offset, values) in group.rows.iter().enumerate() {
                let r = row + offset as RowIndex;
                for (i, value) in values.iter().enumerate() {
                    if let Some(text) = value {
                        sheet.set(r, 1 + i as ColIndex, CellValue::text(text.as_str()));
                    }
                }
            }

            let last = row + group.rows.len() as RowIndex - 1;
            sheet.merge(MergeRange {
                first_row: row,
                last_row: last,
                col: 0,
            });
            row = last + 1;
        }

        Ok(sheet)
    }

    /// Index of every tenant with links to the sheets that exist for it
    pub fn navigation_sheet(&self, entries: &[TenantSheets]) -> Sheet {
        let mut sheet = Sheet::new(self.navigation_sheet.as_str());
        let link_style = CellStyle {
            font_color: Some(LINK_COLOR),
            underline: true,
            ..Default::default()
        };

        sheet.set_styled(
            0,
            0,
            CellValue::text(NAVIGATION_TITLE),
            CellStyle::bold().with_font_size(14.0),
        );

        let mut headers = vec!["Tenant Name"];
        headers.extend(SheetKind::ALL.iter().map(SheetKind::label));
        write_headers(&mut sheet, &headers, CellStyle::bold().with_fill(HEADER_FILL));

        for (i, entry) in entries.iter().enumerate() {
            let row = FIRST_DATA_ROW + i as RowIndex;
            // a failed tenant is still listed, so its name must fit the cell
            let tenant: String = entry.tenant.as_str().chars().take(MAX_CELL_TEXT_LEN).collect();
            sheet.set(row, 0, CellValue::text(tenant));
            for (j, kind) in SheetKind::ALL.iter().enumerate() {
                if let Some(target) = entry.sheet(*kind) {
                    sheet.set_link(
                        row,
                        1 + j as ColIndex,
                        NAVIGATION_LINK_TEXT,
                        link_style,
                        SheetLink::to_sheet(target),
                    );
                }
            }
        }

        sheet.autofit_columns();

        // odd spreadsheet rows (1-based) are shaded
        for i in 0..entries.len() {
            let row = FIRST_DATA_ROW + i as RowIndex;
            if (row + 1) % 2 == 1 {
                sheet.fill(row, 0..headers.len() as ColIndex, STRIPE_FILL);
            }
        }

        sheet
    }

    fn sheet_with_back_link(&self, name: &str) -> Sheet {
        let mut sheet = Sheet::new(name);
        sheet.set_link(
            0,
            0,
            BACK_LINK_TEXT,
            CellStyle {
                bold: true,
                font_color: Some(LINK_COLOR),
                underline: true,
                ..Default::default()
            },
            SheetLink::to_sheet(self.navigation_sheet.as_str()),
        );
        sheet.set_row_height(0, BACK_LINK_ROW_HEIGHT);
        sheet
    }
}

/// Flattens device items into FQDN groups, in first-occurrence order
///
/// Devices sharing an FQDN land in the same group; devices without items
/// contribute nothing.
pub fn group_rows(
    devices: &[DeviceRecord],
    rows_of: impl Fn(&DeviceRecord) -> Vec<Vec<Option<String>>>,
) -> Vec<RowGroup> {
    let mut groups: Vec<RowGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for device in devices {
        let rows = rows_of(device);
        if rows.is_empty() {
            continue;
        }
        let key = device.fqdn_or_blank().to_string();
        match positions.get(&key) {
            Some(&i) => groups[i].rows.extend(rows),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(RowGroup { key, rows });
            }
        }
    }

    groups
}

fn software_row(item: &InstalledSoftware) -> Vec<Option<String>> {
    item.values().into_iter().map(|v| v.map(str::to_string)).collect()
}

fn finding_row(finding: &VulnerabilityFinding) -> Vec<Option<String>> {
    finding.values().into_iter().map(|v| v.map(str::to_string)).collect()
}

fn text_cell(value: Option<&str>) -> CellValue {
    value.map(CellValue::text).unwrap_or_default()
}

fn write_headers(sheet: &mut Sheet, headers: &[&str], style: CellStyle) {
    for (i, header) in headers.iter().enumerate() {
        sheet.set_styled(HEADER_ROW, i as ColIndex, CellValue::text(*header), style);
    }
}

/// Collected tenant table: header row, one row per record, fitted columns
///
/// # Errors
/// Returns an error if the tenant name leaves no usable sheet name or the
/// table exceeds the worksheet limits
pub fn export_sheet(table: &TenantTable) -> Result<Sheet> {
    let Some(name) = export_sheet_name(table.tenant()) else {
        anyhow::bail!(
            "Tenant '{}' has no usable sheet name after removing characters not allowed in sheet names",
            table.tenant()
        );
    };
    // header row plus records
    ensure_capacity(&name, table.len() + 1, table.columns().len())?;

    let mut sheet = Sheet::new(name);
    for (col, header) in table.columns().iter().enumerate() {
        sheet.set_styled(0, col as ColIndex, CellValue::text(header.as_str()), CellStyle::bold());
    }
    for row in 0..table.len() {
        for col in 0..table.columns().len() {
            let value = table.cell(row, col);
            if !value.is_empty() {
                sheet.set(row as RowIndex + 1, col as ColIndex, value.clone());
            }
        }
    }
    sheet.autofit_columns();
    Ok(sheet)
}

fn ensure_row_capacity(sheet: &str, data_rows: usize) -> Result<()> {
    ensure_capacity(sheet, data_rows + FIRST_DATA_ROW as usize, 0)
}

fn ensure_capacity(sheet: &str, needed: usize, columns: usize) -> Result<()> {
    if columns > MAX_COLUMNS {
        anyhow::bail!(
            "Sheet '{}' needs {} columns but a worksheet holds at most {}",
            sheet,
            columns,
            MAX_COLUMNS
        );
    }
    if needed > MAX_ROWS {
        anyhow::bail!(
            "Sheet '{}' needs {} rows but a worksheet holds at most {}",
            sheet,
            needed,
            MAX_ROWS
        );
    }
    Ok(())
}
