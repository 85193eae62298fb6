//! In-memory workbook model
//!
//! The renderer accumulates sheets into a [`Report`]; a `ReportWriter`
//! adapter serializes the finished report. Rows and columns are zero-based.

use crate::inventory::domain::CellValue;
use crate::shared::error::ReportError;
use crate::shared::Result;
use std::collections::BTreeMap;

pub type RowIndex = u32;
pub type ColIndex = u16;

/// Longest text a single cell can hold
pub const MAX_CELL_TEXT_LEN: usize = 32_767;

/// Presentation attributes of a cell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub font_size: Option<f64>,
    /// RGB font color, e.g. `0x0563C1`
    pub font_color: Option<u32>,
    pub underline: bool,
    /// RGB solid background fill
    pub fill: Option<u32>,
    /// Centered horizontally and vertically
    pub centered: bool,
}

impl CellStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    pub fn with_fill(mut self, rgb: u32) -> Self {
        self.fill = Some(rgb);
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Internal hyperlink target: a cell on another sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLink {
    pub sheet: String,
    pub cell: String,
}

impl SheetLink {
    /// Link to the top-left cell of `sheet`
    pub fn to_sheet(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            cell: "A1".to_string(),
        }
    }

    /// Spreadsheet location string, e.g. `'Corp_MAIN'!A1`
    pub fn location(&self) -> String {
        format!("'{}'!{}", self.sheet.replace('\'', "''"), self.cell)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
    pub link: Option<SheetLink>,
}

/// Vertical merge of one column across `first_row..=last_row`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: RowIndex,
    pub last_row: RowIndex,
    pub col: ColIndex,
}

impl MergeRange {
    pub fn contains(&self, row: RowIndex, col: ColIndex) -> bool {
        col == self.col && row >= self.first_row && row <= self.last_row
    }
}

/// One named worksheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(RowIndex, ColIndex), Cell>,
    merges: Vec<MergeRange>,
    column_widths: BTreeMap<ColIndex, f64>,
    row_heights: BTreeMap<RowIndex, f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set(&mut self, row: RowIndex, col: ColIndex, value: CellValue) {
        self.set_styled(row, col, value, CellStyle::default());
    }

    pub fn set_styled(&mut self, row: RowIndex, col: ColIndex, value: CellValue, style: CellStyle) {
        self.cells.insert(
            (row, col),
            Cell {
                value,
                style,
                link: None,
            },
        );
    }

    pub fn set_link(
        &mut self,
        row: RowIndex,
        col: ColIndex,
        text: &str,
        style: CellStyle,
        link: SheetLink,
    ) {
        self.cells.insert(
            (row, col),
            Cell {
                value: CellValue::text(text),
                style,
                link: Some(link),
            },
        );
    }

    /// Applies a background fill, creating blank cells where needed
    pub fn fill(&mut self, row: RowIndex, cols: std::ops::Range<ColIndex>, rgb: u32) {
        for col in cols {
            self.cells.entry((row, col)).or_default().style.fill = Some(rgb);
        }
    }

    /// Records a vertical merge; single-row ranges are ignored
    pub fn merge(&mut self, range: MergeRange) {
        if range.last_row > range.first_row {
            self.merges.push(range);
        }
    }

    pub fn cell(&self, row: RowIndex, col: ColIndex) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Text rendering of a cell, `None` when blank
    pub fn text(&self, row: RowIndex, col: ColIndex) -> Option<String> {
        self.cell(row, col).and_then(|c| c.value.as_text())
    }

    pub fn cells(&self) -> impl Iterator<Item = (RowIndex, ColIndex, &Cell)> {
        self.cells.iter().map(|(&(r, c), cell)| (r, c, cell))
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    /// Merge range covering the given cell, if any
    pub fn merge_at(&self, row: RowIndex, col: ColIndex) -> Option<&MergeRange> {
        self.merges.iter().find(|m| m.contains(row, col))
    }

    pub fn column_widths(&self) -> &BTreeMap<ColIndex, f64> {
        &self.column_widths
    }

    pub fn set_row_height(&mut self, row: RowIndex, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn row_heights(&self) -> &BTreeMap<RowIndex, f64> {
        &self.row_heights
    }

    /// Highest row index holding a cell
    pub fn last_row(&self) -> Option<RowIndex> {
        self.cells.keys().map(|&(r, _)| r).max()
    }

    /// Number of rows from `first_row` through the last populated row
    pub fn rows_from(&self, first_row: RowIndex) -> usize {
        match self.last_row() {
            Some(last) if last >= first_row => (last - first_row + 1) as usize,
            _ => 0,
        }
    }

    /// Sizes every populated column to `(longest text + 2) * 1.2`
    pub fn autofit_columns(&mut self) {
        let mut longest: BTreeMap<ColIndex, usize> = BTreeMap::new();
        for (&(_, col), cell) in &self.cells {
            if let Some(text) = cell.value.as_text() {
                let len = text.chars().count();
                let entry = longest.entry(col).or_insert(0);
                *entry = (*entry).max(len);
            }
        }
        for (col, len) in longest {
            self.column_widths.insert(col, (len as f64 + 2.0) * 1.2);
        }
    }

    /// First cell whose text exceeds [`MAX_CELL_TEXT_LEN`] characters, with
    /// its length
    pub fn oversized_cell(&self) -> Option<(RowIndex, ColIndex, usize)> {
        self.cells().find_map(|(row, col, cell)| match &cell.value {
            CellValue::Text(text) => {
                let len = text.chars().count();
                (len > MAX_CELL_TEXT_LEN).then_some((row, col, len))
            }
            _ => None,
        })
    }

    /// Every internal link target referenced from this sheet
    pub fn links(&self) -> impl Iterator<Item = &SheetLink> {
        self.cells.values().filter_map(|c| c.link.as_ref())
    }
}

/// An ordered set of uniquely named sheets, optionally led by a navigation
/// sheet
///
/// The navigation sheet name is reserved when the report is created; the
/// navigation sheet itself is attached last but always serialized first.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    navigation_name: Option<String>,
    navigation: Option<Sheet>,
    sheets: Vec<Sheet>,
}

impl Report {
    pub fn new(navigation_name: impl Into<String>) -> Self {
        Self {
            navigation_name: Some(navigation_name.into()),
            navigation: None,
            sheets: Vec::new(),
        }
    }

    /// Report made of data sheets only
    pub fn without_navigation() -> Self {
        Self {
            navigation_name: None,
            navigation: None,
            sheets: Vec::new(),
        }
    }

    /// Sheet names compare case-insensitively, as in spreadsheet applications
    pub fn contains(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.navigation_name
            .as_deref()
            .is_some_and(|nav| nav.to_lowercase() == wanted)
            || self.sheets.iter().any(|s| s.name().to_lowercase() == wanted)
    }

    /// Adds a batch of sheets, all or nothing
    ///
    /// # Errors
    /// Returns [`ReportError::DuplicateSheetName`] if any name is taken
    /// (including by another sheet in the same batch) and
    /// [`ReportError::CellTextTooLong`] if a cell cannot be stored; nothing
    /// is added then.
    pub fn add_sheets(&mut self, sheets: Vec<Sheet>) -> Result<()> {
        let mut batch: Vec<String> = Vec::with_capacity(sheets.len());
        for sheet in &sheets {
            let lower = sheet.name().to_lowercase();
            if self.contains(sheet.name()) || batch.contains(&lower) {
                return Err(ReportError::DuplicateSheetName {
                    name: sheet.name().to_string(),
                }
                .into());
            }
            check_cell_text(sheet)?;
            batch.push(lower);
        }
        self.sheets.extend(sheets);
        Ok(())
    }

    /// Attaches the navigation sheet
    ///
    /// # Errors
    /// Returns an error if the report has no navigation slot or the sheet's
    /// name differs from the reserved name
    pub fn set_navigation(&mut self, sheet: Sheet) -> Result<()> {
        match self.navigation_name.as_deref() {
            Some(name) if name == sheet.name() => {
                self.navigation = Some(sheet);
                Ok(())
            }
            Some(name) => anyhow::bail!(
                "Navigation sheet must be named '{}', got '{}'",
                name,
                sheet.name()
            ),
            None => anyhow::bail!("Report was created without a navigation sheet"),
        }
    }

    pub fn navigation(&self) -> Option<&Sheet> {
        self.navigation.as_ref()
    }

    /// Data sheets in creation order
    pub fn data_sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// All sheets in output order: navigation first
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.navigation.iter().chain(self.sheets.iter())
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets().find(|s| s.name() == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets().map(Sheet::name).collect()
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets().count()
    }

    /// Checks that the report can be serialized
    ///
    /// # Errors
    /// Returns an error if the report is empty, its navigation sheet is
    /// missing, a cell holds too much text or any link points at a sheet that
    /// does not exist
    pub fn validate(&self) -> Result<()> {
        match (&self.navigation_name, &self.navigation) {
            (Some(name), None) => anyhow::bail!("Report has no navigation sheet '{}'", name),
            (None, _) if self.sheets.is_empty() => anyhow::bail!("Report has no sheets"),
            _ => {}
        }
        for sheet in self.sheets() {
            check_cell_text(sheet)?;
            for link in sheet.links() {
                if self.sheet(&link.sheet).is_none() {
                    anyhow::bail!(
                        "Sheet '{}' links to missing sheet '{}'",
                        sheet.name(),
                        link.sheet
                    );
                }
            }
        }
        Ok(())
    }
}

fn check_cell_text(sheet: &Sheet) -> Result<()> {
    match sheet.oversized_cell() {
        Some((row, col, len)) => Err(ReportError::CellTextTooLong {
            sheet: sheet.name().to_string(),
            cell: cell_reference(row, col),
            len,
            max: MAX_CELL_TEXT_LEN,
        }
        .into()),
        None => Ok(()),
    }
}

/// A1-style reference of a zero-based cell position
pub fn cell_reference(row: RowIndex, col: ColIndex) -> String {
    let mut letters = Vec::new();
    let mut n = col as u32 + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect::<String>() + &(row + 1).to_string()
}
