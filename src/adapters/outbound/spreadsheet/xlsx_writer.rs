use crate::inventory::domain::CellValue;
use crate::ports::outbound::ReportWriter;
use crate::reporting::{Cell, CellStyle, ColIndex, Report, RowIndex, Sheet};
use crate::shared::error::ReportError;
use crate::shared::Result;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatPattern, FormatUnderline, Url, Workbook, Worksheet,
    XlsxError,
};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// XlsxReportWriter adapter for writing the report as an `.xlsx` workbook
///
/// The workbook is serialized in memory, written to a temporary file next
/// to the destination and renamed into place.
pub struct XlsxReportWriter;

impl XlsxReportWriter {
    pub fn new() -> Self {
        Self
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() && parent != Path::new("") {
                return Err(ReportError::FileWriteError {
                    path: path.to_path_buf(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Rejects an existing destination that is a symbolic link
    fn validate_output_security(&self, path: &Path) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(path) {
            if metadata.is_symlink() {
                return Err(ReportError::SecurityError {
                    path: path.to_path_buf(),
                    reason: "Output path is a symbolic link".to_string(),
                    hint: "Writing through symbolic links is not allowed; choose a regular file path"
                        .to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Serializes the report into xlsx bytes
    pub fn to_bytes(&self, report: &Report) -> std::result::Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        for sheet in report.sheets() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name())?;
            write_sheet(worksheet, sheet)?;
        }
        workbook.save_to_buffer()
    }

    fn persist(&self, bytes: &[u8], path: &Path) -> Result<()> {
        let write_error = |details: String| ReportError::FileWriteError {
            path: path.to_path_buf(),
            details,
        };

        let dir = match path.parent() {
            Some(parent) if parent != Path::new("") => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| write_error(e.to_string()))?;
        temp.write_all(bytes)
            .map_err(|e| write_error(e.to_string()))?;
        temp.persist(path)
            .map_err(|e| write_error(e.error.to_string()))?;
        Ok(())
    }
}

impl Default for XlsxReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportWriter for XlsxReportWriter {
    fn write_report(&self, report: &Report, path: &Path) -> Result<()> {
        report.validate()?;
        self.validate_parent_directory(path)?;
        self.validate_output_security(path)?;

        let bytes = self.to_bytes(report).map_err(|e| ReportError::FileWriteError {
            path: path.to_path_buf(),
            details: format!("Failed to build workbook: {}", e),
        })?;

        self.persist(&bytes, path)
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> std::result::Result<(), XlsxError> {
    for (&col, &width) in sheet.column_widths() {
        worksheet.set_column_width(col, width)?;
    }
    for (&row, &height) in sheet.row_heights() {
        worksheet.set_row_height(row, height)?;
    }

    // merged ranges first; the anchor cell is written over them below
    for merge in sheet.merges() {
        let style = sheet
            .cell(merge.first_row, merge.col)
            .map(|c| c.style)
            .unwrap_or_default();
        worksheet.merge_range(
            merge.first_row,
            merge.col,
            merge.last_row,
            merge.col,
            "",
            &format_for(&style),
        )?;
    }

    for (row, col, cell) in sheet.cells() {
        write_cell(worksheet, row, col, cell)?;
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowIndex,
    col: ColIndex,
    cell: &Cell,
) -> std::result::Result<(), XlsxError> {
    let format = format_for(&cell.style);

    if let Some(link) = &cell.link {
        let text = cell.value.as_text().unwrap_or_default();
        let url = Url::new(format!("internal:{}", link.location())).set_text(text);
        worksheet.write_url_with_format(row, col, url, &format)?;
        return Ok(());
    }

    match &cell.value {
        CellValue::Text(text) => {
            worksheet.write_string_with_format(row, col, text, &format)?;
        }
        CellValue::Number(n) if n.is_finite() => {
            worksheet.write_number_with_format(row, col, *n, &format)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, &format)?;
        }
        CellValue::Number(_) | CellValue::Empty => {
            if !cell.style.is_plain() {
                worksheet.write_blank(row, col, &format)?;
            }
        }
    }
    Ok(())
}

fn format_for(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    if let Some(rgb) = style.font_color {
        format = format.set_font_color(Color::RGB(rgb));
    }
    if style.underline {
        format = format.set_underline(FormatUnderline::Single);
    }
    if let Some(rgb) = style.fill {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(rgb));
    }
    if style.centered {
        format = format
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
    }
    format
}
