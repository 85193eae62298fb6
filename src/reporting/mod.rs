//! Workbook model and the rules for laying out tenant sheets

pub mod document;
pub mod renderer;
pub mod sheet_names;

pub use document::{
    Cell, CellStyle, ColIndex, MergeRange, Report, RowIndex, Sheet, SheetLink, MAX_CELL_TEXT_LEN,
};
pub use renderer::{export_sheet, ReportRenderer, RowGroup, TenantSheets};
pub use sheet_names::{export_sheet_name, sanitize_sheet_name, tenant_sheet_name, SheetKind};
