//! tenant-report - per-tenant inventory workbook generator
//!
//! Merges a device inventory export with a hardware export, decodes the
//! loosely serialized OS, software and vulnerability fields, and writes one
//! `.xlsx` workbook with a navigation sheet and per-tenant sheets.
//!
//! The `collect` step comes earlier in the pipeline: it gathers raw JSON
//! device exports from a directory and writes them one sheet per tenant.
//!
//! # Architecture
//!
//! - **Domain Layer** (`inventory`): Device model, decoders, merge and partitioning
//! - **Report Model** (`reporting`): In-memory workbook and sheet layout rules
//! - **Application Layer** (`application`): Report generation and export collection use cases
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Spreadsheet, JSON file and console implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use tenant_report::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> Result<()> {
//! let use_case = GenerateReportUseCase::new(
//!     SpreadsheetReader::new(),
//!     ConsoleProgressReporter::new(),
//! );
//!
//! let request = ReportRequest::new(
//!     PathBuf::from("all_data_combined.xlsx"),
//!     PathBuf::from("devices_report.xlsx"),
//!     "NAVIGATION".to_string(),
//! );
//! let response = use_case.execute(request)?;
//!
//! XlsxReportWriter::new().write_report(
//!     &response.report,
//!     Path::new("tenant_report_with_navigation.xlsx"),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod inventory;
pub mod ports;
pub mod reporting;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::ConsoleProgressReporter;
    pub use crate::adapters::outbound::filesystem::JsonExportReader;
    pub use crate::adapters::outbound::spreadsheet::{SpreadsheetReader, XlsxReportWriter};
    pub use crate::application::dto::{
        CollectRequest, CollectResponse, FileFailure, ReportRequest, ReportResponse, TenantFailure,
    };
    pub use crate::application::use_cases::{CollectExportsUseCase, GenerateReportUseCase};
    pub use crate::inventory::domain::{
        CellValue, DeviceRecord, InstalledSoftware, OsDescriptor, Table, TenantGroup, TenantName,
        TenantTable, VulnerabilityFinding,
    };
    pub use crate::inventory::services::{
        DecoderChain, ExportCollator, FieldNormalizer, InventoryMerger, TenantPartitioner,
        ValueDecoder,
    };
    pub use crate::ports::outbound::{ExportSource, ProgressReporter, ReportWriter, TableReader};
    pub use crate::reporting::{export_sheet, Report, ReportRenderer, Sheet, SheetKind};
    pub use crate::shared::Result;
}
