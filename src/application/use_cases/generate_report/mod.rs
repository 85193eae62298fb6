use crate::application::dto::{ReportRequest, ReportResponse, TenantFailure};
use crate::inventory::domain::{columns, Table};
use crate::inventory::services::{
    FieldNormalizer, InventoryMerger, MergeOutcome, NormalizedInventory, TenantPartitioner,
};
use crate::ports::outbound::{ProgressReporter, TableReader};
use crate::reporting::{sanitize_sheet_name, Report, ReportRenderer, TenantSheets};
use crate::shared::error::ReportError;
use crate::shared::Result;

/// Names shown in messages and errors for the two inputs
const INVENTORY_TABLE: &str = "inventory table";
const HARDWARE_TABLE: &str = "hardware table";

/// Duplicate keys listed in the warning before it is abbreviated
const MAX_LISTED_KEYS: usize = 5;

/// GenerateReportUseCase - Core use case for building the tenant report
///
/// Runs the pipeline load → merge → normalize → partition → render and
/// returns the in-memory report. Writing the workbook is left to the caller.
///
/// # Type Parameters
/// * `TR` - TableReader implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateReportUseCase<TR, PR> {
    table_reader: TR,
    progress_reporter: PR,
    normalizer: FieldNormalizer,
}

impl<TR, PR> GenerateReportUseCase<TR, PR>
where
    TR: TableReader,
    PR: ProgressReporter,
{
    /// Creates a new GenerateReportUseCase with injected dependencies
    pub fn new(table_reader: TR, progress_reporter: PR) -> Self {
        Self {
            table_reader,
            progress_reporter,
            normalizer: FieldNormalizer::default(),
        }
    }

    /// Executes the report generation use case
    ///
    /// # Errors
    /// Returns an error if either input cannot be loaded, a required column
    /// is missing, or the navigation sheet name is unusable. Failures while
    /// rendering a single tenant are collected in the response instead.
    pub fn execute(&self, request: ReportRequest) -> Result<ReportResponse> {
        let navigation_sheet = Self::navigation_sheet_name(&request.navigation_sheet)?;

        // Step 1: Load and validate both tables
        let (inventory, hardware) = self.load_tables(&request)?;

        // Step 2: Left join on FQDN
        let merged = self.merge(&inventory, &hardware)?;

        // Step 3: Decode OS, software and vulnerability fields
        let normalized = self.normalize(&merged);

        // Step 4: Bucket devices by cleaned tenant name
        let partition = TenantPartitioner::partition(normalized.devices);
        if partition.dropped > 0 {
            self.progress_reporter.report_warning(&format!(
                "{} device(s) skipped: tenant name missing or empty after cleaning",
                partition.dropped
            ));
        }
        let device_count = partition.tenants.iter().map(|t| t.devices().len()).sum();
        self.progress_reporter.report(&format!(
            "🏢 Found {} tenant(s) with {} device(s)",
            partition.tenants.len(),
            device_count
        ));

        // Step 5: Render tenant sheets, then the navigation sheet
        let renderer = ReportRenderer::new(navigation_sheet.as_str(), merged.columns);
        let mut report = Report::new(navigation_sheet.as_str());
        let total = partition.tenants.len();
        let mut entries = Vec::with_capacity(total);
        let mut failed_tenants = Vec::new();

        for (i, group) in partition.tenants.iter().enumerate() {
            self.progress_reporter
                .report_progress(i + 1, total, Some(group.name().as_str()));

            match renderer.render_tenant(&mut report, group) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    let failure = TenantFailure {
                        tenant: group.name().to_string(),
                        error: format!("{:#}", e),
                    };
                    self.progress_reporter.report_error(&format!(
                        "Tenant '{}' skipped: {}",
                        failure.tenant, failure.error
                    ));
                    failed_tenants.push(failure);
                    entries.push(TenantSheets::empty(group.name().clone()));
                }
            }
        }

        renderer.render_navigation(&mut report, &entries)?;
        self.progress_reporter.report_completion(&format!(
            "✅ Rendered {} of {} tenant(s) into {} sheet(s)",
            total - failed_tenants.len(),
            total,
            report.sheet_count()
        ));

        Ok(ReportResponse {
            report,
            tenant_count: total,
            device_count,
            unmatched_devices: merged.unmatched,
            dropped_devices: partition.dropped,
            duplicate_hardware_keys: merged.duplicate_hardware_keys,
            undecodable_fields: normalized.undecodable_fields,
            failed_tenants,
        })
    }

    /// Sanitized navigation sheet name; empty after sanitizing is an error
    fn navigation_sheet_name(raw: &str) -> Result<String> {
        let name = sanitize_sheet_name(raw.trim());
        if name.trim().is_empty() {
            return Err(ReportError::Validation {
                message: format!(
                    "Navigation sheet name '{}' is empty after removing characters not allowed in sheet names",
                    raw
                ),
            }
            .into());
        }
        Ok(name)
    }

    /// Loads both inputs; nothing proceeds unless both load and validate
    fn load_tables(&self, request: &ReportRequest) -> Result<(Table, Table)> {
        self.progress_reporter.report(&format!(
            "📖 Loading {} from: {}",
            INVENTORY_TABLE,
            request.inventory_path.display()
        ));
        let inventory = self
            .table_reader
            .read_table(&request.inventory_path, INVENTORY_TABLE)?;

        self.progress_reporter.report(&format!(
            "📖 Loading {} from: {}",
            HARDWARE_TABLE,
            request.devices_path.display()
        ));
        let hardware = self
            .table_reader
            .read_table(&request.devices_path, HARDWARE_TABLE)?;

        hardware.require_columns(HARDWARE_TABLE, &columns::HARDWARE_REQUIRED)?;
        inventory.require_columns(INVENTORY_TABLE, &columns::INVENTORY_REQUIRED)?;

        self.progress_reporter.report(&format!(
            "✅ Loaded {} inventory row(s) and {} hardware row(s)",
            inventory.len(),
            hardware.len()
        ));
        Ok((inventory, hardware))
    }

    fn merge(&self, inventory: &Table, hardware: &Table) -> Result<MergeOutcome> {
        let merged = InventoryMerger::merge(inventory, hardware)?;

        if !merged.duplicate_hardware_keys.is_empty() {
            self.progress_reporter.report_warning(&format!(
                "{} FQDN(s) occur more than once in the {}; matching devices are repeated once per row: {}",
                merged.duplicate_hardware_keys.len(),
                HARDWARE_TABLE,
                abbreviate(&merged.duplicate_hardware_keys)
            ));
        }
        if merged.unmatched > 0 {
            self.progress_reporter.report(&format!(
                "ℹ️  {} device(s) have no hardware row",
                merged.unmatched
            ));
        }
        Ok(merged)
    }

    fn normalize(&self, merged: &MergeOutcome) -> NormalizedInventory {
        let normalized = self.normalizer.normalize_all(&merged.rows);
        if normalized.undecodable_fields > 0 {
            self.progress_reporter.report_warning(&format!(
                "{} software/vulnerability field(s) could not be decoded and were left empty",
                normalized.undecodable_fields
            ));
        }
        normalized
    }
}

fn abbreviate(keys: &[String]) -> String {
    let mut listed = keys
        .iter()
        .take(MAX_LISTED_KEYS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if keys.len() > MAX_LISTED_KEYS {
        listed.push_str(&format!(" and {} more", keys.len() - MAX_LISTED_KEYS));
    }
    listed
}
