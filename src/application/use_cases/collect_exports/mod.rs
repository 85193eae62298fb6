use crate::application::dto::{CollectRequest, CollectResponse, FileFailure, TenantFailure};
use crate::inventory::services::ExportCollator;
use crate::ports::outbound::{ExportSource, ProgressReporter};
use crate::reporting::{export_sheet, Report};
use crate::shared::error::ReportError;
use crate::shared::Result;
use std::path::Path;

/// CollectExportsUseCase - Combines raw JSON device exports per tenant
///
/// Reads every export in a directory, cleans the address fields, buckets
/// the records by `tenantName` and lays out one sheet per tenant.
///
/// # Type Parameters
/// * `ES` - ExportSource implementation
/// * `PR` - ProgressReporter implementation
pub struct CollectExportsUseCase<ES, PR> {
    export_source: ES,
    progress_reporter: PR,
}

impl<ES, PR> CollectExportsUseCase<ES, PR>
where
    ES: ExportSource,
    PR: ProgressReporter,
{
    pub fn new(export_source: ES, progress_reporter: PR) -> Self {
        Self {
            export_source,
            progress_reporter,
        }
    }

    /// Executes the collect use case
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed or no file yields
    /// a record. Unreadable files and tenants whose sheet cannot be built
    /// are collected in the response instead.
    pub fn execute(&self, request: CollectRequest) -> Result<CollectResponse> {
        self.progress_reporter.report(&format!(
            "📂 Reading JSON exports from: {}",
            request.input_dir.display()
        ));
        let files = self.export_source.list_exports(&request.input_dir)?;

        let mut collator = ExportCollator::new();
        let mut files_read = 0;
        let mut failed_files = Vec::new();

        for path in &files {
            let file = display_name(path);
            match self
                .export_source
                .read_export(path)
                .and_then(|document| collator.add_document(document))
            {
                Ok(count) => {
                    files_read += 1;
                    self.progress_reporter
                        .report(&format!("✅ Processed {} ({} record(s))", file, count));
                }
                Err(e) => {
                    let failure = FileFailure {
                        file,
                        error: format!("{:#}", e),
                    };
                    self.progress_reporter.report_error(&format!(
                        "File '{}' skipped: {}",
                        failure.file, failure.error
                    ));
                    failed_files.push(failure);
                }
            }
        }

        let record_count = collator.record_count();
        let tables = collator.finish();
        if tables.is_empty() {
            return Err(ReportError::NoExportRecords {
                path: request.input_dir,
            }
            .into());
        }

        let mut report = Report::without_navigation();
        let total = tables.len();
        let mut failed_tenants = Vec::new();

        for (i, table) in tables.iter().enumerate() {
            self.progress_reporter
                .report_progress(i + 1, total, Some(table.tenant()));

            if let Err(e) = export_sheet(table).and_then(|sheet| report.add_sheets(vec![sheet])) {
                let failure = TenantFailure {
                    tenant: table.tenant().to_string(),
                    error: format!("{:#}", e),
                };
                self.progress_reporter.report_error(&format!(
                    "Tenant '{}' skipped: {}",
                    failure.tenant, failure.error
                ));
                failed_tenants.push(failure);
            }
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Collected {} record(s) from {} file(s) into {} sheet(s)",
            record_count,
            files_read,
            report.sheet_count()
        ));

        Ok(CollectResponse {
            report,
            files_read,
            failed_files,
            record_count,
            tenant_count: total,
            failed_tenants,
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
