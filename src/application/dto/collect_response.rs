use super::report_response::TenantFailure;
use crate::reporting::Report;

/// An export file that was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

/// CollectResponse - Internal response DTO from the collect use case
#[derive(Debug, Clone)]
pub struct CollectResponse {
    /// One sheet per tenant, no navigation sheet
    pub report: Report,
    pub files_read: usize,
    pub failed_files: Vec<FileFailure>,
    pub record_count: usize,
    pub tenant_count: usize,
    pub failed_tenants: Vec<TenantFailure>,
}

impl CollectResponse {
    pub fn has_failures(&self) -> bool {
        !self.failed_files.is_empty() || !self.failed_tenants.is_empty()
    }
}
