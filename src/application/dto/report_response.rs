use crate::reporting::Report;

/// A tenant whose sheets could not be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct TenantFailure {
    pub tenant: String,
    /// Error message including its cause chain
    pub error: String,
}

/// ReportResponse - Internal response DTO from the report generation use case
///
/// Carries the finished in-memory report plus the run statistics that the
/// CLI prints before writing the workbook.
#[derive(Debug, Clone)]
pub struct ReportResponse {
    pub report: Report,
    /// Tenants listed on the navigation sheet
    pub tenant_count: usize,
    /// Devices assigned to a tenant
    pub device_count: usize,
    /// Inventory rows without a hardware match
    pub unmatched_devices: usize,
    /// Devices dropped for a missing or empty tenant name
    pub dropped_devices: usize,
    pub duplicate_hardware_keys: Vec<String>,
    /// Software/vulnerability cells that no decoder accepted
    pub undecodable_fields: usize,
    pub failed_tenants: Vec<TenantFailure>,
}

impl ReportResponse {
    pub fn has_failures(&self) -> bool {
        !self.failed_tenants.is_empty()
    }
}
