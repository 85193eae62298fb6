use std::path::PathBuf;

/// ReportRequest - Internal request DTO for the report generation use case
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Combined inventory table (tenant, FQDN, OS, software, vulnerabilities)
    pub inventory_path: PathBuf,
    /// Hardware table keyed by FQDN
    pub devices_path: PathBuf,
    /// Name of the navigation sheet
    pub navigation_sheet: String,
}

impl ReportRequest {
    pub fn new(inventory_path: PathBuf, devices_path: PathBuf, navigation_sheet: String) -> Self {
        Self {
            inventory_path,
            devices_path,
            navigation_sheet,
        }
    }
}
