use super::cell::CellValue;

/// Operating-system name and version derived from the raw `os` field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OsDescriptor {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl OsDescriptor {
    pub fn new(name: Option<String>, version: Option<String>) -> Self {
        Self { name, version }
    }
}

/// One installed software package reported for a device
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstalledSoftware {
    pub name: Option<String>,
    pub version: Option<String>,
    pub vendor: Option<String>,
}

impl InstalledSoftware {
    /// Source keys, in column order
    pub const FIELDS: [&'static str; 3] = ["name", "version", "vendor"];

    /// Values in the same order as [`Self::FIELDS`]
    pub fn values(&self) -> [Option<&str>; 3] {
        [
            self.name.as_deref(),
            self.version.as_deref(),
            self.vendor.as_deref(),
        ]
    }
}

/// One vulnerability finding reported for a device
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VulnerabilityFinding {
    pub advisory_id: Option<String>,
    pub product_name: Option<String>,
    pub description_url: Option<String>,
    pub recommended_major_patch: Option<String>,
    pub recommended_minor_patch: Option<String>,
    pub severity_label: Option<String>,
    pub severity_score: Option<String>,
    pub cve: Option<String>,
    pub exploit_exists: Option<String>,
    pub malware_exists: Option<String>,
}

impl VulnerabilityFinding {
    /// Source keys, in column order
    pub const FIELDS: [&'static str; 10] = [
        "kasperskyID",
        "productName",
        "descriptionURL",
        "recommendedMajorPatch",
        "recommendedMinorPatch",
        "severityStr",
        "severity",
        "cve",
        "exploitExists",
        "malwareExists",
    ];

    /// Values in the same order as [`Self::FIELDS`]
    pub fn values(&self) -> [Option<&str>; 10] {
        [
            self.advisory_id.as_deref(),
            self.product_name.as_deref(),
            self.description_url.as_deref(),
            self.recommended_major_patch.as_deref(),
            self.recommended_minor_patch.as_deref(),
            self.severity_label.as_deref(),
            self.severity_score.as_deref(),
            self.cve.as_deref(),
            self.exploit_exists.as_deref(),
            self.malware_exists.as_deref(),
        ]
    }
}

/// A merged inventory row before any field decoding
///
/// Holds the raw cells of one inventory row joined with (at most) one
/// hardware row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedRow {
    pub tenant_name: CellValue,
    pub fqdn: CellValue,
    pub ip_addresses: CellValue,
    pub mac_addresses: CellValue,
    pub os: CellValue,
    pub software: CellValue,
    pub vulnerabilities: CellValue,
    pub network_cards: CellValue,
    pub cpu: CellValue,
    pub ram: CellValue,
    pub disk_space: CellValue,
}

/// A fully normalized device
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceRecord {
    pub tenant_name: Option<String>,
    pub fqdn: Option<String>,
    pub ip_addresses: Vec<String>,
    pub mac_addresses: Vec<String>,
    pub network_cards: CellValue,
    pub cpu: CellValue,
    pub ram: CellValue,
    pub disk_space: CellValue,
    pub os: OsDescriptor,
    pub software: Vec<InstalledSoftware>,
    pub vulnerabilities: Vec<VulnerabilityFinding>,
}

impl DeviceRecord {
    /// The grouping key used by the software and vulnerability sheets
    pub fn fqdn_or_blank(&self) -> &str {
        self.fqdn.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_software_values_follow_field_order() {
        let item = InstalledSoftware {
            name: Some("7-Zip".to_string()),
            version: None,
            vendor: Some("Igor Pavlov".to_string()),
        };
        assert_eq!(item.values(), [Some("7-Zip"), None, Some("Igor Pavlov")]);
    }

    #[test]
    fn test_finding_values_follow_field_order() {
        let finding = VulnerabilityFinding {
            advisory_id: Some("KLA10001".to_string()),
            cve: Some("CVE-2024-0001".to_string()),
            ..Default::default()
        };
        let values = finding.values();
        assert_eq!(values.len(), VulnerabilityFinding::FIELDS.len());
        assert_eq!(values[0], Some("KLA10001"));
        assert_eq!(values[7], Some("CVE-2024-0001"));
        assert_eq!(VulnerabilityFinding::FIELDS[7], "cve");
    }

    #[test]
    fn test_fqdn_or_blank() {
        let device = DeviceRecord::default();
        assert_eq!(device.fqdn_or_blank(), "");
    }
}
