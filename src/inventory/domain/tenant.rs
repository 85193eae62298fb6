use super::device::DeviceRecord;
use regex::Regex;
use std::sync::LazyLock;

/// Matches bracketed annotations such as `[EXPIRED]`, shortest span first
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("bracket pattern is valid"));

/// NewType wrapper for a cleaned tenant name
///
/// A `TenantName` is never empty: bracketed annotations are removed and
/// whitespace runs collapsed before the value is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantName(String);

impl TenantName {
    /// Cleans a raw tenant name; returns `None` when nothing is left
    pub fn clean(raw: &str) -> Option<Self> {
        let stripped = BRACKETED.replace_all(raw, "");
        let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(Self(collapsed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `max_chars` characters, used as the sheet-name prefix
    pub fn prefix(&self, max_chars: usize) -> String {
        self.0.chars().take(max_chars).collect()
    }
}

impl std::fmt::Display for TenantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All devices that belong to one cleaned tenant name
#[derive(Debug, Clone, PartialEq)]
pub struct TenantGroup {
    name: TenantName,
    devices: Vec<DeviceRecord>,
}

impl TenantGroup {
    pub fn new(name: TenantName) -> Self {
        Self {
            name,
            devices: Vec::new(),
        }
    }

    pub fn push(&mut self, device: DeviceRecord) {
        self.devices.push(device);
    }

    pub fn name(&self) -> &TenantName {
        &self.name
    }

    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    pub fn software_count(&self) -> usize {
        self.devices.iter().map(|d| d.software.len()).sum()
    }

    pub fn vulnerability_count(&self) -> usize {
        self.devices.iter().map(|d| d.vulnerabilities.len()).sum()
    }
}
