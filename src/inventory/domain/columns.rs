//! Column names recognized in the two input tables

/// Join key present in both tables
pub const FQDN: &str = "fqdn";

pub const TENANT_NAME: &str = "tenantName";
pub const IP_ADDRESSES: &str = "ipAddresses";
pub const MAC_ADDRESSES: &str = "macAddresses";
pub const OS: &str = "os";
pub const SOFTWARE: &str = "software";
pub const VULNERABILITIES: &str = "vulnerabilities";

pub const NETWORK_CARDS: &str = "Network Cards";
pub const CPU: &str = "CPU";
pub const RAM: &str = "RAM";
pub const DISK_SPACE: &str = "Disk Space";

/// Columns the hardware table must provide
pub const HARDWARE_REQUIRED: [&str; 5] = [FQDN, NETWORK_CARDS, CPU, RAM, DISK_SPACE];

/// Columns the inventory table must provide
pub const INVENTORY_REQUIRED: [&str; 2] = [FQDN, TENANT_NAME];
