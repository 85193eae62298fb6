use crate::inventory::domain::{DeviceRecord, TenantGroup, TenantName};
use std::collections::HashMap;

/// Devices split by cleaned tenant name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    /// Tenants in first-occurrence order
    pub tenants: Vec<TenantGroup>,
    /// Devices dropped because their tenant name was missing or cleaned to nothing
    pub dropped: usize,
}

/// TenantPartitioner - buckets devices by cleaned tenant name
pub struct TenantPartitioner;

impl TenantPartitioner {
    /// Groups devices by [`TenantName::clean`] of their tenant field
    ///
    /// Tenant order follows the first device seen for each name; device
    /// order inside a tenant follows the input.
    pub fn partition(devices: Vec<DeviceRecord>) -> Partition {
        let mut partition = Partition::default();
        let mut positions: HashMap<TenantName, usize> = HashMap::new();

        for device in devices {
            let Some(name) = device.tenant_name.as_deref().and_then(TenantName::clean) else {
                partition.dropped += 1;
                continue;
            };

            let slot = *positions.entry(name.clone()).or_insert_with(|| {
                partition.tenants.push(TenantGroup::new(name));
                partition.tenants.len() - 1
            });
            partition.tenants[slot].push(device);
        }

        partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(tenant: Option<&str>, fqdn: &str) -> DeviceRecord {
        DeviceRecord {
            tenant_name: tenant.map(str::to_string),
            fqdn: Some(fqdn.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_occurrence_order() {
        let partition = TenantPartitioner::partition(vec![
            device(Some("Zeta"), "z1"),
            device(Some("Alpha"), "a1"),
            device(Some("Zeta"), "z2"),
        ]);
        let names: Vec<&str> = partition.tenants.iter().map(|t| t.name().as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(partition.tenants[0].devices().len(), 2);
        assert_eq!(partition.tenants[0].devices()[1].fqdn.as_deref(), Some("z2"));
    }

    #[test]
    fn test_raw_names_with_same_cleaned_value_share_a_partition() {
        let partition = TenantPartitioner::partition(vec![
            device(Some("Acme [LEGACY]"), "a1"),
            device(Some("Acme"), "a2"),
            device(Some("  Acme  [EXPIRED] "), "a3"),
        ]);
        assert_eq!(partition.tenants.len(), 1);
        assert_eq!(partition.tenants[0].name().as_str(), "Acme");
        assert_eq!(partition.tenants[0].devices().len(), 3);
    }

    #[test]
    fn test_missing_or_empty_names_are_dropped() {
        let partition = TenantPartitioner::partition(vec![
            device(None, "x"),
            device(Some("[ONLY ANNOTATION]"), "y"),
            device(Some("Corp"), "z"),
        ]);
        assert_eq!(partition.tenants.len(), 1);
        assert_eq!(partition.dropped, 2);
    }
}
