use super::decoders::DecoderChain;
use crate::inventory::domain::{
    CellValue, DeviceRecord, InstalledSoftware, MergedRow, OsDescriptor, VulnerabilityFinding,
};
use serde_json::{Map, Value};

/// Result of decoding a serialized list field
#[derive(Debug, Clone, PartialEq)]
enum ListField {
    /// The cell was empty
    Absent,
    /// Mapping elements of the decoded list (other elements are dropped)
    Decoded(Vec<Map<String, Value>>),
    /// No decoder accepted the text, or it decoded to something other than a list
    Undecodable,
}

impl ListField {
    fn into_records(self) -> Vec<Map<String, Value>> {
        match self {
            ListField::Decoded(records) => records,
            ListField::Absent | ListField::Undecodable => Vec::new(),
        }
    }
}

/// Devices produced by [`FieldNormalizer::normalize_all`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedInventory {
    pub devices: Vec<DeviceRecord>,
    /// Non-empty software/vulnerability cells that could not be decoded
    pub undecodable_fields: usize,
}

/// FieldNormalizer - decodes the ambiguous inventory fields
///
/// Pure: every method maps its input to a value, and decode failures
/// degrade to `None` or an empty list instead of an error.
pub struct FieldNormalizer {
    chain: DecoderChain,
}

impl FieldNormalizer {
    pub fn new(chain: DecoderChain) -> Self {
        Self { chain }
    }

    /// Normalizes every merged row, preserving order
    pub fn normalize_all(&self, rows: &[MergedRow]) -> NormalizedInventory {
        let mut outcome = NormalizedInventory::default();
        for row in rows {
            let software = self.decode_list(&row.software);
            let vulnerabilities = self.decode_list(&row.vulnerabilities);
            outcome.undecodable_fields += [&software, &vulnerabilities]
                .iter()
                .filter(|f| matches!(f, ListField::Undecodable))
                .count();
            outcome.devices.push(self.build_device(row, software, vulnerabilities));
        }
        outcome
    }

    fn build_device(
        &self,
        row: &MergedRow,
        software: ListField,
        vulnerabilities: ListField,
    ) -> DeviceRecord {
        DeviceRecord {
            tenant_name: row.tenant_name.as_text(),
            fqdn: row.fqdn.as_text(),
            ip_addresses: self.parse_addresses(&row.ip_addresses),
            mac_addresses: self.parse_addresses(&row.mac_addresses),
            network_cards: row.network_cards.clone(),
            cpu: row.cpu.clone(),
            ram: row.ram.clone(),
            disk_space: row.disk_space.clone(),
            os: self.parse_os(&row.os),
            software: software.into_records().iter().map(software_from).collect(),
            vulnerabilities: vulnerabilities
                .into_records()
                .iter()
                .map(finding_from)
                .collect(),
        }
    }

    /// Splits the OS field into name and version
    ///
    /// Plain text without `name`/`version` markers is split on its last
    /// whitespace; anything else goes through the decoder chain.
    pub fn parse_os(&self, raw: &CellValue) -> OsDescriptor {
        let Some(text) = raw.as_text() else {
            return OsDescriptor::default();
        };

        let lower = text.to_lowercase();
        if !lower.contains("name") && !lower.contains("version") {
            return match text.rsplit_once(char::is_whitespace) {
                Some((name, version)) => OsDescriptor::new(
                    Some(name.trim_end().to_string()),
                    Some(version.to_string()),
                ),
                None => OsDescriptor::new(Some(text), None),
            };
        }

        match self.chain.decode(&text) {
            Ok(Value::Object(map)) => {
                OsDescriptor::new(field_text(&map, "name"), field_text(&map, "version"))
            }
            _ => OsDescriptor::new(Some(text), None),
        }
    }

    /// Decodes the software list field; failures yield an empty list
    pub fn parse_software(&self, raw: &CellValue) -> Vec<InstalledSoftware> {
        self.decode_list(raw)
            .into_records()
            .iter()
            .map(software_from)
            .collect()
    }

    /// Decodes the vulnerability list field; failures yield an empty list
    pub fn parse_vulnerabilities(&self, raw: &CellValue) -> Vec<VulnerabilityFinding> {
        self.decode_list(raw)
            .into_records()
            .iter()
            .map(finding_from)
            .collect()
    }

    /// Reads an IP/MAC address field
    ///
    /// A serialized list becomes its non-empty elements; any other text is a
    /// single address entry.
    pub fn parse_addresses(&self, raw: &CellValue) -> Vec<String> {
        let Some(text) = raw.as_text() else {
            return Vec::new();
        };
        match self.chain.decode(&text) {
            Ok(Value::Array(items)) => items.iter().filter_map(value_text).collect(),
            _ => vec![text],
        }
    }

    fn decode_list(&self, raw: &CellValue) -> ListField {
        let Some(text) = raw.as_text() else {
            return ListField::Absent;
        };
        match self.chain.decode(&text) {
            Ok(Value::Array(items)) => ListField::Decoded(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(map) => Some(map),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => ListField::Undecodable,
        }
    }
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new(DecoderChain::standard())
    }
}

fn software_from(map: &Map<String, Value>) -> InstalledSoftware {
    InstalledSoftware {
        name: field_text(map, "name"),
        version: field_text(map, "version"),
        vendor: field_text(map, "vendor"),
    }
}

fn finding_from(map: &Map<String, Value>) -> VulnerabilityFinding {
    let [advisory_id, product_name, description_url, recommended_major_patch, recommended_minor_patch, severity_label, severity_score, cve, exploit_exists, malware_exists] =
        VulnerabilityFinding::FIELDS.map(|key| field_text(map, key));
    VulnerabilityFinding {
        advisory_id,
        product_name,
        description_url,
        recommended_major_patch,
        recommended_minor_patch,
        severity_label,
        severity_score,
        cve,
        exploit_exists,
        malware_exists,
    }
}

fn field_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(value_text)
}

/// Text rendering of a decoded sub-field; null and blank map to `None`
fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
