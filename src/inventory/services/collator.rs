use crate::inventory::domain::columns;
use crate::inventory::domain::export::{CLEANED_FIELDS, UNNAMED_TENANT};
use crate::inventory::domain::{CellValue, TenantTable};
use crate::shared::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// ExportCollator - buckets raw JSON export records by tenant
///
/// Each document is either a single record or a list of records. Tenants
/// and their columns keep first-occurrence order across all documents.
#[derive(Debug, Default)]
pub struct ExportCollator {
    tables: Vec<TenantTable>,
    positions: HashMap<String, usize>,
    records: usize,
}

impl ExportCollator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every record of one document and returns how many there were
    ///
    /// # Errors
    /// Returns an error if an element is not a JSON object; no record of the
    /// document is added then.
    pub fn add_document(&mut self, document: Value) -> Result<usize> {
        let items = match document {
            Value::Array(items) => items,
            single => vec![single],
        };

        let mut records = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(record) => records.push(record),
                other => anyhow::bail!(
                    "Record {} is {} instead of a JSON object",
                    i + 1,
                    json_kind(&other)
                ),
            }
        }

        let count = records.len();
        for record in records {
            self.push(record);
        }
        Ok(count)
    }

    /// Records accepted so far
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Tenant tables in first-occurrence order
    pub fn finish(self) -> Vec<TenantTable> {
        self.tables
    }

    fn push(&mut self, record: Map<String, Value>) {
        let tenant = tenant_label(record.get(columns::TENANT_NAME));
        let index = match self.positions.get(&tenant) {
            Some(&index) => index,
            None => {
                self.positions.insert(tenant.clone(), self.tables.len());
                self.tables.push(TenantTable::new(tenant));
                self.tables.len() - 1
            }
        };

        self.tables[index].push_record(record.into_iter().map(|(key, value)| {
            let cell = if CLEANED_FIELDS.contains(&key.as_str()) {
                CellValue::text(clean_field(&value))
            } else {
                cell_from_json(&value)
            };
            (key, cell)
        }));
        self.records += 1;
    }
}

/// Flattens an address-like field to plain text
///
/// A list becomes its elements joined with `", "`; any other value loses its
/// square brackets and apostrophes. Null is empty.
pub fn clean_field(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(plain_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => plain_text(other)
            .chars()
            .filter(|c| !matches!(c, '[' | ']' | '\''))
            .collect(),
    }
}

/// Cell for an uncleaned export field
fn cell_from_json(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::text(n.to_string()),
        },
        Value::String(s) => CellValue::text(s.as_str()),
        nested @ (Value::Array(_) | Value::Object(_)) => CellValue::text(nested.to_string()),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

fn tenant_label(value: Option<&Value>) -> String {
    let label = value.map(plain_text).unwrap_or_default();
    let label = label.trim();
    if label.is_empty() {
        UNNAMED_TENANT.to_string()
    } else {
        label.to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
