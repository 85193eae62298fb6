//! Configuration file support for tenant-report.
//!
//! Provides YAML-based configuration through `tenant-report.config.yml`
//! files, and the precedence rules that combine it with CLI flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "tenant-report.config.yml";

pub const DEFAULT_INVENTORY: &str = "all_data_combined.xlsx";
pub const DEFAULT_DEVICES: &str = "devices_report.xlsx";
pub const DEFAULT_OUTPUT: &str = "tenant_report_with_navigation.xlsx";
pub const DEFAULT_NAVIGATION_SHEET: &str = "NAVIGATION";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub inventory: Option<PathBuf>,
    pub devices: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub navigation_sheet: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Effective settings after applying CLI > config file > default.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub inventory: PathBuf,
    pub devices: PathBuf,
    pub output: PathBuf,
    pub navigation_sheet: String,
}

impl Settings {
    pub fn resolve(args: &Args, config: Option<ConfigFile>) -> Self {
        let config = config.unwrap_or_default();
        Self {
            inventory: args
                .inventory
                .clone()
                .or(config.inventory)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INVENTORY)),
            devices: args
                .devices
                .clone()
                .or(config.devices)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DEVICES)),
            output: args
                .output
                .clone()
                .or(config.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            navigation_sheet: args
                .navigation_sheet
                .clone()
                .or(config.navigation_sheet)
                .unwrap_or_else(|| DEFAULT_NAVIGATION_SHEET.to_string()),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref name) = config.navigation_sheet {
        if name.trim().is_empty() {
            bail!(
                "Invalid config: navigation_sheet must not be empty.\n\n\
                 💡 Hint: Remove the key to use the default name \"{}\".",
                DEFAULT_NAVIGATION_SHEET
            );
        }
    }
    for (key, value) in [
        ("inventory", &config.inventory),
        ("devices", &config.devices),
        ("output", &config.output),
    ] {
        if value.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            bail!(
                "Invalid config: {} must not be empty.\n\n💡 Hint: Remove the key to use the default path.",
                key
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
inventory: exports/all_data_combined.xlsx
devices: exports/devices_report.csv
output: reports/tenants.xlsx
navigation_sheet: INDEX
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(
            config.inventory,
            Some(PathBuf::from("exports/all_data_combined.xlsx"))
        );
        assert_eq!(
            config.devices,
            Some(PathBuf::from("exports/devices_report.csv"))
        );
        assert_eq!(config.output, Some(PathBuf::from("reports/tenants.xlsx")));
        assert_eq!(config.navigation_sheet.as_deref(), Some("INDEX"));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "navigation_sheet: HOME\n").unwrap();

        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_some());
        assert_eq!(config.unwrap().navigation_sheet.as_deref(), Some("HOME"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_navigation_sheet_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "navigation_sheet: \"   \"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("navigation_sheet must not be empty"));
    }

    #[test]
    fn test_empty_path_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "output: \"\"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("output must not be empty"));
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
output: out.xlsx
format: json
check_cve: true
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("format"));
        assert!(config.unknown_fields.contains_key("check_cve"));
    }

    #[test]
    fn test_resolve_defaults() {
        let args = Args::try_parse_from(["tenant-report"]).unwrap();
        let settings = Settings::resolve(&args, None);
        assert_eq!(settings.inventory, PathBuf::from(DEFAULT_INVENTORY));
        assert_eq!(settings.devices, PathBuf::from(DEFAULT_DEVICES));
        assert_eq!(settings.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(settings.navigation_sheet, DEFAULT_NAVIGATION_SHEET);
    }

    #[test]
    fn test_resolve_cli_overrides_config() {
        let args = Args::try_parse_from(["tenant-report", "-o", "cli.xlsx"]).unwrap();
        let config = ConfigFile {
            output: Some(PathBuf::from("config.xlsx")),
            devices: Some(PathBuf::from("config_devices.csv")),
            ..Default::default()
        };

        let settings = Settings::resolve(&args, Some(config));
        assert_eq!(settings.output, PathBuf::from("cli.xlsx"));
        assert_eq!(settings.devices, PathBuf::from("config_devices.csv"));
        assert_eq!(settings.inventory, PathBuf::from(DEFAULT_INVENTORY));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.inventory.is_none());
        assert!(config.devices.is_none());
        assert!(config.output.is_none());
        assert!(config.navigation_sheet.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
