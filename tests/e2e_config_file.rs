/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI
/// invocation to the produced workbook, using `assert_cmd` and `tempfile`
/// for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use calamine::{open_workbook_auto, Reader};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Write a minimal pair of input tables into `dir`.
fn write_inputs(dir: &Path, inventory: &str, devices: &str) {
    fs::write(
        dir.join(inventory),
        "tenantName,fqdn,software\nContoso,pc-01,\"[{'name': 'Office', 'version': '16.0'}]\"\n",
    )
    .unwrap();
    fs::write(
        dir.join(devices),
        "fqdn,Network Cards,CPU,RAM,Disk Space\npc-01,Realtek,i5,8,256\n",
    )
    .unwrap();
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn sheet_names(path: &Path) -> Vec<String> {
    open_workbook_auto(path).unwrap().sheet_names()
}

// ============================================================================
// Auto-discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_paths() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "inv.csv", "hw.csv");
        write_config(
            &dir.path().join("tenant-report.config.yml"),
            r#"
inventory: inv.csv
devices: hw.csv
output: from-config.xlsx
"#,
        );

        cargo_bin_cmd!("tenant-report")
            .current_dir(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Auto-discovered config file"));

        assert_eq!(
            sheet_names(&dir.path().join("from-config.xlsx")),
            vec!["NAVIGATION", "Contoso_MAIN", "Contoso_SOFTWARE"]
        );
    }

    #[test]
    fn test_auto_discovery_applies_navigation_sheet() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "inv.csv", "hw.csv");
        write_config(
            &dir.path().join("tenant-report.config.yml"),
            "inventory: inv.csv\ndevices: hw.csv\nnavigation_sheet: HOME\n",
        );

        cargo_bin_cmd!("tenant-report")
            .current_dir(dir.path())
            .assert()
            .success();

        let names = sheet_names(&dir.path().join("tenant_report_with_navigation.xlsx"));
        assert_eq!(names[0], "HOME");
    }

    #[test]
    fn test_no_config_file_runs_with_defaults() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "all_data_combined.csv", "devices_report.csv");

        // default inputs are .xlsx, so pass the CSV names explicitly
        cargo_bin_cmd!("tenant-report")
            .current_dir(dir.path())
            .args(["-i", "all_data_combined.csv", "-d", "devices_report.csv"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config").not());

        assert!(dir
            .path()
            .join("tenant_report_with_navigation.xlsx")
            .exists());
    }
}

// ============================================================================
// Explicit Config Path (`--config`) Tests
// ============================================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path_loads_successfully() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "inv.csv", "hw.csv");
        let config_path = dir.path().join("custom-config.yml");
        write_config(
            &config_path,
            "inventory: inv.csv\ndevices: hw.csv\noutput: explicit.xlsx\n",
        );

        cargo_bin_cmd!("tenant-report")
            .current_dir(dir.path())
            .args(["-c", "custom-config.yml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Loaded config from:"));

        assert!(dir.path().join("explicit.xlsx").exists());
    }

    #[test]
    fn test_explicit_config_nonexistent_file_error() {
        let dir = TempDir::new().unwrap();

        cargo_bin_cmd!("tenant-report")
            .current_dir(dir.path())
            .args(["-c", "nonexistent-config.yml"])
            .assert()
            .code(1) // ApplicationError
            .stderr(predicate::str::contains("Failed to read config file"));
    }

    #[test]
    fn test_explicit_config_invalid_yaml_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        write_config(&config_path, "inventory: [[[broken");

        cargo_bin_cmd!("tenant-report")
            .current_dir(dir.path())
            .args(["-c", "bad.yml"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_navigation_sheet_is_rejected() {
        let dir = TempDir::new().unwrap();
        write_config(&dir.path().join("cfg.yml"), "navigation_sheet: \"\"\n");

        cargo_bin_cmd!("tenant-report")
            .current_dir(dir.path())
            .args(["-c", "cfg.yml"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("navigation_sheet must not be empty"));
    }

    #[test]
    fn test_unknown_fields_warn_but_do_not_fail() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "inv.csv", "hw.csv");
        write_config(
            &dir.path().join("cfg.yml"),
            "inventory: inv.csv\ndevices: hw.csv\ntheme: dark\n",
        );

        cargo_bin_cmd!("tenant-report")
            .current_dir(dir.path())
            .args(["-c", "cfg.yml"])
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Unknown config field 'theme' will be ignored",
            ));
    }
}

// ============================================================================
// CLI + Config Merge Tests
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_cli_output_overrides_config() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "inv.csv", "hw.csv");
        write_config(
            &dir.path().join("tenant-report.config.yml"),
            "inventory: inv.csv\ndevices: hw.csv\noutput: config.xlsx\n",
        );

        cargo_bin_cmd!("tenant-report")
            .current_dir(dir.path())
            .args(["-o", "cli.xlsx"])
            .assert()
            .success();

        assert!(dir.path().join("cli.xlsx").exists());
        assert!(!dir.path().join("config.xlsx").exists());
    }

    #[test]
    fn test_cli_navigation_sheet_overrides_config() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "inv.csv", "hw.csv");
        write_config(
            &dir.path().join("tenant-report.config.yml"),
            "inventory: inv.csv\ndevices: hw.csv\nnavigation_sheet: FROM_CONFIG\n",
        );

        cargo_bin_cmd!("tenant-report")
            .current_dir(dir.path())
            .args(["--navigation-sheet", "FROM_CLI"])
            .assert()
            .success();

        let names = sheet_names(&dir.path().join("tenant_report_with_navigation.xlsx"));
        assert_eq!(names[0], "FROM_CLI");
    }
}
