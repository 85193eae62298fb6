use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default directory of JSON exports for `collect`
pub const DEFAULT_EXPORT_DIR: &str = "response";
/// Default workbook written by `collect`
pub const DEFAULT_COLLECT_OUTPUT: &str = "tenant_data_cleaned.xlsx";

/// Build a per-tenant, navigable Excel report from device inventory exports
#[derive(Parser, Debug)]
#[command(name = "tenant-report")]
#[command(version)]
#[command(
    about = "Build a per-tenant, navigable Excel report from device inventory exports",
    long_about = None
)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Combined inventory table (.xlsx, .xls, .ods or .csv) [default: all_data_combined.xlsx]
    #[arg(short, long, value_name = "PATH")]
    pub inventory: Option<PathBuf>,

    /// Hardware table keyed by fqdn [default: devices_report.xlsx]
    #[arg(short, long, value_name = "PATH")]
    pub devices: Option<PathBuf>,

    /// Output workbook [default: tenant_report_with_navigation.xlsx]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Config file (defaults to tenant-report.config.yml in the current directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name of the navigation sheet [default: NAVIGATION]
    #[arg(long, value_name = "NAME")]
    pub navigation_sheet: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Combine a directory of JSON device exports into one sheet per tenant
    Collect(CollectArgs),
}

#[derive(clap::Args, Debug)]
pub struct CollectArgs {
    /// Directory holding the .json exports
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_EXPORT_DIR)]
    pub input_dir: PathBuf,

    /// Output workbook
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_COLLECT_OUTPUT)]
    pub output: PathBuf,
}
