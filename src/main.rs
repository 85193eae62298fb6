mod adapters;
mod application;
mod cli;
mod config;
mod inventory;
mod ports;
mod reporting;
mod shared;

use adapters::outbound::console::ConsoleProgressReporter;
use adapters::outbound::filesystem::JsonExportReader;
use adapters::outbound::spreadsheet::{SpreadsheetReader, XlsxReportWriter};
use application::dto::{CollectRequest, CollectResponse, ReportRequest, ReportResponse};
use application::use_cases::{CollectExportsUseCase, GenerateReportUseCase};
use cli::{Args, CollectArgs, Command};
use config::{discover_config, load_config_from_path, Settings, CONFIG_FILENAME};
use owo_colors::OwoColorize;
use ports::outbound::ReportWriter;
use shared::error::ExitCode;
use shared::Result;
use std::backtrace::BacktraceStatus;
use std::path::Path;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n{}\n", "❌ An error occurred:".red());
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        if e.backtrace().status() == BacktraceStatus::Captured {
            eprintln!("\nBacktrace:\n{}", e.backtrace());
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run() -> Result<()> {
    // Parse command-line arguments (clap exits with 2 on invalid input)
    let args = Args::parse_args();

    match &args.command {
        Some(Command::Collect(collect)) => run_collect(collect),
        None => run_report(&args),
    }
}

fn run_report(args: &Args) -> Result<()> {
    // Explicit config is mandatory once given; otherwise look in the working directory
    let config = match args.config.as_deref() {
        Some(path) => {
            let config = load_config_from_path(path)?;
            println!("⚙️  Loaded config from: {}", path.display());
            Some(config)
        }
        None => {
            let config = discover_config(Path::new("."))?;
            if config.is_some() {
                println!("⚙️  Auto-discovered config file: {}", CONFIG_FILENAME);
            }
            config
        }
    };
    let settings = Settings::resolve(args, config);

    // Create adapters (Dependency Injection)
    let table_reader = SpreadsheetReader::new();
    let progress_reporter = ConsoleProgressReporter::new();
    let use_case = GenerateReportUseCase::new(table_reader, progress_reporter);

    let request = ReportRequest::new(
        settings.inventory.clone(),
        settings.devices.clone(),
        settings.navigation_sheet.clone(),
    );
    let response = use_case.execute(request)?;

    println!(
        "📝 Writing {} sheet(s) to {}",
        response.report.sheet_count(),
        settings.output.display()
    );
    XlsxReportWriter::new().write_report(&response.report, &settings.output)?;

    print_summary(&response, &settings.output);
    Ok(())
}

fn run_collect(args: &CollectArgs) -> Result<()> {
    let use_case = CollectExportsUseCase::new(JsonExportReader::new(), ConsoleProgressReporter::new());
    let response = use_case.execute(CollectRequest::new(args.input_dir.clone()))?;

    println!(
        "📝 Writing {} sheet(s) to {}",
        response.report.sheet_count(),
        args.output.display()
    );
    XlsxReportWriter::new().write_report(&response.report, &args.output)?;

    print_collect_summary(&response, &args.output);
    Ok(())
}

fn print_collect_summary(response: &CollectResponse, output: &Path) {
    println!();
    println!(
        "{} {}",
        "✅ Output complete:".green(),
        output.display()
    );
    println!(
        "   {} record(s), {} sheet(s) from {} file(s)",
        response.record_count,
        response.report.sheet_count(),
        response.files_read
    );

    for failure in &response.failed_files {
        println!("{} {}: {}", "⚠️  Skipped file".yellow(), failure.file, failure.error);
    }
    for failure in &response.failed_tenants {
        println!("{} {}: {}", "⚠️  Skipped tenant".yellow(), failure.tenant, failure.error);
    }
}

fn print_summary(response: &ReportResponse, output: &Path) {
    println!();
    println!(
        "{} {}",
        "✅ Output complete:".green(),
        output.display()
    );
    println!(
        "   {} tenant(s), {} device(s)",
        response.tenant_count, response.device_count
    );

    if response.has_failures() {
        println!(
            "{} {} tenant(s) could not be rendered and are listed without links:",
            "⚠️  Warning:".yellow(),
            response.failed_tenants.len()
        );
        for failure in &response.failed_tenants {
            println!("   - {}: {}", failure.tenant, failure.error);
        }
    }
}
