/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (input tables, JSON exports, output
/// workbook, console).
pub mod export_source;
pub mod progress_reporter;
pub mod report_writer;
pub mod table_reader;

pub use export_source::ExportSource;
pub use progress_reporter::ProgressReporter;
pub use report_writer::ReportWriter;
pub use table_reader::TableReader;
