/// Spreadsheet adapters for loading input tables and writing the report
mod table_reader;
mod xlsx_writer;

pub use table_reader::SpreadsheetReader;
pub use xlsx_writer::XlsxReportWriter;
