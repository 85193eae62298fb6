/// File system adapters for raw JSON exports
mod json_export_reader;

pub use json_export_reader::JsonExportReader;
