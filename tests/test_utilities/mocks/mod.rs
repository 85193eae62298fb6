/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_table_reader;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_table_reader::MockTableReader;
