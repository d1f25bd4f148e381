/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_unit_source;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_unit_source::MockUnitSource;
