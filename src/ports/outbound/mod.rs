/// Outbound ports (driven ports) - infrastructure interfaces
///
/// The analysis core reaches input files, the console and output
/// destinations only through these traits.
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod unit_source;

pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use unit_source::{LoadedSource, UnitInput, UnitSource};
