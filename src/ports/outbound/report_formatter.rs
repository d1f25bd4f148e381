use crate::application::read_models::AnalysisReport;
use crate::shared::Result;

/// ReportFormatter port for rendering an analysis report
///
/// Implementations turn the read model into text (plain text, JSON, ...).
pub trait ReportFormatter {
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &AnalysisReport) -> Result<String>;
}
