use crate::application::read_models::AnalysisReport;

/// AnalysisResponse - the report and the facts the caller acts on
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    pub report: AnalysisReport,
    /// True if the analysed view still contains a cycle after excuses
    pub has_cycles: bool,
}

impl AnalysisResponse {
    pub fn new(report: AnalysisReport) -> Self {
        let has_cycles = !report.cycles.is_empty();
        Self { report, has_cycles }
    }
}
