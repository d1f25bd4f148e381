//! Read models for the report output
//!
//! Denormalized views of analysis results, built once by the use case and
//! consumed by the formatters.

pub mod analysis_report;

pub use analysis_report::{
    AnalysisReport, ArcView, CycleView, LevelMetrics, MissingDependencyView, NodeView,
    OffenderView, ReasonView, ReportMetadata, ScanSummary, ViewSummary,
};
