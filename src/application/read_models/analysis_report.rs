//! Analysis report read model
//!
//! Flat, serializable copy of everything a formatter shows. Nothing in it
//! refers back to the tree, so formatters need no access to the domain.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub scan: ScanSummary,
    pub view: ViewSummary,
    /// Cycles of the shown view, largest first
    pub cycles: Vec<CycleView>,
    /// Coupling figures for every granularity
    pub metrics: Vec<LevelMetrics>,
    pub missing_dependencies: Vec<MissingDependencyView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMetadata {
    pub tool_name: String,
    pub tool_version: String,
    /// RFC 3339 creation time
    pub timestamp: String,
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub units_parsed: usize,
    pub units_skipped: usize,
    pub duplicate_units: usize,
    pub links: usize,
    pub missing_references: usize,
    pub skipped_inputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSummary {
    /// Granularity, e.g. "packages"
    pub level: String,
    /// Names of the filters that were applied
    pub filters: Vec<String>,
    pub nodes: Vec<NodeView>,
    pub arc_count: usize,
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub name: String,
    pub units: usize,
    pub successors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleView {
    pub nodes: Vec<String>,
    pub arcs: Vec<ArcView>,
}

/// One arc of a cycle and the unit references causing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArcView {
    pub from: String,
    pub to: String,
    pub reasons: Vec<ReasonView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonView {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelMetrics {
    pub level: String,
    pub node_count: usize,
    pub arc_count: usize,
    pub density: f64,
    pub cumulative_dependency: usize,
    pub average_dependency: f64,
    pub relative_dependency: f64,
    pub worst_offenders: Vec<OffenderView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffenderView {
    pub name: String,
    pub depends_on: usize,
    pub used_by: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDependencyView {
    pub unit: String,
    pub missing: Vec<String>,
}
