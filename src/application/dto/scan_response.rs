use crate::dependency_analysis::domain::ProjectTree;
use serde::Serialize;
use std::path::PathBuf;

/// A unit that could not be taken into the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedUnit {
    pub origin: PathBuf,
    pub reason: String,
}

/// Counters collected while scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStatistics {
    /// Units handed over by the sources, after source filtering
    pub units_found: usize,
    /// Units parsed and placed in the tree
    pub units_parsed: usize,
    /// Units appearing in more than one input; the first one wins
    pub duplicate_units: usize,
    /// Leaf-to-leaf links created
    pub links: usize,
    /// References that did not resolve to any unit
    pub missing_references: usize,
}

/// ScanResponse - the project tree plus what happened while building it
#[derive(Debug)]
pub struct ScanResponse {
    pub tree: ProjectTree,
    pub statistics: ScanStatistics,
    pub skipped_units: Vec<SkippedUnit>,
    /// Inputs no source could read, such as archives
    pub skipped_inputs: Vec<PathBuf>,
    /// Display names of the scanned inputs
    pub inputs: Vec<String>,
}
