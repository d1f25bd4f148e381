use crate::dependency_analysis::domain::{DependencyGraph, ProjectTree};
use crate::shared::error::DepsError;

/// ViewFilter - narrows a snapshot down to the part worth looking at
///
/// Filters never touch the tree. They read the snapshot they get and return
/// a new one, so several of them can be chained by feeding one result into
/// the next filter.
pub trait ViewFilter {
    /// Derives the filtered snapshot.
    ///
    /// # Errors
    /// Returns `DepsError::Lookup` if the filter refers to a node the
    /// snapshot does not show.
    fn apply(&self, tree: &ProjectTree, graph: &DependencyGraph)
        -> Result<DependencyGraph, DepsError>;

    /// False once the filter refers to something the snapshot no longer shows.
    fn is_applicable(&self, tree: &ProjectTree, graph: &DependencyGraph) -> bool;

    /// Human readable label, also used to tell filters apart.
    fn name(&self) -> String;
}
