use super::view_filter::ViewFilter;
use crate::dependency_analysis::domain::{DependencyGraph, ProjectTree};
use crate::dependency_analysis::policies::ExcusedDependencies;
use crate::dependency_analysis::services::CycleFinder;
use crate::shared::error::DepsError;

/// Keeps only the nodes and arcs that take part in a cycle.
///
/// Arcs whose every underlying reference is excused do not count, so after
/// dropping them the components are computed a second time.
#[derive(Debug, Clone, Copy, Default)]
pub struct CyclesOnly;

impl CyclesOnly {
    pub fn new() -> Self {
        Self
    }
}

impl ViewFilter for CyclesOnly {
    fn apply(
        &self,
        tree: &ProjectTree,
        graph: &DependencyGraph,
    ) -> Result<DependencyGraph, DepsError> {
        let mut cycles = CycleFinder::new(graph).graph_from_cycles();
        let excused = ExcusedDependencies::remove_excused_arcs(tree, &mut cycles);
        tracing::debug!(excused, "Removed excused arcs from cycle graph");
        Ok(CycleFinder::new(&cycles).graph_from_cycles())
    }

    fn is_applicable(&self, _tree: &ProjectTree, _graph: &DependencyGraph) -> bool {
        true
    }

    fn name(&self) -> String {
        "cycles only".to_string()
    }
}
