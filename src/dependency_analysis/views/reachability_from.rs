use super::view_filter::ViewFilter;
use crate::dependency_analysis::domain::{DependencyGraph, ProjectTree};
use crate::dependency_analysis::services::{Direction, GraphOperations};
use crate::shared::error::DepsError;

/// Everything a node requires (forward) or everything depending on it (backward).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityFrom {
    node_name: String,
    direction: Direction,
}

impl ReachabilityFrom {
    /// # Arguments
    /// * `node_name` - Full name of the start node as shown in the snapshot
    /// * `direction` - Which arcs to follow
    pub fn new(node_name: impl Into<String>, direction: Direction) -> Self {
        Self {
            node_name: node_name.into(),
            direction,
        }
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl ViewFilter for ReachabilityFrom {
    fn apply(
        &self,
        tree: &ProjectTree,
        graph: &DependencyGraph,
    ) -> Result<DependencyGraph, DepsError> {
        let start = graph
            .find(tree, &self.node_name)
            .ok_or_else(|| DepsError::Lookup {
                name: self.node_name.clone(),
            })?;
        let reached = GraphOperations::breadth_first_search(graph, start, self.direction);
        Ok(graph.induced(reached))
    }

    fn is_applicable(&self, tree: &ProjectTree, graph: &DependencyGraph) -> bool {
        graph.find(tree, &self.node_name).is_some()
    }

    fn name(&self) -> String {
        match self.direction {
            Direction::Forward => format!("required by {}", self.node_name),
            Direction::Backward => format!("depending on {}", self.node_name),
        }
    }
}
