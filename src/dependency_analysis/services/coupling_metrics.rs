use super::graph_operations::{Direction, GraphOperations};
use crate::dependency_analysis::domain::DependencyGraph;

/// Upper bound for the number of worst offenders reported.
pub const MAX_WORST_OFFENDERS: usize = 5;

/// CouplingMetrics - transitive coupling figures of one snapshot
///
/// `depends_on[i]` counts the nodes reachable from node `i`, `used_by[i]`
/// the nodes that reach it; both include the node itself. The cumulative
/// dependency (CCD) is the sum of all `depends_on` values, the average (ACD)
/// divides it by the node count and the relative one (RCD) compares it with
/// a balanced binary dependency tree of the same size.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingMetrics {
    depends_on: Vec<usize>,
    used_by: Vec<usize>,
}

impl CouplingMetrics {
    pub fn compute(graph: &DependencyGraph) -> Self {
        let reach = |direction: Direction| -> Vec<usize> {
            (0..graph.node_count())
                .map(|index| GraphOperations::breadth_first_search(graph, index, direction).len())
                .collect()
        };
        Self {
            depends_on: reach(Direction::Forward),
            used_by: reach(Direction::Backward),
        }
    }

    pub fn depends_on(&self) -> &[usize] {
        &self.depends_on
    }

    pub fn used_by(&self) -> &[usize] {
        &self.used_by
    }

    pub fn node_count(&self) -> usize {
        self.depends_on.len()
    }

    pub fn cumulative_dependency(&self) -> usize {
        self.depends_on.iter().sum()
    }

    pub fn average_dependency(&self) -> f64 {
        match self.node_count() {
            0 => 0.0,
            n => self.cumulative_dependency() as f64 / n as f64,
        }
    }

    pub fn relative_dependency(&self) -> f64 {
        match balanced_tree_ccd(self.node_count()) {
            0 => 0.0,
            baseline => self.cumulative_dependency() as f64 / baseline as f64,
        }
    }

    /// Indices of the most coupled nodes by `depends_on + used_by`, highest
    /// first. At most a fifth of the nodes are listed, never fewer than one
    /// and never more than [`MAX_WORST_OFFENDERS`].
    pub fn worst_offenders(&self) -> Vec<usize> {
        let n = self.node_count();
        let count = (n / 5).clamp(1, MAX_WORST_OFFENDERS).min(n);
        let mut ranked: Vec<usize> = (0..n).collect();
        ranked.sort_by(|a, b| self.coupling(*b).cmp(&self.coupling(*a)));
        ranked.truncate(count);
        ranked
    }

    /// `depends_on + used_by` of one node.
    pub fn coupling(&self, index: usize) -> usize {
        self.depends_on[index] + self.used_by[index]
    }
}

/// Cumulative dependency of a balanced binary tree with `n` nodes:
/// the root depends on all `n` nodes, the two subtrees split the rest.
pub fn balanced_tree_ccd(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let rest = n - 1;
    n + balanced_tree_ccd(rest - rest / 2) + balanced_tree_ccd(rest / 2)
}
