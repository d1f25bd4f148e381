use super::view_filter::ViewFilter;
use crate::dependency_analysis::domain::{DependencyGraph, ProjectTree};

/// Filters applied one after the other, each to the result of the previous.
///
/// A filter that no longer fits the snapshot it is given is dropped from
/// the stack for good.
#[derive(Default)]
pub struct ViewStack {
    filters: Vec<Box<dyn ViewFilter>>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter on top. Returns `false` if a filter with the same
    /// name is already stacked.
    pub fn push(&mut self, filter: Box<dyn ViewFilter>) -> bool {
        let name = filter.name();
        if self.filters.iter().any(|f| f.name() == name) {
            return false;
        }
        self.filters.push(filter);
        true
    }

    /// Removes the filter with the given name.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.name() != name);
        self.filters.len() != before
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn active_names(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Runs all filters in order starting from `graph`.
    pub fn apply(&mut self, tree: &ProjectTree, graph: &DependencyGraph) -> DependencyGraph {
        let mut current = graph.induced(0..graph.node_count());
        let mut kept: Vec<Box<dyn ViewFilter>> = Vec::with_capacity(self.filters.len());

        for filter in std::mem::take(&mut self.filters) {
            if !filter.is_applicable(tree, &current) {
                tracing::info!(filter = %filter.name(), "Dropping filter that no longer applies");
                continue;
            }
            match filter.apply(tree, &current) {
                Ok(filtered) => {
                    current = filtered;
                    kept.push(filter);
                }
                Err(e) => {
                    tracing::warn!(filter = %filter.name(), error = %e, "Dropping failing filter");
                }
            }
        }

        self.filters = kept;
        current
    }
}
