//! Small graphs shared by the unit tests of this module.

use crate::dependency_analysis::domain::{DependencyGraph, NodeId, ProjectTree};

/// Builds a flat tree with one leaf per name directly below the root and
/// the given links between them, then snapshots it.
pub(crate) fn letter_graph(names: &[&str], edges: &[(&str, &str)]) -> (ProjectTree, DependencyGraph) {
    let mut tree = ProjectTree::new();
    let root = tree.root();
    for name in names {
        tree.create_leaf(root, name).unwrap();
    }
    for (from, to) in edges {
        let from = tree.find_by_name(from).unwrap();
        let to = tree.find_by_name(to).unwrap();
        tree.add_successor(from, to).unwrap();
    }
    let graph = DependencyGraph::from_tree(&tree);
    (tree, graph)
}

/// Full names of the given snapshot indices.
pub(crate) fn names_of(
    tree: &ProjectTree,
    graph: &DependencyGraph,
    indices: impl IntoIterator<Item = usize>,
) -> Vec<String> {
    indices
        .into_iter()
        .map(|index| tree.full_name(graph.node(index).node()))
        .collect()
}

/// Node with the given full name; panics if absent.
pub(crate) fn node(tree: &ProjectTree, name: &str) -> NodeId {
    tree.find_by_name(name)
        .unwrap_or_else(|| panic!("no node named {}", name))
}
