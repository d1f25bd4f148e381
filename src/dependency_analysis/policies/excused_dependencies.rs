use crate::dependency_analysis::domain::{DependencyGraph, NodeId, ProjectTree};

/// Units whose reference marks a test suite.
pub const TEST_SUITE_MARKERS: &[&str] = &[
    "org.junit.runner.RunWith",
    "org.junit.platform.suite.api.Suite",
];

/// Units whose reference marks a test.
pub const TEST_MARKERS: &[&str] = &["org.junit.Test", "org.junit.jupiter.api.Test"];

/// Name suffix of units that build objects from lower namespaces.
pub const FACTORY_SUFFIX: &str = "Factory";

/// Rule under which a leaf-level reference is excused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcuseRule {
    InnerToOuter,
    Factory,
    TestSuite,
}

impl ExcuseRule {
    pub const ALL: [ExcuseRule; 3] = [
        ExcuseRule::InnerToOuter,
        ExcuseRule::Factory,
        ExcuseRule::TestSuite,
    ];

    pub fn holds(self, tree: &ProjectTree, from: NodeId, to: NodeId) -> bool {
        match self {
            ExcuseRule::InnerToOuter => ExcusedDependencies::is_inner_to_outer(tree, from, to),
            ExcuseRule::Factory => {
                ExcusedDependencies::is_factory(tree, from)
                    && ExcusedDependencies::points_downwards(tree, from, to)
            }
            ExcuseRule::TestSuite => {
                ExcusedDependencies::is_test_suite(tree, from)
                    && (ExcusedDependencies::is_test_suite(tree, to)
                        || ExcusedDependencies::is_test(tree, to))
                    && ExcusedDependencies::points_downwards(tree, from, to)
            }
        }
    }
}

/// ExcusedDependencies - dependencies that close a cycle without being a design problem
///
/// A leaf-level reference is excused when
/// - an inner unit (`Outer$Inner`) refers to its outer unit in the same container,
/// - a factory refers to a unit in a namespace below its own, or
/// - a test suite refers to a test or another suite in a namespace below its own.
///
/// An arc of a snapshot is excused only if it has at least one underlying
/// leaf pair and one of these rules excuses every one of them.
pub struct ExcusedDependencies;

impl ExcusedDependencies {
    /// True if `from` is an inner unit of `to`.
    pub fn is_inner_to_outer(tree: &ProjectTree, from: NodeId, to: NodeId) -> bool {
        if !tree.is_leaf(from) || !tree.is_leaf(to) || tree.parent(from) != tree.parent(to) {
            return false;
        }
        tree.simple_name(from)
            .rsplit_once('$')
            .is_some_and(|(outer, _)| outer == tree.simple_name(to))
    }

    pub fn is_factory(tree: &ProjectTree, leaf: NodeId) -> bool {
        tree.is_leaf(leaf) && tree.display_name(leaf).ends_with(FACTORY_SUFFIX)
    }

    pub fn is_test_suite(tree: &ProjectTree, leaf: NodeId) -> bool {
        TEST_SUITE_MARKERS
            .iter()
            .any(|marker| Self::references_unit(tree, leaf, marker))
    }

    pub fn is_test(tree: &ProjectTree, leaf: NodeId) -> bool {
        TEST_MARKERS
            .iter()
            .any(|marker| Self::references_unit(tree, leaf, marker))
    }

    /// True if the leaf refers to the named unit, whether that unit is part
    /// of the tree or only known as a missing dependency.
    pub fn references_unit(tree: &ProjectTree, leaf: NodeId, unit_name: &str) -> bool {
        tree.leaf_successors(leaf)
            .iter()
            .any(|successor| tree.display_name(*successor) == unit_name)
            || tree.missing_dependencies(leaf).any(|missing| missing == unit_name)
    }

    /// True if `to` lives in a namespace strictly below the one holding `from`.
    fn points_downwards(tree: &ProjectTree, from: NodeId, to: NodeId) -> bool {
        match (tree.parent(from), tree.parent(to)) {
            (Some(from_parent), Some(to_parent)) => tree.is_ancestor(from_parent, to_parent),
            _ => false,
        }
    }

    pub fn is_excused_pair(tree: &ProjectTree, from: NodeId, to: NodeId) -> bool {
        ExcuseRule::ALL.iter().any(|rule| rule.holds(tree, from, to))
    }

    /// Rule excusing every leaf pair behind the shown edge `from -> to`,
    /// if there is one.
    pub fn excusing_rule(tree: &ProjectTree, from: NodeId, to: NodeId) -> Option<ExcuseRule> {
        let reasons = tree.dependency_reason(from, to);
        if reasons.is_empty() {
            return None;
        }
        ExcuseRule::ALL.into_iter().find(|rule| {
            reasons
                .iter()
                .all(|(source, target)| rule.holds(tree, *source, *target))
        })
    }

    pub fn is_excused_arc(tree: &ProjectTree, from: NodeId, to: NodeId) -> bool {
        Self::excusing_rule(tree, from, to).is_some()
    }

    /// Removes all excused arcs from `graph` and returns how many went.
    pub fn remove_excused_arcs(tree: &ProjectTree, graph: &mut DependencyGraph) -> usize {
        let excused: Vec<(usize, usize)> = graph
            .arcs()
            .into_iter()
            .filter(|(from, to)| {
                Self::is_excused_arc(tree, graph.node(*from).node(), graph.node(*to).node())
            })
            .collect();
        for (from, to) in &excused {
            graph.remove_arc(*from, *to);
        }
        excused.len()
    }
}
