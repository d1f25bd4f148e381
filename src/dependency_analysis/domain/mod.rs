pub mod dependency_graph;
pub mod parsed_unit;
pub mod project_tree;

pub use dependency_graph::{DependencyGraph, IndexedNode};
pub use parsed_unit::ParsedUnit;
pub use project_tree::{ListMode, NodeId, NodeKind, ProjectTree, SEPARATOR};
