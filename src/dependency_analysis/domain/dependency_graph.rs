use super::project_tree::{NodeId, ProjectTree};
use indexmap::IndexSet;
use std::collections::HashMap;

/// One node of a [`DependencyGraph`] snapshot.
#[derive(Debug, Clone)]
pub struct IndexedNode {
    node: NodeId,
    index: usize,
    unit_count: usize,
    successors: IndexSet<NodeId>,
    predecessors: IndexSet<NodeId>,
}

impl IndexedNode {
    fn new(node: NodeId, index: usize, unit_count: usize) -> Self {
        Self {
            node,
            index,
            unit_count,
            successors: IndexSet::new(),
            predecessors: IndexSet::new(),
        }
    }

    /// The tree node this entry stands for.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of compiled units the node represents.
    pub fn unit_count(&self) -> usize {
        self.unit_count
    }

    pub fn successor_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.successors.iter().copied()
    }

    pub fn predecessor_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.predecessors.iter().copied()
    }
}

/// Densely indexed snapshot of the visible nodes of a [`ProjectTree`].
///
/// Graph algorithms work on the indices `0..node_count()`. Removing a node
/// leaves the indices sparse until [`DependencyGraph::renumber`] is called;
/// index-based queries are only valid on a numbered graph.
///
/// Arcs are stored by tree node, so a snapshot survives renumbering and
/// filtering without rewriting adjacency.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<IndexedNode>,
    positions: HashMap<NodeId, usize>,
    generation: u64,
    numbered: bool,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            positions: HashMap::new(),
            generation: 0,
            numbered: true,
        }
    }

    /// Snapshot of every visible node that stands for at least one unit,
    /// with the arcs the current list modes produce between them.
    pub fn from_tree(tree: &ProjectTree) -> Self {
        let visible = tree
            .walk_visible(tree.root())
            .into_iter()
            .filter(|node| tree.has_own_content(*node));
        Self::from_nodes(tree, visible)
    }

    /// Snapshot of the given nodes, keeping only arcs between them.
    /// Repeated nodes are taken once.
    pub fn from_nodes(tree: &ProjectTree, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut graph = Self::new();
        graph.generation = tree.generation();
        for node in nodes {
            graph.push_node(node, tree.unit_count(node));
        }
        for index in 0..graph.nodes.len() {
            let node = graph.nodes[index].node;
            for successor in tree.successors(node) {
                if let Some(&to) = graph.positions.get(&successor) {
                    graph.add_arc(index, to);
                }
            }
        }
        graph
    }

    /// Copy holding only the nodes at `indices`, in that order, and the arcs among them.
    pub fn induced(&self, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut graph = Self::new();
        graph.generation = self.generation;
        for index in indices {
            let source = &self.nodes[index];
            graph.push_node(source.node, source.unit_count);
        }
        graph.copy_arcs_from(self);
        graph
    }

    /// Joins several snapshots. Nodes appearing in more than one of them
    /// are taken once and keep the arcs of all.
    pub fn union(graphs: &[&DependencyGraph]) -> Self {
        let mut graph = Self::new();
        graph.generation = graphs.iter().map(|g| g.generation).max().unwrap_or(0);
        for source in graphs {
            for entry in &source.nodes {
                graph.push_node(entry.node, entry.unit_count);
            }
        }
        for source in graphs {
            graph.copy_arcs_from(source);
        }
        graph
    }

    fn push_node(&mut self, node: NodeId, unit_count: usize) {
        if self.positions.contains_key(&node) {
            return;
        }
        let index = self.nodes.len();
        self.positions.insert(node, index);
        self.nodes.push(IndexedNode::new(node, index, unit_count));
    }

    fn copy_arcs_from(&mut self, source: &DependencyGraph) {
        for entry in &source.nodes {
            let Some(&from) = self.positions.get(&entry.node) else {
                continue;
            };
            for successor in &entry.successors {
                if let Some(&to) = self.positions.get(successor) {
                    self.add_arc(from, to);
                }
            }
        }
    }

    pub fn nodes(&self) -> &[IndexedNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &IndexedNode {
        &self.nodes[index]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn arc_count(&self) -> usize {
        self.nodes.iter().map(|n| n.successors.len()).sum()
    }

    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        debug_assert!(self.numbered, "index lookup on a graph that needs renumbering");
        self.positions.get(&node).copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.positions.contains_key(&node)
    }

    /// Index of the node with the given full name, if it is part of this snapshot.
    pub fn find(&self, tree: &ProjectTree, full_name: &str) -> Option<usize> {
        tree.find_by_name(full_name)
            .and_then(|node| self.index_of(node))
    }

    /// Successor indices of the node at `index`, in insertion order.
    pub fn successors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        debug_assert!(self.numbered, "index query on a graph that needs renumbering");
        self.nodes[index]
            .successors
            .iter()
            .filter_map(|node| self.positions.get(node).copied())
    }

    /// Predecessor indices of the node at `index`, in insertion order.
    pub fn predecessors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        debug_assert!(self.numbered, "index query on a graph that needs renumbering");
        self.nodes[index]
            .predecessors
            .iter()
            .filter_map(|node| self.positions.get(node).copied())
    }

    pub fn has_arc(&self, from: usize, to: usize) -> bool {
        self.nodes[from].successors.contains(&self.nodes[to].node)
    }

    /// Every arc as an index pair, grouped by start node.
    pub fn arcs(&self) -> Vec<(usize, usize)> {
        (0..self.nodes.len())
            .flat_map(|from| self.successors(from).map(move |to| (from, to)))
            .collect()
    }

    /// Adds the arc `from -> to`. Returns `false` if it already existed.
    pub fn add_arc(&mut self, from: usize, to: usize) -> bool {
        let (from_node, to_node) = (self.nodes[from].node, self.nodes[to].node);
        if !self.nodes[from].successors.insert(to_node) {
            return false;
        }
        self.nodes[to].predecessors.insert(from_node);
        true
    }

    /// Removes the arc `from -> to`. Returns `false` if there was none.
    pub fn remove_arc(&mut self, from: usize, to: usize) -> bool {
        let (from_node, to_node) = (self.nodes[from].node, self.nodes[to].node);
        if !self.nodes[from].successors.shift_remove(&to_node) {
            return false;
        }
        self.nodes[to].predecessors.shift_remove(&from_node);
        true
    }

    /// Drops the node at `index` together with its arcs.
    ///
    /// Indices of later nodes are stale until [`DependencyGraph::renumber`] runs.
    pub fn remove_node(&mut self, index: usize) -> NodeId {
        let removed = self.nodes.remove(index);
        self.positions.remove(&removed.node);
        for entry in &mut self.nodes {
            entry.successors.shift_remove(&removed.node);
            entry.predecessors.shift_remove(&removed.node);
        }
        self.numbered = false;
        removed.node
    }

    /// Makes indices dense again after removals.
    pub fn renumber(&mut self) {
        self.positions.clear();
        for (index, entry) in self.nodes.iter_mut().enumerate() {
            entry.index = index;
            self.positions.insert(entry.node, index);
        }
        self.numbered = true;
    }

    pub fn is_numbered(&self) -> bool {
        self.numbered
    }

    /// Tree generation this snapshot was taken at.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once the tree has changed since the snapshot was taken.
    pub fn is_stale(&self, tree: &ProjectTree) -> bool {
        self.generation != tree.generation()
    }
}
