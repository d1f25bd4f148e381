use crate::shared::error::DepsError;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Separates path segments in node names.
pub const SEPARATOR: char = '.';

/// Handle to a node inside one [`ProjectTree`].
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a container presents its content in graph views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMode {
    /// Every child is shown on its own.
    #[default]
    Expanded,
    /// Direct leaf children merge into this container; nested containers stay separate.
    LeafsCollapsed,
    /// The whole subtree is represented by this container.
    Collapsed,
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListMode::Expanded => write!(f, "expanded"),
            ListMode::LeafsCollapsed => write!(f, "leafs collapsed"),
            ListMode::Collapsed => write!(f, "collapsed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Container,
    Leaf,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Container => write!(f, "container"),
            NodeKind::Leaf => write!(f, "leaf"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Outgoing,
    Incoming,
}

#[derive(Debug, Clone)]
enum Content {
    Container {
        children: IndexMap<String, NodeId>,
    },
    Leaf {
        successors: Vec<NodeId>,
        predecessors: Vec<NodeId>,
        missing_dependencies: BTreeSet<String>,
    },
}

#[derive(Debug, Clone)]
struct NodeData {
    simple_name: String,
    parent: Option<NodeId>,
    list_mode: ListMode,
    content: Content,
}

impl NodeData {
    fn new(simple_name: &str, parent: Option<NodeId>, kind: NodeKind) -> Self {
        let content = match kind {
            NodeKind::Container => Content::Container {
                children: IndexMap::new(),
            },
            NodeKind::Leaf => Content::Leaf {
                successors: Vec::new(),
                predecessors: Vec::new(),
                missing_dependencies: BTreeSet::new(),
            },
        };
        Self {
            simple_name: simple_name.to_string(),
            parent,
            list_mode: ListMode::default(),
            content,
        }
    }
}

/// Containment tree of sources, namespaces and compiled units.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. Containers
/// own their children; leaves carry the raw unit-to-unit dependency links.
/// Everything shown in a graph view (aggregated successors, visible subtree)
/// is computed on demand from the raw links and the current list modes, so
/// there is no cache to invalidate. [`ProjectTree::generation`] changes on
/// every effective mutation and lets snapshots detect that they are stale.
#[derive(Debug, Clone)]
pub struct ProjectTree {
    nodes: Vec<NodeData>,
    generation: u64,
}

impl Default for ProjectTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectTree {
    /// Creates a tree holding only the unnamed root container.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new("", None, NodeKind::Container)],
            generation: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing but the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        match self.data(id).content {
            Content::Container { .. } => NodeKind::Container,
            Content::Leaf { .. } => NodeKind::Leaf,
        }
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::Leaf
    }

    pub fn simple_name(&self, id: NodeId) -> &str {
        &self.data(id).simple_name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    /// All direct children regardless of list mode, in creation order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let children = match &self.data(id).content {
            Content::Container { children } => Some(children.values().copied()),
            Content::Leaf { .. } => None,
        };
        children.into_iter().flatten()
    }

    pub fn child(&self, id: NodeId, simple_name: &str) -> Option<NodeId> {
        match &self.data(id).content {
            Content::Container { children } => children.get(simple_name).copied(),
            Content::Leaf { .. } => None,
        }
    }

    /// Proper ancestors, nearest first, ending with the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// True if `ancestor` lies strictly above `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Fully qualified name: the parent's name, a separator, then the simple name.
    /// The root's name is empty and children of the root carry only their simple name.
    pub fn full_name(&self, id: NodeId) -> String {
        let mut segments: Vec<&str> = vec![self.simple_name(id)];
        segments.extend(
            self.ancestors(id)
                .filter(|ancestor| *ancestor != self.root())
                .map(|ancestor| self.simple_name(ancestor)),
        );
        let mut name = String::new();
        for segment in segments.iter().rev() {
            if !name.is_empty() {
                name.push(SEPARATOR);
            }
            name.push_str(segment);
        }
        name
    }

    /// Full name without the leading `kind:source` segment.
    ///
    /// For a leaf this is the dotted name of the compiled unit.
    pub fn display_name(&self, id: NodeId) -> String {
        let name = self.full_name(id);
        let stripped = match name.split_once(SEPARATOR) {
            Some((source, rest)) if source.contains(':') => Some(rest.to_string()),
            _ => None,
        };
        stripped.unwrap_or(name)
    }

    /// Name of `id` as seen from `ancestor`. Returns the simple name when
    /// `ancestor` is the node itself or its parent, `None` when it is not
    /// an ancestor at all.
    pub fn relative_name(&self, id: NodeId, ancestor: NodeId) -> Option<String> {
        if ancestor == id || self.parent(id) == Some(ancestor) {
            return Some(self.simple_name(id).to_string());
        }
        let parent = self.parent(id)?;
        let prefix = self.relative_name(parent, ancestor)?;
        Some(format!("{}{}{}", prefix, SEPARATOR, self.simple_name(id)))
    }

    pub fn list_mode(&self, id: NodeId) -> ListMode {
        self.data(id).list_mode
    }

    /// Changes how a node is presented. Returns `false` and leaves the tree
    /// untouched when the node already has that mode.
    pub fn set_list_mode(&mut self, id: NodeId, mode: ListMode) -> bool {
        let node = &mut self.nodes[id.0];
        if node.list_mode == mode {
            return false;
        }
        node.list_mode = mode;
        self.generation += 1;
        true
    }

    /// Creates (or reuses) the container at `path` below `parent`,
    /// creating missing intermediate containers on the way.
    ///
    /// # Errors
    /// Returns `DepsError::Structural` if the path is empty or passes through a leaf,
    /// or if the final slot already holds a leaf.
    pub fn create_container(&mut self, parent: NodeId, path: &str) -> Result<NodeId, DepsError> {
        self.create_node(parent, path, path, NodeKind::Container)
    }

    /// Creates (or reuses) the leaf at `path` below `parent`.
    ///
    /// # Errors
    /// Returns `DepsError::Structural` if the path is empty or passes through a leaf,
    /// or if the final slot already holds a container.
    pub fn create_leaf(&mut self, parent: NodeId, path: &str) -> Result<NodeId, DepsError> {
        self.create_node(parent, path, path, NodeKind::Leaf)
    }

    fn create_node(
        &mut self,
        parent: NodeId,
        path: &str,
        full_path: &str,
        kind: NodeKind,
    ) -> Result<NodeId, DepsError> {
        if path.is_empty() {
            return Err(DepsError::Structural {
                path: full_path.to_string(),
                reason: "empty name segment".to_string(),
            });
        }
        match path.find(SEPARATOR) {
            Some(pos) if pos > 0 => {
                let next =
                    self.child_or_insert(parent, &path[..pos], full_path, NodeKind::Container)?;
                self.create_node(next, &path[pos + 1..], full_path, kind)
            }
            _ => self.child_or_insert(parent, path, full_path, kind),
        }
    }

    fn child_or_insert(
        &mut self,
        parent: NodeId,
        simple_name: &str,
        full_path: &str,
        kind: NodeKind,
    ) -> Result<NodeId, DepsError> {
        let existing = match &self.data(parent).content {
            Content::Container { children } => children.get(simple_name).copied(),
            Content::Leaf { .. } => {
                return Err(DepsError::Structural {
                    path: full_path.to_string(),
                    reason: format!("'{}' is a leaf and cannot hold children", self.full_name(parent)),
                })
            }
        };

        if let Some(existing) = existing {
            let found = self.kind(existing);
            if found == kind {
                return Ok(existing);
            }
            return Err(DepsError::Structural {
                path: full_path.to_string(),
                reason: format!("'{}' already exists as a {}", self.full_name(existing), found),
            });
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(simple_name, Some(parent), kind));
        if let Content::Container { children } = &mut self.nodes[parent.0].content {
            children.insert(simple_name.to_string(), id);
        }
        self.generation += 1;
        Ok(id)
    }

    /// Looks a node up by its path relative to `from`, descending into
    /// collapsed containers as well.
    pub fn find(&self, from: NodeId, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            return None;
        }
        path.split(SEPARATOR)
            .try_fold(from, |current, segment| self.child(current, segment))
    }

    /// Looks a node up by its full name.
    pub fn find_by_name(&self, full_name: &str) -> Option<NodeId> {
        self.find(self.root(), full_name)
    }

    /// Records that leaf `from` depends on leaf `to`. The reverse link is
    /// recorded on `to` at the same time; repeated calls change nothing.
    ///
    /// # Errors
    /// Returns `DepsError::Structural` if either end is a container.
    pub fn add_successor(&mut self, from: NodeId, to: NodeId) -> Result<(), DepsError> {
        for end in [from, to] {
            if !self.is_leaf(end) {
                return Err(DepsError::Structural {
                    path: self.full_name(end),
                    reason: "dependency links can only join leaves".to_string(),
                });
            }
        }

        if let Content::Leaf { successors, .. } = &mut self.nodes[from.0].content {
            if successors.contains(&to) {
                return Ok(());
            }
            successors.push(to);
        }
        if let Content::Leaf { predecessors, .. } = &mut self.nodes[to.0].content {
            predecessors.push(from);
        }
        self.generation += 1;
        Ok(())
    }

    /// Remembers a referenced unit name that is not part of the tree.
    ///
    /// # Errors
    /// Returns `DepsError::Structural` if `leaf` is a container.
    pub fn add_missing_dependency(&mut self, leaf: NodeId, name: &str) -> Result<(), DepsError> {
        let full_name = self.full_name(leaf);
        match &mut self.nodes[leaf.0].content {
            Content::Leaf {
                missing_dependencies,
                ..
            } => {
                missing_dependencies.insert(name.to_string());
                Ok(())
            }
            Content::Container { .. } => Err(DepsError::Structural {
                path: full_name,
                reason: "only leaves record missing dependencies".to_string(),
            }),
        }
    }

    pub fn missing_dependencies(&self, id: NodeId) -> impl Iterator<Item = &str> + '_ {
        let names = match &self.data(id).content {
            Content::Leaf {
                missing_dependencies,
                ..
            } => Some(missing_dependencies.iter().map(String::as_str)),
            Content::Container { .. } => None,
        };
        names.into_iter().flatten()
    }

    fn raw_links(&self, id: NodeId, side: Side) -> &[NodeId] {
        match (&self.data(id).content, side) {
            (Content::Leaf { successors, .. }, Side::Outgoing) => successors,
            (Content::Leaf { predecessors, .. }, Side::Incoming) => predecessors,
            (Content::Container { .. }, _) => &[],
        }
    }

    /// Raw successor leaves of a leaf, ignoring list modes.
    pub fn leaf_successors(&self, id: NodeId) -> &[NodeId] {
        self.raw_links(id, Side::Outgoing)
    }

    /// Raw predecessor leaves of a leaf, ignoring list modes.
    pub fn leaf_predecessors(&self, id: NodeId) -> &[NodeId] {
        self.raw_links(id, Side::Incoming)
    }

    /// Leaves this node stands for in a graph view: the leaf itself, every
    /// descendant leaf of a collapsed container, the direct leaf children of a
    /// leafs-collapsed container, and nothing for an expanded container.
    pub fn contained_leaves(&self, id: NodeId) -> Vec<NodeId> {
        match &self.data(id).content {
            Content::Leaf { .. } => vec![id],
            Content::Container { children } => match self.list_mode(id) {
                ListMode::Collapsed => self.descendant_leaves(id),
                ListMode::LeafsCollapsed => children
                    .values()
                    .copied()
                    .filter(|child| self.is_leaf(*child))
                    .collect(),
                ListMode::Expanded => Vec::new(),
            },
        }
    }

    /// Every leaf below `id`, depth first in creation order.
    pub fn descendant_leaves(&self, id: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match &self.data(current).content {
                Content::Leaf { .. } => leaves.push(current),
                Content::Container { children } => stack.extend(children.values().rev()),
            }
        }
        leaves
    }

    /// True for leaves and for containers that stand for at least one leaf.
    pub fn has_own_content(&self, id: NodeId) -> bool {
        !self.contained_leaves(id).is_empty()
    }

    /// Number of compiled units shown by this node.
    pub fn unit_count(&self, id: NodeId) -> usize {
        self.contained_leaves(id).len()
    }

    /// The node that shows `id` in the current view.
    ///
    /// A leaf whose parent is leafs-collapsed is shown by that parent. Any
    /// collapsed ancestor takes over, the outermost one winning, so the result
    /// is always a node that is itself visible.
    pub fn visible_representative(&self, id: NodeId) -> NodeId {
        let mut representative = id;
        if self.is_leaf(id) {
            if let Some(parent) = self.parent(id) {
                if self.list_mode(parent) == ListMode::LeafsCollapsed {
                    representative = parent;
                }
            }
        }
        for ancestor in self.ancestors(id) {
            if self.list_mode(ancestor) == ListMode::Collapsed {
                representative = ancestor;
            }
        }
        representative
    }

    /// Successors as shown in the current view.
    pub fn successors(&self, id: NodeId) -> Vec<NodeId> {
        self.linked(id, Side::Outgoing)
    }

    /// Predecessors as shown in the current view.
    pub fn predecessors(&self, id: NodeId) -> Vec<NodeId> {
        self.linked(id, Side::Incoming)
    }

    fn linked(&self, id: NodeId, side: Side) -> Vec<NodeId> {
        let Content::Container { children } = &self.data(id).content else {
            let mut targets = IndexSet::new();
            for target in self.raw_links(id, side) {
                targets.insert(self.visible_representative(*target));
            }
            return targets.into_iter().collect();
        };

        let mut raw = IndexSet::new();
        if self.list_mode(id) == ListMode::Expanded {
            for child in children.values() {
                raw.extend(self.linked(*child, side));
            }
        } else {
            for leaf in self.contained_leaves(id) {
                raw.extend(self.raw_links(leaf, side).iter().copied());
            }
        }

        let mut targets = IndexSet::new();
        for target in raw {
            let shown = self.visible_representative(target);
            if shown != id {
                targets.insert(shown);
            }
        }
        targets.into_iter().collect()
    }

    fn reason_leaves(&self, id: NodeId) -> Vec<NodeId> {
        if !self.is_leaf(id) && self.list_mode(id) == ListMode::Expanded {
            self.descendant_leaves(id)
        } else {
            self.contained_leaves(id)
        }
    }

    /// Leaf pairs that make up the shown edge from `from` to `to`.
    pub fn dependency_reason(&self, from: NodeId, to: NodeId) -> Vec<(NodeId, NodeId)> {
        let targets: IndexSet<NodeId> = self.reason_leaves(to).into_iter().collect();
        let mut pairs = Vec::new();
        for leaf in self.reason_leaves(from) {
            for target in self.leaf_successors(leaf) {
                if targets.contains(target) {
                    pairs.push((leaf, *target));
                }
            }
        }
        pairs
    }

    /// Like [`ProjectTree::dependency_reason`], with each leaf named relative
    /// to the node it was collected from.
    pub fn explain_dependency(&self, from: NodeId, to: NodeId) -> Vec<(String, String)> {
        self.dependency_reason(from, to)
            .into_iter()
            .map(|(source, target)| {
                (
                    self.relative_name(source, from).unwrap_or_else(|| self.full_name(source)),
                    self.relative_name(target, to).unwrap_or_else(|| self.full_name(target)),
                )
            })
            .collect()
    }

    /// Visible nodes below `id`, children before their parents.
    ///
    /// A collapsed container hides its whole subtree, a leafs-collapsed
    /// container hides only its direct leaves.
    pub fn walk_visible(&self, id: NodeId) -> Vec<NodeId> {
        let mut visited = Vec::new();
        self.collect_visible(id, &mut visited);
        visited
    }

    fn collect_visible(&self, id: NodeId, visited: &mut Vec<NodeId>) {
        let Content::Container { children } = &self.data(id).content else {
            return;
        };
        let mode = self.list_mode(id);
        if mode == ListMode::Collapsed {
            return;
        }
        for child in children.values().copied() {
            if mode == ListMode::LeafsCollapsed && self.is_leaf(child) {
                continue;
            }
            self.collect_visible(child, visited);
            visited.push(child);
        }
    }

    /// All nodes below `id` regardless of list modes, children before their parents.
    pub fn walk_all(&self, id: NodeId) -> Vec<NodeId> {
        let mut visited = Vec::new();
        self.collect_all(id, &mut visited);
        visited
    }

    fn collect_all(&self, id: NodeId, visited: &mut Vec<NodeId>) {
        for child in self.children(id) {
            self.collect_all(child, visited);
            visited.push(child);
        }
    }
}
