use crate::dependency_analysis::domain::DependencyGraph;

const UNVISITED: usize = 0;

struct Frame {
    node: usize,
    next_successor: usize,
}

/// Strongly connected components of a snapshot (Tarjan).
///
/// The depth-first search keeps its own frame stack, so deep dependency
/// chains do not grow the call stack. Components are listed in the order
/// Tarjan completes them.
#[derive(Debug)]
pub struct CycleFinder<'a> {
    graph: &'a DependencyGraph,
    components: Vec<Vec<usize>>,
    component_of: Vec<usize>,
}

impl<'a> CycleFinder<'a> {
    pub fn new(graph: &'a DependencyGraph) -> Self {
        let node_count = graph.node_count();
        let adjacency: Vec<Vec<usize>> = (0..node_count)
            .map(|index| graph.successors(index).collect())
            .collect();

        // discovery numbers start at 1 so that 0 marks unvisited nodes
        let mut discovered = vec![UNVISITED; node_count];
        let mut low_link = vec![UNVISITED; node_count];
        let mut on_stack = vec![false; node_count];
        let mut stack: Vec<usize> = Vec::new();
        let mut counter = 0;
        let mut components = Vec::new();

        for start in 0..node_count {
            if discovered[start] != UNVISITED {
                continue;
            }
            counter += 1;
            discovered[start] = counter;
            low_link[start] = counter;
            stack.push(start);
            on_stack[start] = true;
            let mut frames = vec![Frame {
                node: start,
                next_successor: 0,
            }];

            while let Some(frame) = frames.last_mut() {
                let node = frame.node;
                if let Some(&successor) = adjacency[node].get(frame.next_successor) {
                    frame.next_successor += 1;
                    if discovered[successor] == UNVISITED {
                        counter += 1;
                        discovered[successor] = counter;
                        low_link[successor] = counter;
                        stack.push(successor);
                        on_stack[successor] = true;
                        frames.push(Frame {
                            node: successor,
                            next_successor: 0,
                        });
                    } else if on_stack[successor] {
                        low_link[node] = low_link[node].min(discovered[successor]);
                    }
                    continue;
                }

                frames.pop();
                if let Some(parent) = frames.last() {
                    low_link[parent.node] = low_link[parent.node].min(low_link[node]);
                }
                if low_link[node] == discovered[node] {
                    let mut component = Vec::new();
                    while let Some(member) = stack.pop() {
                        on_stack[member] = false;
                        component.push(member);
                        if member == node {
                            break;
                        }
                    }
                    components.push(component);
                }
            }
        }

        let mut component_of = vec![0; node_count];
        for (id, component) in components.iter().enumerate() {
            for member in component {
                component_of[*member] = id;
            }
        }

        Self {
            graph,
            components,
            component_of,
        }
    }

    /// All components, trivial ones included, as lists of snapshot indices.
    pub fn components(&self) -> &[Vec<usize>] {
        &self.components
    }

    /// Position of the component holding `index` in [`CycleFinder::components`].
    pub fn component_of(&self, index: usize) -> usize {
        self.component_of[index]
    }

    /// A component is non-trivial if it has more than one member or its
    /// single member depends on itself.
    pub fn is_cycle(&self, component: &[usize]) -> bool {
        match component {
            [single] => self.graph.has_arc(*single, *single),
            members => members.len() > 1,
        }
    }

    /// Non-trivial components, largest first; equal sizes keep discovery order.
    pub fn cycles(&self) -> Vec<&[usize]> {
        let mut cycles: Vec<&[usize]> = self
            .components
            .iter()
            .filter(|c| self.is_cycle(c))
            .map(Vec::as_slice)
            .collect();
        cycles.sort_by(|a, b| b.len().cmp(&a.len()));
        cycles
    }

    pub fn has_cycles(&self) -> bool {
        self.components.iter().any(|c| self.is_cycle(c))
    }

    /// Subgraph made of the non-trivial components, keeping only arcs that
    /// stay inside one component.
    pub fn graph_from_cycles(&self) -> DependencyGraph {
        let members: Vec<usize> = self
            .components
            .iter()
            .filter(|c| self.is_cycle(c))
            .flatten()
            .copied()
            .collect();
        let component_by_new_index: Vec<usize> =
            members.iter().map(|index| self.component_of[*index]).collect();

        let mut cycles = self.graph.induced(members);
        for (from, to) in cycles.arcs() {
            if component_by_new_index[from] != component_by_new_index[to] {
                cycles.remove_arc(from, to);
            }
        }
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_analysis::test_fixtures::{letter_graph, names_of};

    #[test]
    fn test_largest_component() {
        let (tree, graph) = letter_graph(
            &["a", "b", "c", "d", "e", "f"],
            &[
                ("a", "d"),
                ("a", "f"),
                ("b", "a"),
                ("c", "d"),
                ("d", "e"),
                ("e", "a"),
                ("f", "e"),
            ],
        );
        let finder = CycleFinder::new(&graph);
        let cycles = finder.cycles();
        assert_eq!(cycles.len(), 1);
        let mut largest = names_of(&tree, &graph, cycles[0].iter().copied());
        largest.sort();
        assert_eq!(largest, vec!["a", "d", "e", "f"]);
        assert_eq!(finder.components().len(), 3);
        assert!(finder.has_cycles());

        let cycles = finder.graph_from_cycles();
        let mut members = names_of(&tree, &cycles, 0..cycles.node_count());
        members.sort();
        assert_eq!(members, vec!["a", "d", "e", "f"]);
        assert_eq!(cycles.arc_count(), 5);
        let index = |name: &str| cycles.find(&tree, name).unwrap();
        for (from, to) in [("a", "d"), ("a", "f"), ("d", "e"), ("e", "a"), ("f", "e")] {
            assert!(cycles.has_arc(index(from), index(to)), "missing {} -> {}", from, to);
        }
    }

    #[test]
    fn test_components_in_completion_order() {
        let (tree, graph) = letter_graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let finder = CycleFinder::new(&graph);
        let order: Vec<Vec<String>> = finder
            .components()
            .iter()
            .map(|c| names_of(&tree, &graph, c.iter().copied()))
            .collect();
        assert_eq!(order, vec![vec!["c"], vec!["b"], vec!["a"]]);
        assert!(!finder.has_cycles());
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let (_, graph) = letter_graph(&["a", "b"], &[("a", "a"), ("a", "b")]);
        let finder = CycleFinder::new(&graph);
        assert_eq!(finder.cycles(), vec![&[0usize][..]]);
    }

    #[test]
    fn test_graph_from_cycles_drops_arcs_between_components() {
        let (tree, graph) = letter_graph(
            &["a", "b", "c", "d", "x"],
            &[
                ("a", "b"),
                ("b", "a"),
                ("b", "c"),
                ("c", "d"),
                ("d", "c"),
                ("d", "x"),
            ],
        );
        let cycles = CycleFinder::new(&graph).graph_from_cycles();
        let mut members = names_of(&tree, &cycles, 0..cycles.node_count());
        members.sort();
        assert_eq!(members, vec!["a", "b", "c", "d"]);
        assert_eq!(cycles.arc_count(), 4);
        let b = cycles.find(&tree, "b").unwrap();
        let c = cycles.find(&tree, "c").unwrap();
        assert!(!cycles.has_arc(b, c));
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let names: Vec<String> = (0..20_000).map(|i| format!("n{}", i)).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut edges: Vec<(&str, &str)> = name_refs.windows(2).map(|w| (w[0], w[1])).collect();
        edges.push((name_refs[name_refs.len() - 1], name_refs[0]));
        let (_, graph) = letter_graph(&name_refs, &edges);
        let finder = CycleFinder::new(&graph);
        assert_eq!(finder.cycles()[0].len(), 20_000);
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::new();
        let finder = CycleFinder::new(&graph);
        assert!(finder.components().is_empty());
        assert!(finder.graph_from_cycles().is_empty());
    }
}
