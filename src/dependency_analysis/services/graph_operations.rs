use crate::dependency_analysis::domain::DependencyGraph;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Which arcs a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Follow successors: everything the start node requires.
    #[default]
    Forward,
    /// Follow predecessors: everything depending on the start node.
    Backward,
}

/// GraphOperations - traversals and density over snapshot indices
pub struct GraphOperations;

impl GraphOperations {
    fn neighbours(graph: &DependencyGraph, index: usize, direction: Direction) -> Vec<usize> {
        match direction {
            Direction::Forward => graph.successors(index).collect(),
            Direction::Backward => graph.predecessors(index).collect(),
        }
    }

    /// Nodes reachable from `start` in breadth-first order, `start` first.
    pub fn breadth_first_search(
        graph: &DependencyGraph,
        start: usize,
        direction: Direction,
    ) -> Vec<usize> {
        let mut visited = vec![false; graph.node_count()];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited[start] = true;

        while let Some(current) = queue.pop_front() {
            order.push(current);
            for next in Self::neighbours(graph, current, direction) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        order
    }

    /// Nodes reachable from `start` in depth-first pre-order, `start` first.
    ///
    /// Produces the same order as the recursive formulation without using
    /// the call stack.
    pub fn depth_first_search(
        graph: &DependencyGraph,
        start: usize,
        direction: Direction,
    ) -> Vec<usize> {
        let mut visited = vec![false; graph.node_count()];
        let mut order = vec![start];
        visited[start] = true;
        let mut stack = vec![(Self::neighbours(graph, start, direction), 0usize)];

        while let Some((neighbours, position)) = stack.last_mut() {
            let Some(&next) = neighbours.get(*position) else {
                stack.pop();
                continue;
            };
            *position += 1;
            if !visited[next] {
                visited[next] = true;
                order.push(next);
                stack.push((Self::neighbours(graph, next, direction), 0));
            }
        }
        order
    }

    /// Arc count divided by the number of possible arcs `n * (n - 1)`.
    /// Graphs with fewer than two nodes have density 0.
    pub fn density(graph: &DependencyGraph) -> f64 {
        let nodes = graph.node_count();
        if nodes < 2 {
            return 0.0;
        }
        graph.arc_count() as f64 / (nodes * (nodes - 1)) as f64
    }
}
