//! Paths between nodes.
//!
//! [`BitSetGraph::paths_between`] enumerates every path by depth-first
//! search, never reusing an edge within one path. That is exponential in
//! the worst case (densely interconnected cycles) and only suitable for
//! rule-sized graphs. [`BitSetGraph::shortest_path_between`] does not depend
//! on it: it runs a breadth-first search in O(nodes + edges) and yields a
//! path of the same length as the shortest enumerated one.

use std::collections::VecDeque;
use std::fmt;

use rustc_hash::FxHashSet;
use strata_bits::Bits;

use crate::stack::ensure_sufficient_stack;
use crate::BitSetGraph;

/// A path through the graph as the ordered sequence of nodes it visits.
///
/// Always holds at least two nodes. A cycle back to the start node begins
/// and ends with that node.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath {
    nodes: Vec<usize>,
}

impl NodePath {
    fn new(nodes: Vec<usize>) -> Self {
        debug_assert!(nodes.len() >= 2, "a path joins at least two nodes");
        NodePath { nodes }
    }

    /// The visited nodes, start first.
    #[inline]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of edges traversed.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// First node.
    #[inline]
    pub fn start(&self) -> usize {
        self.nodes[0]
    }

    /// Last node.
    #[inline]
    pub fn end(&self) -> usize {
        self.nodes[self.nodes.len() - 1]
    }

    /// Check whether the path visits `node`.
    pub fn contains(&self, node: usize) -> bool {
        self.nodes.contains(&node)
    }

    /// Iterate the visited nodes, start first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().copied()
    }
}

impl fmt::Debug for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl BitSetGraph {
    /// Every path from `src` to `dst`, shortest first.
    ///
    /// Paths stop at their first arrival at `dst`. No edge is traversed
    /// twice within one path, which bounds the search on cyclic graphs but
    /// leaves it exponential in the number of cycles.
    pub fn paths_between(&self, src: usize, dst: usize) -> Vec<NodePath> {
        let mut found = Vec::new();
        let mut current = vec![src];
        let mut used_edges = FxHashSet::default();
        self.collect_paths(src, dst, &mut current, &mut used_edges, &mut found);
        found.sort_by_key(NodePath::edge_count);
        found
    }

    fn collect_paths(
        &self,
        node: usize,
        dst: usize,
        current: &mut Vec<usize>,
        used_edges: &mut FxHashSet<(usize, usize)>,
        found: &mut Vec<NodePath>,
    ) {
        ensure_sufficient_stack(|| {
            for child in &self.outbound[node] {
                if !used_edges.insert((node, child)) {
                    continue;
                }
                current.push(child);
                if child == dst {
                    found.push(NodePath::new(current.clone()));
                } else {
                    self.collect_paths(child, dst, current, used_edges, found);
                }
                current.pop();
                used_edges.remove(&(node, child));
            }
        });
    }

    /// A shortest path from `src` to `dst`, or `None` if `dst` is
    /// unreachable.
    ///
    /// When `src == dst` the result is a shortest cycle through `src`.
    pub fn shortest_path_between(&self, src: usize, dst: usize) -> Option<NodePath> {
        let mut predecessor: Vec<Option<usize>> = vec![None; self.len()];
        let mut seen = Bits::with_capacity(self.len());
        let mut queue = VecDeque::new();

        for child in &self.outbound[src] {
            if seen.insert(child) {
                predecessor[child] = Some(src);
                queue.push_back(child);
            }
        }

        while let Some(node) = queue.pop_front() {
            if node == dst {
                return Some(Self::trace_back(&predecessor, src, dst));
            }
            for child in &self.outbound[node] {
                if seen.insert(child) {
                    predecessor[child] = Some(node);
                    queue.push_back(child);
                }
            }
        }
        None
    }

    fn trace_back(predecessor: &[Option<usize>], src: usize, dst: usize) -> NodePath {
        let mut nodes = vec![dst];
        let mut current = dst;
        while let Some(previous) = predecessor[current] {
            nodes.push(previous);
            if previous == src {
                break;
            }
            current = previous;
        }
        nodes.reverse();
        NodePath::new(nodes)
    }

    /// Edge count of the shorter of the two directed paths between `a` and
    /// `b`, or `None` if neither direction is reachable.
    pub fn distance(&self, a: usize, b: usize) -> Option<usize> {
        let forward = self.shortest_path_between(a, b).map(|p| p.edge_count());
        let backward = self.shortest_path_between(b, a).map(|p| p.edge_count());
        match (forward, backward) {
            (Some(x), Some(y)) => Some(x.min(y)),
            (Some(x), None) | (None, Some(x)) => Some(x),
            (None, None) => None,
        }
    }
}
