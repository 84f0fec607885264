//! Reachability: closures, recursion checks and set algebra over closures.
//!
//! A node's closure is every node reachable through outbound edges. It does
//! not include the node itself unless a cycle leads back to it, which is
//! exactly what [`BitSetGraph::is_recursive`] tests.

use strata_bits::Bits;
use tracing::debug;

use crate::BitSetGraph;

impl BitSetGraph {
    /// Everything reachable from `seeds` through `rows`, seeds included.
    ///
    /// Iterative depth-first search; the accumulator doubles as the visited
    /// marker, so cycles terminate.
    fn reach(rows: &[Bits], seeds: &Bits) -> Bits {
        let mut result = Bits::with_capacity(rows.len());
        let mut stack: Vec<usize> = seeds.iter().collect();
        while let Some(node) = stack.pop() {
            if result.insert(node) {
                stack.extend(rows[node].iter().filter(|next| !result.contains(*next)));
            }
        }
        result
    }

    /// Every node reachable from `node` through outbound edges.
    ///
    /// Contains `node` only if some path leads back to it.
    pub fn closure_of(&self, node: usize) -> Bits {
        Self::reach(&self.outbound, &self.outbound[node])
    }

    /// Every node that can reach `node` through outbound edges.
    ///
    /// Contains `node` only if some path leads back to it.
    pub fn reverse_closure_of(&self, node: usize) -> Bits {
        Self::reach(&self.inbound, &self.inbound[node])
    }

    /// Number of nodes in the closure of `node`.
    pub fn closure_size(&self, node: usize) -> usize {
        self.closure_of(node).len()
    }

    /// Number of nodes in the reverse closure of `node`.
    pub fn reverse_closure_size(&self, node: usize) -> usize {
        self.reverse_closure_of(node).len()
    }

    /// Check whether some outbound path from `node` returns to it.
    pub fn is_recursive(&self, node: usize) -> bool {
        self.closure_of(node).contains(node)
    }

    /// Check whether `node` reaches itself through at least one other node.
    ///
    /// A direct self-edge alone does not make a node indirectly recursive.
    pub fn is_indirectly_recursive(&self, node: usize) -> bool {
        let mut seeds = self.outbound[node].clone();
        seeds.remove(node);
        Self::reach(&self.outbound, &seeds).contains(node)
    }

    /// Check whether an outbound path leads from `from` to `to`.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.closure_of(from).contains(to)
    }

    /// Nodes in the closure of `a` or of `b`.
    pub fn closure_union(&self, a: usize, b: usize) -> Bits {
        let mut result = self.closure_of(a);
        result.union_with(&self.closure_of(b));
        result
    }

    /// Nodes in the closures of both `a` and `b`.
    pub fn closure_intersection(&self, a: usize, b: usize) -> Bits {
        let mut result = self.closure_of(a);
        result.intersect_with(&self.closure_of(b));
        result
    }

    /// Nodes in the closure of exactly one of `a` and `b`.
    pub fn closure_disjunction(&self, a: usize, b: usize) -> Bits {
        let mut result = self.closure_of(a);
        result.symmetric_difference_with(&self.closure_of(b));
        result
    }

    /// Nodes in the closure of exactly one of `nodes`.
    ///
    /// With two nodes this is [`closure_disjunction`](Self::closure_disjunction).
    pub fn closure_disjunction_of(&self, nodes: &[usize]) -> Bits {
        let mut seen_once = Bits::new();
        let mut seen_more = Bits::new();
        for &node in nodes {
            let closure = self.closure_of(node);
            seen_more.union_with(&seen_once.intersection(&closure));
            seen_once.union_with(&closure);
        }
        seen_once.difference_with(&seen_more);
        seen_once
    }

    /// Nodes whose closure shares nothing with any other node's closure.
    ///
    /// A node's own id is removed from its closure before comparing. Used to
    /// pick the structurally independent branches of a reference graph.
    pub fn disjoint_items(&self) -> Bits {
        self.disjoint_items_of(&Bits::full(self.len()))
    }

    /// [`disjoint_items`](Self::disjoint_items) restricted to `candidates`:
    /// only the candidates' closures are compared with each other.
    #[tracing::instrument(level = "debug", skip_all, fields(candidates = candidates.len()))]
    pub fn disjoint_items_of(&self, candidates: &Bits) -> Bits {
        let closures: Vec<(usize, Bits)> = candidates
            .iter()
            .map(|node| (node, self.closure_of(node)))
            .collect();

        let mut result = Bits::new();
        for (node, closure) in &closures {
            let mut own = closure.clone();
            own.remove(*node);
            let shares = closures
                .iter()
                .any(|(other, theirs)| other != node && own.intersects(theirs));
            if !shares {
                result.insert(*node);
            }
        }
        debug!(disjoint = result.len(), "computed disjoint items");
        result
    }

    /// Node ids sorted ascending by closure size. Ties keep id order.
    pub fn by_closure_size(&self) -> Vec<usize> {
        let sizes: Vec<usize> = (0..self.len()).map(|n| self.closure_size(n)).collect();
        let mut nodes: Vec<usize> = (0..self.len()).collect();
        nodes.sort_by_key(|&n| sizes[n]);
        nodes
    }

    /// Node ids sorted ascending by reverse closure size. Ties keep id order.
    pub fn by_reverse_closure_size(&self) -> Vec<usize> {
        let sizes: Vec<usize> = (0..self.len())
            .map(|n| self.reverse_closure_size(n))
            .collect();
        let mut nodes: Vec<usize> = (0..self.len()).collect();
        nodes.sort_by_key(|&n| sizes[n]);
        nodes
    }
}
