//! The bit-set adjacency graph and its structural queries.
//!
//! A [`BitSetGraph`] stores, for every node id `0..len`, one [`Bits`] row of
//! outbound targets and one row of inbound sources. The two arrays are exact
//! inverses: `outbound[a].contains(b)` iff `inbound[b].contains(a)`. The
//! graph is immutable once built; a new parse builds a new graph.

use std::fmt;

use strata_bits::{strict_invariants, Bits};
use tracing::debug;

use crate::GraphError;

/// Directed graph over node ids `0..len`, backed by adjacency bit sets.
///
/// Node-taking methods panic if the node id is not below [`len`](Self::len),
/// the same way slice indexing does.
#[derive(Clone, PartialEq, Eq)]
pub struct BitSetGraph {
    pub(crate) outbound: Box<[Bits]>,
    pub(crate) inbound: Box<[Bits]>,
    /// Nodes with outbound edges but no inbound edges.
    top_level: Bits,
    /// Nodes with inbound edges but no outbound edges.
    bottom_level: Bits,
}

impl BitSetGraph {
    /// Build a graph of `node_count` nodes from `(from, to)` edge pairs.
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, GraphError> {
        let mut builder = BitSetGraphBuilder::new(node_count);
        for (from, to) in edges {
            builder.add_edge(from, to)?;
        }
        Ok(builder.build())
    }

    /// Build a graph from outbound rows, deriving the inbound rows.
    ///
    /// The node count is the number of rows.
    pub fn from_adjacency(outbound: Vec<Bits>) -> Result<Self, GraphError> {
        let size = outbound.len();
        let mut inbound = vec![Bits::new(); size];
        for (from, row) in outbound.iter().enumerate() {
            for to in row {
                if to >= size {
                    return Err(GraphError::NodeOutOfRange { node: to, size });
                }
                inbound[to].insert(from);
            }
        }
        Ok(Self::assemble(outbound, inbound))
    }

    /// Build a graph from pre-inverted outbound and inbound rows.
    ///
    /// Row counts must match. Whether the rows really are inverses of each
    /// other is only verified when [`strict_invariants`] is on; otherwise the
    /// arguments are trusted.
    pub fn from_parts(outbound: Vec<Bits>, inbound: Vec<Bits>) -> Result<Self, GraphError> {
        if outbound.len() != inbound.len() {
            return Err(GraphError::SizeMismatch {
                outbound: outbound.len(),
                inbound: inbound.len(),
            });
        }
        if strict_invariants() {
            check_symmetry(&outbound, &inbound)?;
        }
        Ok(Self::assemble(outbound, inbound))
    }

    fn assemble(outbound: Vec<Bits>, inbound: Vec<Bits>) -> Self {
        let mut outbound = outbound.into_boxed_slice();
        let mut inbound = inbound.into_boxed_slice();
        outbound.iter_mut().for_each(Bits::shrink_to_fit);
        inbound.iter_mut().for_each(Bits::shrink_to_fit);

        let mut top_level = Bits::new();
        let mut bottom_level = Bits::new();
        for node in 0..outbound.len() {
            let has_out = !outbound[node].is_empty();
            let has_in = !inbound[node].is_empty();
            if has_out && !has_in {
                top_level.insert(node);
            } else if has_in && !has_out {
                bottom_level.insert(node);
            }
        }

        let graph = BitSetGraph {
            outbound,
            inbound,
            top_level,
            bottom_level,
        };
        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            top_level = graph.top_level.len(),
            bottom_level = graph.bottom_level.len(),
            "built bit-set graph"
        );
        graph
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.outbound.len()
    }

    /// Check whether the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty()
    }

    /// Nodes `node` has an edge to.
    #[inline]
    pub fn children(&self, node: usize) -> &Bits {
        &self.outbound[node]
    }

    /// Nodes with an edge to `node`.
    #[inline]
    pub fn parents(&self, node: usize) -> &Bits {
        &self.inbound[node]
    }

    /// Union of the inbound and outbound adjacency of `node`.
    pub fn neighbors(&self, node: usize) -> Bits {
        self.outbound[node].union(&self.inbound[node])
    }

    /// Check whether the edge `from -> to` exists.
    #[inline]
    pub fn contains_edge(&self, from: usize, to: usize) -> bool {
        self.outbound[from].contains(to)
    }

    /// Check whether `node` has at least one outbound edge.
    #[inline]
    pub fn has_outbound_edge(&self, node: usize) -> bool {
        !self.outbound[node].is_empty()
    }

    /// Check whether `node` has at least one inbound edge.
    #[inline]
    pub fn has_inbound_edge(&self, node: usize) -> bool {
        !self.inbound[node].is_empty()
    }

    /// Number of distinct nodes referencing `node`.
    #[inline]
    pub fn inbound_reference_count(&self, node: usize) -> usize {
        self.inbound[node].len()
    }

    /// Number of distinct nodes `node` references.
    #[inline]
    pub fn outbound_reference_count(&self, node: usize) -> usize {
        self.outbound[node].len()
    }

    /// Check whether no *other* node references `node`.
    ///
    /// A self-reference does not count.
    pub fn is_unreferenced(&self, node: usize) -> bool {
        self.inbound[node].iter().all(|source| source == node)
    }

    /// Nodes with outbound edges but no inbound edges (cached).
    #[inline]
    pub fn top_level(&self) -> &Bits {
        &self.top_level
    }

    /// Nodes with no inbound edges: the top level plus isolated nodes.
    pub fn top_level_or_orphan_rules(&self) -> Bits {
        (0..self.len())
            .filter(|&node| self.inbound[node].is_empty())
            .collect()
    }

    /// Nodes with inbound edges but no outbound edges (cached).
    #[inline]
    pub fn bottom_level_rules(&self) -> &Bits {
        &self.bottom_level
    }

    /// Nodes with no edges in either direction.
    pub fn orphans(&self) -> Bits {
        (0..self.len())
            .filter(|&node| self.outbound[node].is_empty() && self.inbound[node].is_empty())
            .collect()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.outbound.iter().map(Bits::len).sum()
    }

    /// Iterate every edge as `(from, to)`, ordered by source then target.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.outbound
            .iter()
            .enumerate()
            .flat_map(|(from, row)| row.iter().map(move |to| (from, to)))
    }

    /// Every edge as `(from, to)`, ordered by source then target.
    pub fn all_edges(&self) -> Vec<(usize, usize)> {
        self.edges().collect()
    }
}

/// Verify that every outbound edge is mirrored inbound and vice versa.
fn check_symmetry(outbound: &[Bits], inbound: &[Bits]) -> Result<(), GraphError> {
    let size = outbound.len();
    for (from, row) in outbound.iter().enumerate() {
        for to in row {
            if to >= size {
                return Err(GraphError::NodeOutOfRange { node: to, size });
            }
            if !inbound[to].contains(from) {
                return Err(GraphError::AsymmetricEdge { from, to });
            }
        }
    }
    for (to, row) in inbound.iter().enumerate() {
        for from in row {
            if from >= size {
                return Err(GraphError::NodeOutOfRange { node: from, size });
            }
            if !outbound[from].contains(to) {
                return Err(GraphError::AsymmetricEdge { from, to });
            }
        }
    }
    Ok(())
}

impl fmt::Debug for BitSetGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.outbound
                    .iter()
                    .enumerate()
                    .filter(|(_, row)| !row.is_empty()),
            )
            .finish()
    }
}

/// Accumulates edges for a [`BitSetGraph`] of a fixed node count.
///
/// Both adjacency directions are filled as edges arrive, so [`build`](Self::build)
/// never needs to invert anything.
#[derive(Clone, Debug)]
pub struct BitSetGraphBuilder {
    outbound: Vec<Bits>,
    inbound: Vec<Bits>,
}

impl BitSetGraphBuilder {
    /// Create a builder for a graph of `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        BitSetGraphBuilder {
            outbound: vec![Bits::new(); node_count],
            inbound: vec![Bits::new(); node_count],
        }
    }

    /// Record the edge `from -> to`. Duplicate edges are ignored.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<&mut Self, GraphError> {
        let size = self.outbound.len();
        for node in [from, to] {
            if node >= size {
                return Err(GraphError::NodeOutOfRange { node, size });
            }
        }
        self.outbound[from].insert(to);
        self.inbound[to].insert(from);
        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> BitSetGraph {
        BitSetGraph::assemble(self.outbound, self.inbound)
    }
}

#[cfg(test)]
mod tests;
