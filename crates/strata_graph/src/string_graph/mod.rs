//! Name-keyed facade over [`BitSetGraph`].
//!
//! Node ids are positions in a sorted, duplicate-free name table, so
//! name-to-id resolution is a binary search and id order is name order.
//! Every query translates names to ids on the way in and ids back to names
//! on the way out; results come back in ascending name order.
//!
//! The table must stay sorted and match the node count. That is verified
//! only when [`strict_invariants`] is on; a violating table otherwise yields
//! silently wrong lookups.

use strata_bits::{strict_invariants, Bits};

use crate::config::{CentralityConfig, PageRankConfig};
use crate::{BitSetGraph, GraphError, GraphVisitor};

/// Receives traversal callbacks by node name.
///
/// Any `FnMut(&str, depth)` closure is a visitor that only cares about
/// `enter`.
pub trait NameVisitor {
    /// Called when `name` is first reached, `depth` edges below the root.
    fn enter(&mut self, name: &str, depth: usize);

    /// Called after every node reachable from `name` has been handled.
    fn exit(&mut self, name: &str, depth: usize) {
        let _ = (name, depth);
    }
}

impl<F: FnMut(&str, usize)> NameVisitor for F {
    fn enter(&mut self, name: &str, depth: usize) {
        self(name, depth);
    }
}

/// Adapts a [`NameVisitor`] to the id-based walks.
struct NamedWalk<'a, V> {
    names: &'a [String],
    visitor: &'a mut V,
}

impl<V: NameVisitor> GraphVisitor for NamedWalk<'_, V> {
    fn enter(&mut self, node: usize, depth: usize) {
        self.visitor.enter(&self.names[node], depth);
    }

    fn exit(&mut self, node: usize, depth: usize) {
        self.visitor.exit(&self.names[node], depth);
    }
}

/// A [`BitSetGraph`] whose nodes are identified by name.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StringGraph {
    graph: BitSetGraph,
    names: Box<[String]>,
}

impl StringGraph {
    /// Pair `graph` with its name table.
    ///
    /// `names[i]` names node `i`; the table must be strictly ascending and
    /// as long as the graph.
    pub fn new(graph: BitSetGraph, names: Vec<String>) -> Result<Self, GraphError> {
        if strict_invariants() {
            if names.len() != graph.len() {
                return Err(GraphError::NameCountMismatch {
                    names: names.len(),
                    nodes: graph.len(),
                });
            }
            if let Some(index) = names.windows(2).position(|pair| pair[0] >= pair[1]) {
                return Err(GraphError::UnsortedNames {
                    index: index + 1,
                    previous: names[index].clone(),
                    name: names[index + 1].clone(),
                });
            }
        }
        Ok(StringGraph {
            graph,
            names: names.into_boxed_slice(),
        })
    }

    /// Build from a set of names and `(from, to)` name pairs.
    ///
    /// The names are sorted and deduplicated here. Every edge endpoint
    /// must be one of them.
    pub fn from_edges<'e, N>(
        names: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = (&'e str, &'e str)>,
    ) -> Result<Self, GraphError>
    where
        N: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort_unstable();
        names.dedup();

        let id = |name: &str| {
            names
                .binary_search_by(|probe| probe.as_str().cmp(name))
                .map_err(|_| GraphError::UnknownName(name.to_owned()))
        };
        let pairs = edges
            .into_iter()
            .map(|(from, to)| -> Result<(usize, usize), GraphError> {
                Ok((id(from)?, id(to)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let graph = BitSetGraph::from_edges(names.len(), pairs)?;
        Self::new(graph, names)
    }

    /// The underlying id graph.
    #[inline]
    pub fn graph(&self) -> &BitSetGraph {
        &self.graph
    }

    /// The name table, in id order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Check whether the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Node id of `name`.
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.names
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .ok()
    }

    /// Name of node `id`.
    pub fn name_of(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    fn names_of(&self, bits: &Bits) -> Vec<&str> {
        bits.iter().map(|id| self.names[id].as_str()).collect()
    }

    fn query(&self, name: &str, f: impl FnOnce(&BitSetGraph, usize) -> Bits) -> Vec<&str> {
        self.id_of(name)
            .map(|id| self.names_of(&f(&self.graph, id)))
            .unwrap_or_default()
    }

    fn test(&self, name: &str, f: impl FnOnce(&BitSetGraph, usize) -> bool) -> bool {
        self.id_of(name).is_some_and(|id| f(&self.graph, id))
    }

    fn count(&self, name: &str, f: impl FnOnce(&BitSetGraph, usize) -> usize) -> usize {
        self.id_of(name).map_or(0, |id| f(&self.graph, id))
    }

    /// Names `name` references.
    pub fn children(&self, name: &str) -> Vec<&str> {
        self.query(name, |g, id| g.children(id).clone())
    }

    /// Names referencing `name`.
    pub fn parents(&self, name: &str) -> Vec<&str> {
        self.query(name, |g, id| g.parents(id).clone())
    }

    /// Names adjacent to `name` in either direction.
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        self.query(name, BitSetGraph::neighbors)
    }

    /// Every name reachable from `name`.
    pub fn closure_of(&self, name: &str) -> Vec<&str> {
        self.query(name, BitSetGraph::closure_of)
    }

    /// Every name that can reach `name`.
    pub fn reverse_closure_of(&self, name: &str) -> Vec<&str> {
        self.query(name, BitSetGraph::reverse_closure_of)
    }

    pub fn closure_size(&self, name: &str) -> usize {
        self.count(name, BitSetGraph::closure_size)
    }

    pub fn reverse_closure_size(&self, name: &str) -> usize {
        self.count(name, BitSetGraph::reverse_closure_size)
    }

    pub fn is_recursive(&self, name: &str) -> bool {
        self.test(name, BitSetGraph::is_recursive)
    }

    pub fn is_indirectly_recursive(&self, name: &str) -> bool {
        self.test(name, BitSetGraph::is_indirectly_recursive)
    }

    pub fn is_unreferenced(&self, name: &str) -> bool {
        self.test(name, BitSetGraph::is_unreferenced)
    }

    pub fn has_outbound_edge(&self, name: &str) -> bool {
        self.test(name, BitSetGraph::has_outbound_edge)
    }

    pub fn has_inbound_edge(&self, name: &str) -> bool {
        self.test(name, BitSetGraph::has_inbound_edge)
    }

    pub fn inbound_reference_count(&self, name: &str) -> usize {
        self.count(name, BitSetGraph::inbound_reference_count)
    }

    pub fn outbound_reference_count(&self, name: &str) -> usize {
        self.count(name, BitSetGraph::outbound_reference_count)
    }

    /// Check whether an edge leads from `from` to `to`.
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.id_of(from), self.id_of(to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Check whether a path leads from `from` to `to`.
    pub fn is_reachable(&self, from: &str, to: &str) -> bool {
        match (self.id_of(from), self.id_of(to)) {
            (Some(a), Some(b)) => self.graph.is_reachable(a, b),
            _ => false,
        }
    }

    fn pair(
        &self,
        a: &str,
        b: &str,
        f: impl FnOnce(&BitSetGraph, usize, usize) -> Bits,
    ) -> Vec<&str> {
        match (self.id_of(a), self.id_of(b)) {
            (Some(a), Some(b)) => self.names_of(&f(&self.graph, a, b)),
            _ => Vec::new(),
        }
    }

    pub fn closure_union(&self, a: &str, b: &str) -> Vec<&str> {
        self.pair(a, b, BitSetGraph::closure_union)
    }

    pub fn closure_intersection(&self, a: &str, b: &str) -> Vec<&str> {
        self.pair(a, b, BitSetGraph::closure_intersection)
    }

    pub fn closure_disjunction(&self, a: &str, b: &str) -> Vec<&str> {
        self.pair(a, b, BitSetGraph::closure_disjunction)
    }

    /// Names in the closure of exactly one of `names`. Unknown names are
    /// ignored.
    pub fn closure_disjunction_of(&self, names: &[&str]) -> Vec<&str> {
        let ids: Vec<usize> = names.iter().filter_map(|name| self.id_of(name)).collect();
        self.names_of(&self.graph.closure_disjunction_of(&ids))
    }

    /// Names with no inbound edges.
    pub fn top_level_or_orphan_rules(&self) -> Vec<&str> {
        self.names_of(&self.graph.top_level_or_orphan_rules())
    }

    /// Names with inbound but no outbound edges.
    pub fn bottom_level_rules(&self) -> Vec<&str> {
        self.names_of(self.graph.bottom_level_rules())
    }

    /// Names with no edges at all.
    pub fn orphans(&self) -> Vec<&str> {
        self.names_of(&self.graph.orphans())
    }

    pub fn disjoint_items(&self) -> Vec<&str> {
        self.names_of(&self.graph.disjoint_items())
    }

    /// Names sorted ascending by closure size.
    pub fn by_closure_size(&self) -> Vec<&str> {
        self.graph
            .by_closure_size()
            .into_iter()
            .map(|id| self.names[id].as_str())
            .collect()
    }

    /// Names sorted ascending by reverse closure size.
    pub fn by_reverse_closure_size(&self) -> Vec<&str> {
        self.graph
            .by_reverse_closure_size()
            .into_iter()
            .map(|id| self.names[id].as_str())
            .collect()
    }

    /// Every edge as `(from, to)` names.
    pub fn all_edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edges()
            .map(|(from, to)| (self.names[from].as_str(), self.names[to].as_str()))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn walk(&self, visitor: &mut impl NameVisitor) {
        self.graph.walk(&mut NamedWalk {
            names: &self.names,
            visitor,
        });
    }

    pub fn walk_upwards(&self, visitor: &mut impl NameVisitor) {
        self.graph.walk_upwards(&mut NamedWalk {
            names: &self.names,
            visitor,
        });
    }

    /// Walk from `start` only. Does nothing for an unknown name.
    pub fn walk_from(&self, start: &str, visitor: &mut impl NameVisitor) {
        if let Some(id) = self.id_of(start) {
            self.graph.walk_from(
                id,
                &mut NamedWalk {
                    names: &self.names,
                    visitor,
                },
            );
        }
    }

    /// A shortest path from `src` to `dst` as names.
    pub fn shortest_path_between(&self, src: &str, dst: &str) -> Option<Vec<&str>> {
        let path = self
            .graph
            .shortest_path_between(self.id_of(src)?, self.id_of(dst)?)?;
        Some(path.iter().map(|id| self.names[id].as_str()).collect())
    }

    /// Every path from `src` to `dst` as names, shortest first.
    pub fn paths_between(&self, src: &str, dst: &str) -> Vec<Vec<&str>> {
        let (Some(src), Some(dst)) = (self.id_of(src), self.id_of(dst)) else {
            return Vec::new();
        };
        self.graph
            .paths_between(src, dst)
            .iter()
            .map(|path| path.iter().map(|id| self.names[id].as_str()).collect())
            .collect()
    }

    /// Edge count of the shorter directed path between `a` and `b`.
    pub fn distance(&self, a: &str, b: &str) -> Option<usize> {
        self.graph.distance(self.id_of(a)?, self.id_of(b)?)
    }

    fn scored(&self, scores: Vec<f64>) -> Vec<(&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(scores)
            .collect()
    }

    /// Eigenvector centrality as `(name, score)` in name order.
    pub fn eigenvector_centrality(&self, config: &CentralityConfig) -> Vec<(&str, f64)> {
        self.scored(self.graph.eigenvector_centrality(config))
    }

    /// PageRank as `(name, score)` in name order.
    pub fn page_rank(&self, config: &PageRankConfig) -> Vec<(&str, f64)> {
        self.scored(self.graph.page_rank(config))
    }
}

#[cfg(test)]
mod tests;
