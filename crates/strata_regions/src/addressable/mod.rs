//! Offset-addressable collections and cross-referencing by containment.
//!
//! [`cross_reference`] relates two independently built collections (say,
//! rule bodies and identifier occurrences) as a [`BitSetGraph`] whose edge
//! `i -> j` means item `i` contains item `j`. Left items keep their
//! indices as node ids; right items are shifted past them. Only edges
//! between the two collections are recorded, in both directions when the
//! bounds are identical.

use strata_bits::Bits;
use strata_graph::BitSetGraph;

use crate::{RegionError, SemanticRegion, SemanticRegions};

/// An item occupying the offsets `[start, end)`.
pub trait IndexAddressableItem {
    fn start(&self) -> u32;

    /// Exclusive end offset.
    fn end(&self) -> u32;

    fn contains_position(&self, pos: u32) -> bool {
        self.start() <= pos && pos < self.end()
    }

    /// Check whether `other` lies entirely within this item.
    fn contains_item<O: IndexAddressableItem + ?Sized>(&self, other: &O) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    fn is_contained_by<O: IndexAddressableItem + ?Sized>(&self, other: &O) -> bool {
        other.contains_item(self)
    }

    fn same_bounds<O: IndexAddressableItem + ?Sized>(&self, other: &O) -> bool {
        self.start() == other.start() && self.end() == other.end()
    }
}

/// A collection of items addressable by index and by offset.
pub trait IndexAddressable {
    type Item<'a>: IndexAddressableItem
    where
        Self: 'a;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The item at `index`, if any.
    fn item(&self, index: usize) -> Option<Self::Item<'_>>;

    /// The most specific item containing `pos`.
    fn item_at(&self, pos: u32) -> Option<Self::Item<'_>>;
}

impl<T> IndexAddressableItem for SemanticRegion<'_, T> {
    fn start(&self) -> u32 {
        SemanticRegion::start(self)
    }

    fn end(&self) -> u32 {
        SemanticRegion::end(self)
    }
}

impl<T> IndexAddressable for SemanticRegions<T> {
    type Item<'a>
        = SemanticRegion<'a, T>
    where
        Self: 'a;

    fn len(&self) -> usize {
        SemanticRegions::len(self)
    }

    fn item(&self, index: usize) -> Option<Self::Item<'_>> {
        self.get(index)
    }

    fn item_at(&self, pos: u32) -> Option<Self::Item<'_>> {
        self.at(pos)
    }
}

/// Containment edges between the items of two collections.
pub struct ContainmentGraph<'a, A: ?Sized, B: ?Sized> {
    left: &'a A,
    right: &'a B,
    graph: BitSetGraph,
}

impl<'a, A, B> ContainmentGraph<'a, A, B>
where
    A: IndexAddressable + ?Sized,
    B: IndexAddressable + ?Sized,
{
    /// The graph over `left.len() + right.len()` nodes.
    pub fn graph(&self) -> &BitSetGraph {
        &self.graph
    }

    pub fn left(&self) -> &'a A {
        self.left
    }

    pub fn right(&self) -> &'a B {
        self.right
    }

    /// Node id of left item `index`.
    #[inline]
    pub fn left_node(&self, index: usize) -> usize {
        index
    }

    /// Node id of right item `index`.
    #[inline]
    pub fn right_node(&self, index: usize) -> usize {
        self.left.len() + index
    }

    /// Right items lying inside left item `index`.
    pub fn contents_of_left(&self, index: usize) -> Vec<B::Item<'a>> {
        self.right_items(self.graph.children(self.left_node(index)))
    }

    /// Right items enclosing left item `index`.
    pub fn containers_of_left(&self, index: usize) -> Vec<B::Item<'a>> {
        self.right_items(self.graph.parents(self.left_node(index)))
    }

    /// Left items lying inside right item `index`.
    pub fn contents_of_right(&self, index: usize) -> Vec<A::Item<'a>> {
        self.left_items(self.graph.children(self.right_node(index)))
    }

    /// Left items enclosing right item `index`.
    pub fn containers_of_right(&self, index: usize) -> Vec<A::Item<'a>> {
        self.left_items(self.graph.parents(self.right_node(index)))
    }

    fn left_items(&self, nodes: &Bits) -> Vec<A::Item<'a>> {
        nodes.iter().filter_map(|node| self.left.item(node)).collect()
    }

    fn right_items(&self, nodes: &Bits) -> Vec<B::Item<'a>> {
        let offset = self.left.len();
        nodes
            .iter()
            .filter_map(|node| self.right.item(node - offset))
            .collect()
    }
}

/// Relate `left` and `right` by containment.
///
/// Items from both sides are swept in order of start, larger items first.
/// Each side keeps the items still open at the current start; an open item
/// from the other side that ends no earlier than the current one contains
/// it.
#[tracing::instrument(level = "debug", skip_all, fields(left = left.len(), right = right.len()))]
pub fn cross_reference<'a, A, B>(
    left: &'a A,
    right: &'a B,
) -> Result<ContainmentGraph<'a, A, B>, RegionError>
where
    A: IndexAddressable + ?Sized,
    B: IndexAddressable + ?Sized,
{
    let offset = left.len();
    let size = offset + right.len();

    // (start, end, node)
    let mut items: Vec<(u32, u32, usize)> = Vec::with_capacity(size);
    items.extend((0..left.len()).filter_map(|index| {
        left.item(index)
            .map(|item| (item.start(), item.end(), index))
    }));
    items.extend((0..right.len()).filter_map(|index| {
        right
            .item(index)
            .map(|item| (item.start(), item.end(), offset + index))
    }));
    items.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut outbound = vec![Bits::new(); size];
    let mut inbound = vec![Bits::new(); size];
    let mut link = |container: usize, contained: usize| {
        outbound[container].insert(contained);
        inbound[contained].insert(container);
    };

    let mut open: [Vec<(u32, u32, usize)>; 2] = [Vec::new(), Vec::new()];
    for (start, end, node) in items {
        let side = usize::from(node >= offset);
        for still_open in &mut open {
            still_open.retain(|&(_, open_end, _)| open_end > start);
        }
        for &(open_start, open_end, other) in &open[1 - side] {
            if open_end >= end {
                link(other, node);
                if open_start == start && open_end == end {
                    link(node, other);
                }
            }
        }
        open[side].push((start, end, node));
    }

    let graph = BitSetGraph::from_parts(outbound, inbound)?;
    tracing::debug!(edges = graph.edge_count(), "cross-referenced regions");
    Ok(ContainmentGraph { left, right, graph })
}
