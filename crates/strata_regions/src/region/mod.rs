//! Flyweight views over single regions.
//!
//! A [`SemanticRegion`] is a collection reference plus an index; nothing is
//! copied out of the parallel arrays until asked for. Ancestor queries scan
//! backward from the region's own index and descendant queries scan forward,
//! so no tree is ever stored.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use crate::regions::Regions;
use crate::SemanticRegions;

/// One region of a [`SemanticRegions`] collection.
///
/// Equality and hashing use the bounds and key only, so regions from two
/// different builds compare equal when they describe the same span.
pub struct SemanticRegion<'a, T> {
    regions: &'a SemanticRegions<T>,
    index: usize,
    depth: Cell<Option<usize>>,
}

#[allow(
    clippy::len_without_is_empty,
    reason = "regions are never empty"
)]
impl<'a, T> SemanticRegion<'a, T> {
    pub(crate) fn new(regions: &'a SemanticRegions<T>, index: usize) -> Self {
        SemanticRegion {
            regions,
            index,
            depth: Cell::new(None),
        }
    }

    /// Insertion index within the owning collection.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.regions.starts[self.index]
    }

    /// Exclusive end offset.
    #[inline]
    pub fn end(&self) -> u32 {
        self.regions.ends[self.index]
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end() - self.start()
    }

    #[inline]
    pub fn key(&self) -> &'a T {
        &self.regions.keys[self.index]
    }

    #[inline]
    pub fn bounds(&self) -> Range<u32> {
        self.start()..self.end()
    }

    #[inline]
    pub fn contains_position(&self, pos: u32) -> bool {
        self.start() <= pos && pos < self.end()
    }

    /// Check whether `other` lies entirely within this region.
    pub fn contains<U>(&self, other: &SemanticRegion<'_, U>) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// Check whether the two regions share at least one offset.
    pub fn overlaps<U>(&self, other: &SemanticRegion<'_, U>) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }

    /// The innermost region enclosing this one.
    pub fn parent(&self) -> Option<SemanticRegion<'a, T>> {
        self.regions
            .parent_index(self.index)
            .map(|index| self.regions.region(index))
    }

    /// The outermost region enclosing this one, or this region itself.
    pub fn outermost(&self) -> SemanticRegion<'a, T> {
        let mut index = self.index;
        while let Some(parent) = self.regions.parent_index(index) {
            index = parent;
        }
        self.regions.region(index)
    }

    pub fn is_outermost(&self) -> bool {
        self.regions.parent_index(self.index).is_none()
    }

    /// Number of regions enclosing this one.
    ///
    /// Computed on first call and remembered by this view.
    pub fn nesting_depth(&self) -> usize {
        if let Some(depth) = self.depth.get() {
            return depth;
        }
        let depth = std::iter::successors(self.regions.parent_index(self.index), |&index| {
            self.regions.parent_index(index)
        })
        .count();
        self.depth.set(Some(depth));
        depth
    }

    /// Every region nested anywhere inside this one, in insertion order.
    pub fn all_children(&self) -> Regions<'a, T> {
        let first = self.index + 1;
        Regions::new(
            self.regions,
            first..self.regions.starts_before(first, self.end()),
        )
    }

    /// Regions whose parent is this one, in insertion order.
    pub fn children(&self) -> Children<'a, T> {
        Children {
            inner: self.all_children(),
            reach: 0,
        }
    }
}

impl<T> Clone for SemanticRegion<'_, T> {
    fn clone(&self) -> Self {
        SemanticRegion {
            regions: self.regions,
            index: self.index,
            depth: self.depth.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for SemanticRegion<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.start() == other.start() && self.end() == other.end() && self.key() == other.key()
    }
}

impl<T: Eq> Eq for SemanticRegion<'_, T> {}

impl<T: Hash> Hash for SemanticRegion<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start().hash(state);
        self.end().hash(state);
        self.key().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for SemanticRegion<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticRegion")
            .field("index", &self.index)
            .field("start", &self.start())
            .field("end", &self.end())
            .field("key", self.key())
            .finish()
    }
}

/// Iterator over the direct children of a region.
///
/// Walks the nested run in insertion order and skips anything starting
/// before the end of the last child yielded, which is nested in it.
pub struct Children<'a, T> {
    inner: Regions<'a, T>,
    reach: u32,
}

impl<T> Clone for Children<'_, T> {
    fn clone(&self) -> Self {
        Children {
            inner: self.inner.clone(),
            reach: self.reach,
        }
    }
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = SemanticRegion<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let reach = self.reach;
        let child = self.inner.find(|region| region.start() >= reach)?;
        self.reach = child.end();
        Some(child)
    }
}
