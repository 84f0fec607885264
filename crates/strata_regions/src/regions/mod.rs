//! The region collection and its builder.
//!
//! Regions are stored as three parallel arrays (`starts`, `ends`, `keys`)
//! in insertion order. The nesting invariant enforced by the builder makes
//! the regions containing any offset a chain, each nested in the one
//! before it, so the most deeply nested region at an offset is simply the
//! last inserted region containing it.
//!
//! Two facts are derived during insertion so lookups can take shortcuts:
//! whether any region nests inside another, and how long the prefix of
//! `ends` stays non-decreasing. Inside that prefix a single comparison
//! settles whether any earlier region still reaches an offset.

use std::fmt;
use std::ops::Range;

use smallvec::SmallVec;
use tracing::debug;

use crate::{PriorRegion, RegionError, SemanticRegion};

/// Immutable, insertion-ordered set of properly nested regions.
///
/// Built once per parse through [`SemanticRegionsBuilder`]; discarded and
/// rebuilt wholesale on the next one. `SemanticRegions<()>` is the keyless
/// mode.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SemanticRegions<T = ()> {
    pub(crate) starts: Box<[u32]>,
    pub(crate) ends: Box<[u32]>,
    pub(crate) keys: Box<[T]>,
    has_nesting: bool,
    /// Length of the prefix of `ends` that is non-decreasing.
    sorted_ends: usize,
}

impl<T> Default for SemanticRegions<T> {
    fn default() -> Self {
        SemanticRegionsBuilder::new().build()
    }
}

impl<T> SemanticRegions<T> {
    pub fn builder() -> SemanticRegionsBuilder<T> {
        SemanticRegionsBuilder::new()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Check whether any region lies inside another.
    #[inline]
    pub fn has_nesting(&self) -> bool {
        self.has_nesting
    }

    #[inline]
    pub(crate) fn region(&self, index: usize) -> SemanticRegion<'_, T> {
        SemanticRegion::new(self, index)
    }

    /// The region inserted at `index`, if any.
    pub fn get(&self, index: usize) -> Option<SemanticRegion<'_, T>> {
        (index < self.len()).then(|| self.region(index))
    }

    /// The region inserted at `index`.
    pub fn for_index(&self, index: usize) -> Result<SemanticRegion<'_, T>, RegionError> {
        self.get(index).ok_or(RegionError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// The most recently inserted region.
    pub fn last(&self) -> Option<SemanticRegion<'_, T>> {
        self.len().checked_sub(1).map(|index| self.region(index))
    }

    /// Every region in insertion order.
    pub fn iter(&self) -> Regions<'_, T> {
        Regions::new(self, 0..self.len())
    }

    /// Every key in insertion order.
    pub fn keys(&self) -> std::slice::Iter<'_, T> {
        self.keys.iter()
    }

    /// The most deeply nested region containing `pos`.
    pub fn at(&self, pos: u32) -> Option<SemanticRegion<'_, T>> {
        self.index_at(pos).map(|index| self.region(index))
    }

    /// Key of the most deeply nested region containing `pos`.
    pub fn key_at(&self, pos: u32) -> Option<&T> {
        self.index_at(pos).map(|index| &self.keys[index])
    }

    /// Every region containing `pos`, outermost first.
    pub fn regions_at(&self, pos: u32) -> Vec<SemanticRegion<'_, T>> {
        let mut chain: Vec<_> =
            std::iter::successors(self.index_at(pos), |&index| self.parent_index(index))
                .map(|index| self.region(index))
                .collect();
        chain.reverse();
        chain
    }

    /// Insertion index of the first region with exactly these bounds.
    pub fn index_of(&self, start: u32, end: u32) -> Option<usize> {
        let first = self.starts.partition_point(|&s| s < start);
        (first..self.len())
            .take_while(|&index| self.starts[index] == start)
            .find(|&index| self.ends[index] == end)
    }

    /// Regions not nested in any other, in insertion order.
    ///
    /// The returned iterator is `Clone`, so a walk can be restarted from
    /// any point; calling this again starts over from the first region.
    pub fn outermost_elements(&self) -> Outermost<'_, T> {
        Outermost {
            regions: self,
            next: 0,
        }
    }

    /// Keys of the regions not nested in any other.
    pub fn outermost_keys(&self) -> impl Iterator<Item = &T> + Clone + '_ {
        self.outermost_elements().map(|region| region.key())
    }

    pub(crate) fn index_at(&self, pos: u32) -> Option<usize> {
        let candidates = self.starts.partition_point(|&start| start <= pos);
        let min_end = pos.checked_add(1)?;
        if !self.has_nesting {
            let index = candidates.checked_sub(1)?;
            return (self.ends[index] >= min_end).then_some(index);
        }
        self.last_reaching(candidates, min_end)
    }

    pub(crate) fn parent_index(&self, index: usize) -> Option<usize> {
        if !self.has_nesting {
            return None;
        }
        self.last_reaching(index, self.ends[index])
    }

    /// Greatest index below `limit` whose region ends at or after `min_end`.
    ///
    /// Among regions starting no later than the one at `limit`, that is the
    /// deepest one still open at `min_end - 1`. Backward scan through the
    /// unsorted tail of `ends`; once inside the sorted prefix only its last
    /// candidate needs checking.
    ///
    /// Worst case O(n) per call: an offset in the gap between many nested
    /// siblings scans back past every earlier sibling to reach their parent.
    fn last_reaching(&self, limit: usize, min_end: u32) -> Option<usize> {
        let mut index = limit.checked_sub(1)?;
        while index >= self.sorted_ends {
            if self.ends[index] >= min_end {
                return Some(index);
            }
            index = index.checked_sub(1)?;
        }
        (self.ends[index] >= min_end).then_some(index)
    }

    /// Index one past the last region starting before `end`, searching
    /// from `from`.
    pub(crate) fn starts_before(&self, from: usize, end: u32) -> usize {
        from + self.starts[from..].partition_point(|&start| start < end)
    }
}

impl<T: fmt::Debug> fmt::Debug for SemanticRegions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a SemanticRegions<T> {
    type Item = SemanticRegion<'a, T>;
    type IntoIter = Regions<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a contiguous run of regions.
pub struct Regions<'a, T> {
    regions: &'a SemanticRegions<T>,
    range: Range<usize>,
}

impl<'a, T> Regions<'a, T> {
    pub(crate) fn new(regions: &'a SemanticRegions<T>, range: Range<usize>) -> Self {
        Regions { regions, range }
    }
}

impl<T> Clone for Regions<'_, T> {
    fn clone(&self) -> Self {
        Regions {
            regions: self.regions,
            range: self.range.clone(),
        }
    }
}

impl<'a, T> Iterator for Regions<'a, T> {
    type Item = SemanticRegion<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|index| self.regions.region(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<T> DoubleEndedIterator for Regions<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(|index| self.regions.region(index))
    }
}

impl<T> ExactSizeIterator for Regions<'_, T> {}

/// Iterator over the regions not nested in any other.
///
/// After yielding a region it jumps past every region starting before that
/// region's end, since those are all nested in it.
pub struct Outermost<'a, T> {
    regions: &'a SemanticRegions<T>,
    next: usize,
}

impl<T> Clone for Outermost<'_, T> {
    fn clone(&self) -> Self {
        Outermost {
            regions: self.regions,
            next: self.next,
        }
    }
}

impl<'a, T> Iterator for Outermost<'a, T> {
    type Item = SemanticRegion<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        if index >= self.regions.len() {
            return None;
        }
        self.next = self
            .regions
            .starts_before(index + 1, self.regions.ends[index]);
        Some(self.regions.region(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.regions.len() - self.next.min(self.regions.len());
        (usize::from(remaining > 0), Some(remaining))
    }
}

/// Accumulates regions in document order and validates the nesting
/// invariant as they arrive.
///
/// Every `add` either accepts the region or rejects it without changing the
/// builder, naming the earlier region it conflicts with.
#[derive(Debug)]
pub struct SemanticRegionsBuilder<T = ()> {
    starts: Vec<u32>,
    ends: Vec<u32>,
    keys: Vec<T>,
    /// Indices of the regions still open at the last start, outermost first.
    open: SmallVec<[usize; 16]>,
    has_nesting: bool,
    sorted_ends: Option<usize>,
}

impl<T> Default for SemanticRegionsBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SemanticRegionsBuilder<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SemanticRegionsBuilder {
            starts: Vec::with_capacity(capacity),
            ends: Vec::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            open: SmallVec::new(),
            has_nesting: false,
            sorted_ends: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Append the region `[start, end)` carrying `key`.
    ///
    /// Regions must arrive ordered by start. A region starting inside a
    /// still-open region must also end inside it; one sharing a start with
    /// an open region must not end after it.
    pub fn add(&mut self, key: T, start: u32, end: u32) -> Result<&mut Self, RegionError> {
        if start >= end {
            return Err(RegionError::EmptyRegion { start, end });
        }
        let index = self.starts.len();
        if let Some(last) = index.checked_sub(1) {
            if start < self.starts[last] {
                return Err(RegionError::OutOfOrder {
                    start,
                    end,
                    prior: self.prior(last),
                });
            }
        }

        // Open regions are nested outermost-first, so those ending by
        // `start` form a suffix of the stack.
        let still_open = self
            .open
            .iter()
            .rposition(|&open| self.ends[open] > start)
            .map_or(0, |position| position + 1);
        if let Some(&enclosing) = self.open[..still_open].last() {
            if end > self.ends[enclosing] {
                let prior = self.prior(enclosing);
                return Err(if self.starts[enclosing] == start {
                    RegionError::SameStartLargerEnd { start, end, prior }
                } else {
                    RegionError::Straddle { start, end, prior }
                });
            }
            self.has_nesting = true;
        }
        self.open.truncate(still_open);

        if self.sorted_ends.is_none() && self.ends.last().is_some_and(|&last| end < last) {
            self.sorted_ends = Some(index);
        }
        self.starts.push(start);
        self.ends.push(end);
        self.keys.push(key);
        self.open.push(index);
        Ok(self)
    }

    /// Freeze the accumulated regions, trimming spare capacity.
    pub fn build(self) -> SemanticRegions<T> {
        let sorted_ends = self.sorted_ends.unwrap_or(self.starts.len());
        debug!(
            regions = self.starts.len(),
            has_nesting = self.has_nesting,
            sorted_ends,
            "built semantic regions"
        );
        SemanticRegions {
            starts: self.starts.into_boxed_slice(),
            ends: self.ends.into_boxed_slice(),
            keys: self.keys.into_boxed_slice(),
            has_nesting: self.has_nesting,
            sorted_ends,
        }
    }

    fn prior(&self, index: usize) -> PriorRegion {
        PriorRegion {
            index,
            start: self.starts[index],
            end: self.ends[index],
        }
    }
}

impl SemanticRegionsBuilder<()> {
    /// Append a keyless region.
    pub fn add_bounds(&mut self, start: u32, end: u32) -> Result<&mut Self, RegionError> {
        self.add((), start, end)
    }
}

/// Serde goes through the raw arrays and replays them into a builder, so a
/// deserialized set always satisfies the nesting invariant.
#[cfg(feature = "cache")]
mod cache {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{SemanticRegions, SemanticRegionsBuilder};

    #[derive(Serialize)]
    struct RegionRowsRef<'a, T> {
        starts: &'a [u32],
        ends: &'a [u32],
        keys: &'a [T],
    }

    #[derive(Deserialize)]
    struct RegionRows<T> {
        starts: Vec<u32>,
        ends: Vec<u32>,
        keys: Vec<T>,
    }

    impl<T: Serialize> Serialize for SemanticRegions<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            RegionRowsRef {
                starts: &self.starts,
                ends: &self.ends,
                keys: &self.keys,
            }
            .serialize(serializer)
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for SemanticRegions<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let rows = RegionRows::<T>::deserialize(deserializer)?;
            if rows.starts.len() != rows.ends.len() || rows.starts.len() != rows.keys.len() {
                return Err(D::Error::custom(format!(
                    "region arrays differ in length: {} starts, {} ends, {} keys",
                    rows.starts.len(),
                    rows.ends.len(),
                    rows.keys.len()
                )));
            }
            let mut builder = SemanticRegionsBuilder::with_capacity(rows.starts.len());
            for ((key, start), end) in rows.keys.into_iter().zip(rows.starts).zip(rows.ends) {
                builder.add(key, start, end).map_err(D::Error::custom)?;
            }
            Ok(builder.build())
        }
    }
}
