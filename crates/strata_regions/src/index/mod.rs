//! Secondary lookup of regions by key.

use std::borrow::Borrow;

use crate::{SemanticRegion, SemanticRegions};

/// Regions sorted by a key, looked up by binary search.
///
/// When several regions share a key, the first inserted one is kept.
pub struct RegionIndex<'a, T, K> {
    regions: &'a SemanticRegions<T>,
    entries: Box<[(K, usize)]>,
}

impl<'a, T, K: Ord> RegionIndex<'a, T, K> {
    fn new(regions: &'a SemanticRegions<T>, mut entries: Vec<(K, usize)>) -> Self {
        // Stable: equal keys stay in insertion order, so dedup keeps the first.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|later, earlier| later.0 == earlier.0);
        RegionIndex {
            regions,
            entries: entries.into_boxed_slice(),
        }
    }

    /// The region indexed under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<SemanticRegion<'a, T>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries
            .binary_search_by(|(probe, _)| probe.borrow().cmp(key))
            .ok()
            .map(|position| self.regions.region(self.entries[position].1))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys with their regions, in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, SemanticRegion<'a, T>)> + '_ {
        self.entries
            .iter()
            .map(|(key, index)| (key, self.regions.region(*index)))
    }
}

impl<T: Ord> SemanticRegions<T> {
    /// Index the regions by their own keys.
    pub fn index(&self) -> RegionIndex<'_, T, &T> {
        RegionIndex::new(self, self.keys.iter().zip(0..).collect())
    }
}

impl<T> SemanticRegions<T> {
    /// Index the regions by a key derived from each region's data.
    ///
    /// Regions for which `key_of` returns `None` are left out. The derived
    /// key may borrow from the region's data.
    pub fn index_by_key<'a, K: Ord>(
        &'a self,
        mut key_of: impl FnMut(&'a T) -> Option<K>,
    ) -> RegionIndex<'a, T, K> {
        let entries = self
            .keys
            .iter()
            .enumerate()
            .filter_map(|(index, key)| key_of(key).map(|key| (key, index)))
            .collect();
        RegionIndex::new(self, entries)
    }
}

#[cfg(test)]
mod tests;
