//! Merging region sets and comparing two builds of the same document.

use std::cmp::Reverse;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::{RegionError, SemanticRegion, SemanticRegions, SemanticRegionsBuilder};

/// Regions that differ between two builds, compared by exact bounds.
#[derive(Debug)]
pub struct RegionDifferences<'a, T> {
    /// Regions of the older build with no same-bounds counterpart.
    pub removed: Vec<SemanticRegion<'a, T>>,
    /// Regions of the newer build with no same-bounds counterpart.
    pub added: Vec<SemanticRegion<'a, T>>,
}

impl<T> RegionDifferences<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

impl<T: Clone> SemanticRegions<T> {
    /// Merge two region sets into one.
    ///
    /// Regions are interleaved by start, the larger region first on equal
    /// starts and `self` first on equal bounds. Fails if the two sets hold
    /// regions that straddle each other.
    #[tracing::instrument(level = "debug", skip_all, fields(left = self.len(), right = other.len()))]
    pub fn combine_with(&self, other: &Self) -> Result<Self, RegionError> {
        let mut builder = SemanticRegionsBuilder::with_capacity(self.len() + other.len());
        let (mut left, mut right) = (0, 0);
        loop {
            let take_left = match (left < self.len(), right < other.len()) {
                (false, false) => break,
                (true, false) => true,
                (false, true) => false,
                (true, true) => {
                    (self.starts[left], Reverse(self.ends[left]))
                        <= (other.starts[right], Reverse(other.ends[right]))
                }
            };
            let (source, index) = if take_left {
                left += 1;
                (self, left - 1)
            } else {
                right += 1;
                (other, right - 1)
            };
            let (start, end) = (source.starts[index], source.ends[index]);
            builder
                .add(source.keys[index].clone(), start, end)
                .map_err(|err| incompatible(err, start, end))?;
        }
        Ok(builder.build())
    }
}

fn incompatible(err: RegionError, start: u32, end: u32) -> RegionError {
    match err {
        RegionError::SameStartLargerEnd { prior, .. }
        | RegionError::Straddle { prior, .. }
        | RegionError::OutOfOrder { prior, .. } => {
            RegionError::IncompatibleRegionSets { start, end, prior }
        }
        other => other,
    }
}

impl<T> SemanticRegions<T> {
    /// Compare this (older) build against `newer`.
    ///
    /// The leading run of regions with identical bounds in both builds is
    /// skipped. Past it, a region counts as removed or added when the other
    /// build has no region with exactly the same bounds anywhere in its own
    /// remainder. This is cheap for the usual single-edit case but is not a
    /// minimal diff.
    pub fn differences<'a>(&'a self, newer: &'a Self) -> RegionDifferences<'a, T> {
        let common = self
            .starts
            .iter()
            .zip(&*self.ends)
            .zip(newer.starts.iter().zip(&*newer.ends))
            .take_while(|(old, new)| old == new)
            .count();

        let unmatched = |from: &'a Self, against: &Self| -> Vec<SemanticRegion<'a, T>> {
            let bounds: FxHashSet<(u32, u32)> = against.starts[common..]
                .iter()
                .copied()
                .zip(against.ends[common..].iter().copied())
                .collect();
            (common..from.len())
                .filter(|&index| !bounds.contains(&(from.starts[index], from.ends[index])))
                .map(|index| from.region(index))
                .collect()
        };
        let differences = RegionDifferences {
            removed: unmatched(self, newer),
            added: unmatched(newer, self),
        };
        debug!(
            common,
            removed = differences.removed.len(),
            added = differences.added.len(),
            "compared region builds"
        );
        differences
    }

    /// Compare against `newer` and hand the removed and added regions to
    /// `consumer` if anything changed. Returns whether it was called.
    pub fn differences_with<'a>(
        &'a self,
        newer: &'a Self,
        consumer: impl FnOnce(&[SemanticRegion<'a, T>], &[SemanticRegion<'a, T>]),
    ) -> bool {
        let differences = self.differences(newer);
        if differences.is_empty() {
            return false;
        }
        consumer(&differences.removed, &differences.added);
        true
    }
}
