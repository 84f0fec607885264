//! Errors raised while building, combining or addressing region sets.

use std::fmt;

use strata_graph::GraphError;

/// Bounds and position of an already-inserted region, quoted in errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PriorRegion {
    /// Insertion index of the region.
    pub index: usize,
    pub start: u32,
    pub end: u32,
}

impl fmt::Display for PriorRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region #{} [{}, {})", self.index, self.start, self.end)
    }
}

/// Error from region insertion, lookup or merging.
///
/// Insertion errors are caller errors: the input stream broke the nesting
/// invariant and must be re-derived from a fresh, correctly ordered parse.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// `start` is not strictly below `end`.
    #[error("region [{start}, {end}) is empty")]
    EmptyRegion { start: u32, end: u32 },

    /// The region starts before the previously inserted one.
    #[error("region [{start}, {end}) starts before {prior}")]
    OutOfOrder {
        start: u32,
        end: u32,
        prior: PriorRegion,
    },

    /// The region shares its start with an open region but ends after it.
    #[error("region [{start}, {end}) shares its start with {prior} but ends after it")]
    SameStartLargerEnd {
        start: u32,
        end: u32,
        prior: PriorRegion,
    },

    /// The region starts inside an open region and ends after it.
    #[error("region [{start}, {end}) straddles the end of {prior}")]
    Straddle {
        start: u32,
        end: u32,
        prior: PriorRegion,
    },

    /// A region index is not below the region count.
    #[error("region index {index} is out of bounds for {len} regions")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Merging two region sets would break the nesting invariant.
    #[error("cannot combine region sets: [{start}, {end}) conflicts with {prior}")]
    IncompatibleRegionSets {
        start: u32,
        end: u32,
        prior: PriorRegion,
    },

    /// Building the containment graph failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
