//! Strata Regions - the nested region index built once per parse.
//!
//! A parser streams `(key, start, end)` triples in document order into a
//! [`SemanticRegionsBuilder`]; the frozen [`SemanticRegions`] then answers:
//!
//! - **Lookup**: the most deeply nested region at an offset ([`SemanticRegions::at`])
//! - **Structure**: parents, children, depth and outermost regions
//! - **Change tracking**: merging sets and diffing two builds
//! - **Keyed access**: a sorted secondary index over region keys
//! - **Cross-referencing**: containment between two independently built
//!   collections, as a [`strata_graph::BitSetGraph`]
//!
//! # Design
//!
//! - **Parallel arrays**: starts, ends and keys live in three boxed slices;
//!   [`SemanticRegion`] is a flyweight view (collection + index).
//! - **No stored tree**: parents and depth come from scanning backward,
//!   children from scanning forward.
//! - **Validated on insert**: the builder rejects out-of-order and
//!   straddling regions at the call that introduces them.

mod addressable;
mod combine;
mod error;
mod index;
mod region;
mod regions;

pub use addressable::{cross_reference, ContainmentGraph, IndexAddressable, IndexAddressableItem};
pub use combine::RegionDifferences;
pub use error::{PriorRegion, RegionError};
pub use index::RegionIndex;
pub use region::{Children, SemanticRegion};
pub use regions::{Outermost, Regions, SemanticRegions, SemanticRegionsBuilder};
